//! Coupled automaton/medium demo.
//!
//! Seeds both populations, runs the full pipeline for a while, and prints
//! population and field statistics every few generations.
//!
//! Run with: `cargo run -p dirac-engine --example coupled_loop`

use dirac_engine::{patterns, CoupledEngine, MediumPreset, Population};

fn main() {
    let mut engine = CoupledEngine::new(120, 120);
    engine.set_medium_params(MediumPreset::Ripples.parameters());

    engine.seed_pattern(
        &patterns::place(patterns::R_PENTOMINO, 40, 40),
        Population::Matter,
    );
    engine.seed_pattern(
        &patterns::place(patterns::GLIDER, 70, 70),
        Population::Antimatter,
    );

    println!("generation  matter  antimatter  field energy  annihilations");
    for _ in 0..20 {
        engine.steps(5);
        let snapshot = engine.snapshot();
        println!(
            "{:>10}  {:>6}  {:>10}  {:>12.4}  {:>13}",
            snapshot.generation,
            snapshot.matter.len(),
            snapshot.antimatter.len(),
            engine.field().energy(),
            snapshot.consumed_events,
        );
    }
}
