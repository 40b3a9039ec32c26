//! The per-generation pipeline orchestrator.

use dirac_automata::{DualAutomaton, PaintMode, Population};
use dirac_medium::{MediumParams, WaveField};

use crate::config::{CouplingMode, EngineConfig};
use crate::coupling::CouplingAdapter;
use crate::impulse::AnnihilationImpulseInjector;
use crate::nucleation::NucleationDetector;
use crate::snapshot::Snapshot;

/// Seed for the medium's ambient-noise RNG; fixed so equal engine setups
/// replay identically.
const MEDIUM_NOISE_SEED: u64 = 0xD1AC;

/// Owns the automaton, the medium, and the coupling layers, and runs each
/// generation as one atomic pass.
///
/// Each [`step`](CoupledEngine::step) runs the automaton rule and its
/// annihilation pass, rebuilds the medium source, integrates the medium,
/// scans for nucleation, seeds the resulting batches, injects annihilation
/// impulses, and ticks the cooldown counters. External mutations must be
/// serialized with `step` by the caller; nothing here blocks or interleaves.
#[derive(Debug, Clone)]
pub struct CoupledEngine {
    automaton: DualAutomaton,
    field: WaveField,
    adapter: CouplingAdapter,
    detector: NucleationDetector,
    injector: AnnihilationImpulseInjector,
    config: EngineConfig,
    consumed_events: u64,
}

impl CoupledEngine {
    /// Creates an engine with default configuration.
    pub fn new(rows: usize, cols: usize) -> Self {
        Self::with_config(rows, cols, EngineConfig::default())
    }

    /// Creates an engine with an explicit configuration.
    pub fn with_config(rows: usize, cols: usize, config: EngineConfig) -> Self {
        let config = config.clamped();
        let adapter = CouplingAdapter::new(rows, cols);
        let (width, height) = adapter.medium_dims();
        Self {
            automaton: DualAutomaton::new(rows, cols),
            field: WaveField::new(width, height, true, config.medium, MEDIUM_NOISE_SEED),
            adapter,
            detector: NucleationDetector::new(width, height),
            injector: AnnihilationImpulseInjector::new(config.impulse_strength),
            config,
            consumed_events: 0,
        }
    }

    /// Returns the automaton.
    pub fn automaton(&self) -> &DualAutomaton {
        &self.automaton
    }

    /// Returns the medium field.
    pub fn field(&self) -> &WaveField {
        &self.field
    }

    /// Returns the active configuration.
    pub fn config(&self) -> EngineConfig {
        self.config
    }

    /// Returns the generation counter.
    pub fn generation(&self) -> u64 {
        self.automaton.generation()
    }

    /// Runs one full generation of the coupled pipeline.
    pub fn step(&mut self) {
        self.automaton.step();
        self.adapter.rebuild_source(&self.automaton, &mut self.field);
        self.field.integrate(
            self.automaton.generation(),
            self.config.substeps,
            self.config.generation_dt,
        );

        if self.config.coupling_mode == CouplingMode::Nucleation {
            let batches = self.detector.scan(
                &mut self.field,
                &self.adapter,
                self.config.nucleation_threshold,
                self.config.antimatter_enabled,
            );
            for batch in batches {
                self.automaton.nucleate(&batch.cells, batch.population);
            }
        }

        let events = self.automaton.drain_events();
        self.consumed_events += events.len().min(crate::MAX_IMPULSES_PER_TICK) as u64;
        self.injector.apply(&events, &self.adapter, &mut self.field);
        self.field.tick_cooldown();
    }

    /// Runs multiple generations.
    pub fn steps(&mut self, n: usize) {
        for _ in 0..n {
            self.step();
        }
    }

    /// Adds or removes a single matter cell without emitting impulses.
    pub fn paint_cell(&mut self, row: usize, col: usize, mode: PaintMode) {
        self.automaton.paint_cell(row, col, mode);
    }

    /// Clears both populations and the medium.
    pub fn clear(&mut self) {
        self.automaton.clear();
        self.field.clear();
        self.field.clear_cooldown();
    }

    /// Replaces both populations with seeded random cells.
    pub fn randomize(&mut self, seed: u64, density: f32) {
        self.automaton.randomize(seed, density);
    }

    /// Replaces a population's cells with a seed pattern.
    pub fn seed_pattern(&mut self, cells: &[(i64, i64)], population: Population) {
        self.automaton.seed_pattern(cells, population);
    }

    /// Resizes the automaton grid, preserving in-bounds cells.
    ///
    /// The medium is reallocated and zeroed: its resolution follows the
    /// automaton dimensions, and stale wave state has no meaning on a new
    /// grid.
    pub fn resize(&mut self, rows: usize, cols: usize) {
        let wrap = self.field.wrap();
        self.automaton.resize(rows, cols);
        self.adapter = CouplingAdapter::new(rows, cols);
        let (width, height) = self.adapter.medium_dims();
        self.field = WaveField::new(width, height, wrap, self.config.medium, MEDIUM_NOISE_SEED);
        self.detector = NucleationDetector::new(width, height);
    }

    /// Switches between toroidal and bounded addressing on both grids.
    pub fn set_topology(&mut self, wrap: bool) {
        self.automaton.set_wrap(wrap);
        self.field.set_wrap(wrap);
    }

    /// Replaces the medium parameters, clamped to documented ranges.
    pub fn set_medium_params(&mut self, params: MediumParams) {
        self.config.medium = params.clamped();
        self.field.set_params(self.config.medium);
    }

    /// Sets the feedback mode.
    pub fn set_coupling_mode(&mut self, mode: CouplingMode) {
        self.config.coupling_mode = mode;
    }

    /// Enables or disables the antimatter population's nucleation.
    pub fn set_antimatter_enabled(&mut self, enabled: bool) {
        self.config.antimatter_enabled = enabled;
    }

    /// Sets the nucleation threshold, clamped.
    pub fn set_nucleation_threshold(&mut self, threshold: f32) {
        self.config.nucleation_threshold = EngineConfig {
            nucleation_threshold: threshold,
            ..self.config
        }
        .clamped()
        .nucleation_threshold;
    }

    /// Sets the annihilation impulse magnitude, clamped.
    pub fn set_impulse_strength(&mut self, strength: f32) {
        self.injector = AnnihilationImpulseInjector::new(strength);
        self.config.impulse_strength = self.injector.strength();
    }

    /// Captures an immutable snapshot for rendering.
    pub fn snapshot(&self) -> Snapshot {
        let mut matter: Vec<u32> = self.automaton.cells(Population::Matter).iter().copied().collect();
        let mut antimatter: Vec<u32> = self
            .automaton
            .cells(Population::Antimatter)
            .iter()
            .copied()
            .collect();
        matter.sort_unstable();
        antimatter.sort_unstable();

        Snapshot {
            rows: self.automaton.topology().rows(),
            cols: self.automaton.topology().cols(),
            matter,
            antimatter,
            medium_width: self.field.width(),
            medium_height: self.field.height(),
            medium: self.field.amplitude().to_vec(),
            generation: self.automaton.generation(),
            pending_events: self.automaton.pending_events(),
            consumed_events: self.consumed_events,
        }
    }
}
