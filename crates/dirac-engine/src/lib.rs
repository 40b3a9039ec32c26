//! Coupled automaton/medium simulation engine.
//!
//! Ties together the two-population automaton from [`dirac_automata`] and
//! the wave medium from [`dirac_medium`]:
//!
//! - [`CouplingAdapter`] maps automaton coordinates onto the lower-resolution
//!   medium grid and rebuilds the signed source density each generation.
//! - [`NucleationDetector`] scans the medium for threshold-crossing regions
//!   and emits new automaton cell batches.
//! - [`AnnihilationImpulseInjector`] converts matter/antimatter annihilation
//!   events into net-zero medium impulses.
//! - [`CoupledEngine`] owns all of the above and runs the per-generation
//!   pipeline atomically.
//!
//! # Example
//!
//! ```
//! use dirac_engine::CoupledEngine;
//!
//! let mut engine = CoupledEngine::new(100, 100);
//! engine.randomize(42, 0.2);
//! for _ in 0..10 {
//!     engine.step();
//! }
//! let snapshot = engine.snapshot();
//! assert_eq!(snapshot.generation, 10);
//! ```

mod config;
mod coupling;
mod engine;
mod impulse;
mod nucleation;
mod snapshot;

pub use config::{CouplingMode, EngineConfig};
pub use coupling::{CouplingAdapter, DOWNSAMPLE_FACTOR, MAX_MEDIUM_DIM, MIN_MEDIUM_DIM};
pub use engine::CoupledEngine;
pub use impulse::{AnnihilationImpulseInjector, MAX_IMPULSES_PER_TICK};
pub use nucleation::{
    NucleationBatch, NucleationDetector, COOLDOWN_TICKS, MAX_NUCLEI_PER_SCAN,
};
pub use snapshot::Snapshot;

pub use dirac_automata::{patterns, DualAutomaton, GridTopology, PaintMode, Population};
pub use dirac_medium::{MediumParams, MediumPreset, WaveField};
