//! Engine configuration.

use dirac_medium::MediumParams;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// How the medium feeds back into the automaton.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum CouplingMode {
    /// The medium absorbs automaton activity but never creates cells.
    Passive,
    /// Threshold-crossing regions nucleate new automaton cells.
    Nucleation,
}

/// Explicit, owned configuration for [`CoupledEngine`](crate::CoupledEngine).
///
/// Settings change only through engine setters between atomic steps; nothing
/// in the pipeline captures a stale copy. Every numeric field is clamped at
/// the setter boundary because upstream validation cannot be trusted.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EngineConfig {
    /// Medium substeps per automaton generation, in `[1, 64]`.
    pub substeps: u32,
    /// Physical time integrated per generation, in `[0.001, 1.0]`.
    pub generation_dt: f32,
    /// Nucleation threshold `tau` on blurred amplitude, in `[0.05, 10.0]`.
    pub nucleation_threshold: f32,
    /// Feedback mode.
    pub coupling_mode: CouplingMode,
    /// Whether antimatter nucleation candidates are honored.
    pub antimatter_enabled: bool,
    /// Magnitude of each annihilation impulse, in `[0, 4]`.
    pub impulse_strength: f32,
    /// Medium integration parameters.
    pub medium: MediumParams,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            substeps: 8,
            generation_dt: 0.2,
            nucleation_threshold: 0.6,
            coupling_mode: CouplingMode::Nucleation,
            antimatter_enabled: true,
            impulse_strength: 1.2,
            medium: MediumParams::default(),
        }
    }
}

impl EngineConfig {
    /// Returns a copy with every numeric field clamped to its range.
    pub fn clamped(self) -> Self {
        Self {
            substeps: self.substeps.clamp(1, 64),
            generation_dt: finite_or(self.generation_dt, 0.2).clamp(0.001, 1.0),
            nucleation_threshold: finite_or(self.nucleation_threshold, 0.6).clamp(0.05, 10.0),
            coupling_mode: self.coupling_mode,
            antimatter_enabled: self.antimatter_enabled,
            impulse_strength: finite_or(self.impulse_strength, 1.2).clamp(0.0, 4.0),
            medium: self.medium.clamped(),
        }
    }
}

fn finite_or(x: f32, fallback: f32) -> f32 {
    if x.is_finite() {
        x
    } else {
        fallback
    }
}
