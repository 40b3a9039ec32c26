//! Annihilation events as localized medium impulses.

use dirac_automata::AnnihilationEvent;
use dirac_medium::WaveField;

use crate::coupling::CouplingAdapter;

/// Upper bound on impulses injected per generation.
pub const MAX_IMPULSES_PER_TICK: usize = 64;

/// Converts annihilation events into net-zero medium impulses.
///
/// Each event deposits a positive impulse at its mapped medium cell and an
/// equal-magnitude-fraction negative impulse at the four direct neighbors,
/// so the total injected amplitude sums to zero and the field picks up no
/// drift. Impulses are written oppositely into the current and previous
/// buffers, carrying velocity as well as displacement.
#[derive(Debug, Clone, Copy)]
pub struct AnnihilationImpulseInjector {
    strength: f32,
}

impl AnnihilationImpulseInjector {
    /// Creates an injector with the given impulse magnitude.
    pub fn new(strength: f32) -> Self {
        Self {
            strength: strength.clamp(0.0, 4.0),
        }
    }

    /// Returns the impulse magnitude.
    pub fn strength(&self) -> f32 {
        self.strength
    }

    /// Injects impulses for pending events, capped per generation.
    ///
    /// The caller drains its event list exactly once per generation; this
    /// method never consumes more than [`MAX_IMPULSES_PER_TICK`] of them.
    pub fn apply(
        &self,
        events: &[AnnihilationEvent],
        adapter: &CouplingAdapter,
        field: &mut WaveField,
    ) {
        if self.strength == 0.0 {
            return;
        }
        let width = field.width() as i64;
        let height = field.height() as i64;
        let wrap = field.wrap();

        for &(row, col) in events.iter().take(MAX_IMPULSES_PER_TICK) {
            let (x, y) = adapter.to_medium(row as usize, col as usize);
            field.add_impulse(x, y, self.strength);

            let counter = -self.strength / 4.0;
            for (dx, dy) in [(-1i64, 0i64), (1, 0), (0, -1), (0, 1)] {
                let (mut nx, mut ny) = (x as i64 + dx, y as i64 + dy);
                if wrap {
                    nx = nx.rem_euclid(width);
                    ny = ny.rem_euclid(height);
                } else if nx < 0 || ny < 0 || nx >= width || ny >= height {
                    // Bounded edges drop the counterweight rather than fold
                    // it back onto the center.
                    continue;
                }
                field.add_impulse(nx as usize, ny as usize, counter);
            }
        }
    }
}

impl Default for AnnihilationImpulseInjector {
    fn default() -> Self {
        Self::new(1.2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dirac_medium::MediumParams;

    fn setup() -> (CouplingAdapter, WaveField) {
        let adapter = CouplingAdapter::new(64, 64);
        let (w, h) = adapter.medium_dims();
        (adapter, WaveField::new(w, h, true, MediumParams::default(), 1))
    }

    #[test]
    fn test_impulse_net_zero_under_wrap() {
        let (adapter, mut field) = setup();
        let injector = AnnihilationImpulseInjector::new(1.5);
        injector.apply(&[(32, 32)], &adapter, &mut field);

        let total: f32 = field.amplitude().iter().sum();
        assert!(total.abs() < 1e-5);
        assert!(field.energy() > 0.0);
    }

    #[test]
    fn test_impulse_signs() {
        let (adapter, mut field) = setup();
        let injector = AnnihilationImpulseInjector::new(2.0);
        injector.apply(&[(32, 32)], &adapter, &mut field);

        let (x, y) = adapter.to_medium(32, 32);
        assert_eq!(field.amplitude_at(x, y), 2.0);
        assert_eq!(field.amplitude_at(x + 1, y), -0.5);
        assert_eq!(field.amplitude_at(x, y + 1), -0.5);
    }

    #[test]
    fn test_impulse_cap() {
        let (adapter, mut field) = setup();
        let injector = AnnihilationImpulseInjector::new(1.0);

        // More events than the per-tick cap, all at distinct coordinates.
        let events: Vec<_> = (0..(MAX_IMPULSES_PER_TICK as u32 + 20))
            .map(|i| (i % 64, (i * 7) % 64))
            .collect();
        injector.apply(&events, &adapter, &mut field);

        let touched = field.amplitude().iter().filter(|&&u| u > 0.5).count();
        assert!(touched <= MAX_IMPULSES_PER_TICK);
        assert!(touched > 0);
    }

    #[test]
    fn test_zero_strength_is_a_no_op() {
        let (adapter, mut field) = setup();
        let injector = AnnihilationImpulseInjector::new(0.0);
        injector.apply(&[(10, 10)], &adapter, &mut field);
        assert_eq!(field.energy(), 0.0);
    }
}
