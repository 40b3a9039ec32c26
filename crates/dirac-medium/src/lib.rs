//! Damped nonlinear wave medium on a dense 2D grid.
//!
//! Integrates a discretized damped wave equation with biharmonic dispersion,
//! cubic softening, and a leaky memory feedback term:
//!
//! ```text
//! u_next = [2u - u_prev*(1 - gh/2) + h^2*(c^2*lap(u) - k*lap(lap(u)) + F + N + M)]
//!          / (1 + gh/2)
//! ```
//!
//! Forcing `F` is not continuous: a phase accumulator advances by
//! `2*pi*hop_hz*h` per substep and each full-turn crossing injects one
//! discrete impulse proportional to the signed source density, written with
//! opposite signs into the current and previous buffers so it carries
//! velocity as well as displacement.
//!
//! Every buffer read feeding a nonlinear term is clamped and every
//! non-finite intermediate is zeroed before it can propagate through the
//! stencil, so a misconfigured parameter set degrades instead of poisoning
//! the grid.
//!
//! # Example
//!
//! ```
//! use dirac_medium::{MediumParams, WaveField};
//!
//! let mut field = WaveField::new(64, 64, true, MediumParams::default(), 7);
//! field.add_impulse(32, 32, 1.0);
//! field.integrate(1, 8, 0.2);
//! assert!(field.energy() > 0.0);
//! ```

use std::f32::consts::TAU;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

// ============================================================================
// Parameters
// ============================================================================

/// Integration parameters for the wave medium.
///
/// Every field has a documented range; [`MediumParams::clamped`] is applied
/// at the public setter boundary, so hostile or garbage input degrades to
/// the nearest legal value instead of destabilizing the integrator.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MediumParams {
    /// Wave propagation speed `c`, in `[0, 4]`.
    pub wave_speed: f32,
    /// Velocity damping `g`, in `[0, 5]`.
    pub damping: f32,
    /// Biharmonic dispersion strength `k`, in `[0, 1]`.
    pub dispersion: f32,
    /// Cubic softening strength, in `[0, 4]`.
    pub nonlinearity: f32,
    /// Leaky-memory update rate, in `[0, 0.3]`.
    pub memory_rate: f32,
    /// Memory feedback gain, in `[-2, 2]`.
    pub memory_coupling: f32,
    /// Hop-forcing frequency in full turns per time unit, in `[0, 60]`.
    pub hop_hz: f32,
    /// Amplitude of each hop impulse, in `[0, 4]`.
    pub hop_strength: f32,
    /// Ambient noise blob density per cell per substep, in `[0, 0.01]`.
    pub noise_intensity: f32,
}

impl Default for MediumParams {
    fn default() -> Self {
        Self {
            wave_speed: 1.4,
            damping: 0.35,
            dispersion: 0.02,
            nonlinearity: 0.45,
            memory_rate: 0.08,
            memory_coupling: 0.25,
            hop_hz: 6.0,
            hop_strength: 0.9,
            noise_intensity: 0.0,
        }
    }
}

impl MediumParams {
    /// Returns a copy with every field clamped to its documented range.
    pub fn clamped(self) -> Self {
        Self {
            wave_speed: finite_or_zero(self.wave_speed).clamp(0.0, 4.0),
            damping: finite_or_zero(self.damping).clamp(0.0, 5.0),
            dispersion: finite_or_zero(self.dispersion).clamp(0.0, 1.0),
            nonlinearity: finite_or_zero(self.nonlinearity).clamp(0.0, 4.0),
            memory_rate: finite_or_zero(self.memory_rate).clamp(0.0, 0.3),
            memory_coupling: finite_or_zero(self.memory_coupling).clamp(-2.0, 2.0),
            hop_hz: finite_or_zero(self.hop_hz).clamp(0.0, 60.0),
            hop_strength: finite_or_zero(self.hop_strength).clamp(0.0, 4.0),
            noise_intensity: finite_or_zero(self.noise_intensity).clamp(0.0, 0.01),
        }
    }

    /// Parameters from a preset.
    pub fn from_preset(preset: MediumPreset) -> Self {
        preset.parameters()
    }
}

/// Preset parameter sets for common medium behaviors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum MediumPreset {
    /// Heavily damped, no forcing; disturbances die quickly.
    Still,
    /// Default-like gentle traveling waves.
    Ripples,
    /// Fast, lightly damped waves with ambient noise.
    Choppy,
    /// Slow, overdamped medium with strong memory feedback.
    Syrup,
}

impl MediumPreset {
    /// Returns the parameter set for this preset.
    pub fn parameters(&self) -> MediumParams {
        let base = MediumParams::default();
        match self {
            MediumPreset::Still => MediumParams {
                damping: 2.5,
                hop_hz: 0.0,
                hop_strength: 0.0,
                memory_coupling: 0.0,
                ..base
            },
            MediumPreset::Ripples => base,
            MediumPreset::Choppy => MediumParams {
                wave_speed: 2.2,
                damping: 0.12,
                noise_intensity: 0.0008,
                ..base
            },
            MediumPreset::Syrup => MediumParams {
                wave_speed: 0.7,
                damping: 1.8,
                memory_rate: 0.2,
                memory_coupling: 0.8,
                ..base
            },
        }
    }
}

// ============================================================================
// Wave Field
// ============================================================================

/// Upper clamp applied to any amplitude or memory value feeding a
/// nonlinear term.
const SOFT_CLAMP: f32 = 2.0;

/// Amplitude of a single ambient-noise blob.
const NOISE_BLOB_AMPLITUDE: f32 = 0.05;

/// Dense scalar wave field with three rotating amplitude buffers.
#[derive(Debug, Clone)]
pub struct WaveField {
    width: usize,
    height: usize,
    wrap: bool,
    /// Amplitude one substep ago.
    prev: Vec<f32>,
    /// Current amplitude.
    curr: Vec<f32>,
    /// Amplitude being written this substep.
    next: Vec<f32>,
    /// Laplacian scratch.
    lap: Vec<f32>,
    /// Laplacian-of-Laplacian scratch.
    lap2: Vec<f32>,
    /// Leaky integrator fed back through `memory_coupling`.
    memory: Vec<f32>,
    /// Signed source density rebuilt by the coupling layer each generation.
    source: Vec<f32>,
    /// Per-cell nucleation cooldown, in whole generations.
    cooldown: Vec<u16>,
    params: MediumParams,
    hop_phase: f32,
    last_generation: Option<u64>,
    noise_rng: SimpleRng,
}

impl WaveField {
    /// Creates a zeroed field.
    pub fn new(width: usize, height: usize, wrap: bool, params: MediumParams, noise_seed: u64) -> Self {
        let size = width * height;
        Self {
            width,
            height,
            wrap,
            prev: vec![0.0; size],
            curr: vec![0.0; size],
            next: vec![0.0; size],
            lap: vec![0.0; size],
            lap2: vec![0.0; size],
            memory: vec![0.0; size],
            source: vec![0.0; size],
            cooldown: vec![0; size],
            params: params.clamped(),
            hop_phase: 0.0,
            last_generation: None,
            noise_rng: SimpleRng::new(noise_seed),
        }
    }

    /// Returns the grid width.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the grid height.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the total cell count.
    pub fn len(&self) -> usize {
        self.curr.len()
    }

    /// Returns true if the field has no cells.
    pub fn is_empty(&self) -> bool {
        self.curr.is_empty()
    }

    /// Returns true if edges wrap around.
    pub fn wrap(&self) -> bool {
        self.wrap
    }

    /// Sets toroidal vs. bounded stencil addressing.
    pub fn set_wrap(&mut self, wrap: bool) {
        self.wrap = wrap;
    }

    /// Returns the active parameters.
    pub fn params(&self) -> MediumParams {
        self.params
    }

    /// Replaces the parameters, clamped to their documented ranges.
    pub fn set_params(&mut self, params: MediumParams) {
        self.params = params.clamped();
    }

    /// Returns the current amplitude buffer.
    pub fn amplitude(&self) -> &[f32] {
        &self.curr
    }

    /// Returns the amplitude at a cell, or `0.0` out of bounds.
    pub fn amplitude_at(&self, x: usize, y: usize) -> f32 {
        if x < self.width && y < self.height {
            self.curr[y * self.width + x]
        } else {
            0.0
        }
    }

    /// Returns the signed source-density buffer.
    pub fn source(&self) -> &[f32] {
        &self.source
    }

    /// Mutable access to the source buffer for the coupling layer.
    pub fn source_mut(&mut self) -> &mut [f32] {
        &mut self.source
    }

    /// Total field energy `sum(u^2)`.
    pub fn energy(&self) -> f32 {
        self.curr.iter().map(|&u| u * u).sum()
    }

    /// Zeroes all amplitude and memory state.
    pub fn clear(&mut self) {
        self.prev.fill(0.0);
        self.curr.fill(0.0);
        self.next.fill(0.0);
        self.memory.fill(0.0);
        self.hop_phase = 0.0;
        self.last_generation = None;
    }

    /// Sets the amplitude at a cell as a static displacement.
    ///
    /// Writes the same value into the current and previous buffers, so the
    /// cell starts at rest. Out-of-bounds coordinates are dropped.
    pub fn set_amplitude(&mut self, x: usize, y: usize, value: f32) {
        if x < self.width && y < self.height {
            let i = y * self.width + x;
            let value = finite_or_zero(value);
            self.curr[i] = value;
            self.prev[i] = value;
        }
    }

    /// Adds a localized impulse carrying both displacement and velocity.
    ///
    /// Writes `+amp` into the current buffer and `-amp` into the previous
    /// buffer, so the leapfrog scheme sees a velocity kick rather than a
    /// static bump.
    pub fn add_impulse(&mut self, x: usize, y: usize, amp: f32) {
        if x < self.width && y < self.height {
            let i = y * self.width + x;
            self.curr[i] += amp;
            self.prev[i] -= amp;
        }
    }

    // ------------------------------------------------------------------
    // Cooldown plumbing for the nucleation layer
    // ------------------------------------------------------------------

    /// Remaining cooldown ticks at a buffer index.
    pub fn cooldown_at(&self, index: usize) -> u16 {
        self.cooldown.get(index).copied().unwrap_or(0)
    }

    /// Sets the cooldown at a buffer index.
    pub fn set_cooldown(&mut self, index: usize, ticks: u16) {
        if let Some(slot) = self.cooldown.get_mut(index) {
            *slot = ticks;
        }
    }

    /// Decrements every nonzero cooldown by one generation.
    pub fn tick_cooldown(&mut self) {
        for slot in &mut self.cooldown {
            *slot = slot.saturating_sub(1);
        }
    }

    /// Clears every cooldown counter.
    pub fn clear_cooldown(&mut self) {
        self.cooldown.fill(0);
    }

    // ------------------------------------------------------------------
    // Integration
    // ------------------------------------------------------------------

    /// Advances the field by `total_dt`, split into `steps` equal substeps.
    ///
    /// The total is fixed per driving generation, so visual refresh rate and
    /// physical evolution stay decoupled. If `generation` regresses or jumps
    /// by more than one relative to the last integrated generation, the
    /// entire amplitude state is zeroed instead of attempting catch-up; a
    /// stale driver gets a quiet field, never a divergent one.
    pub fn integrate(&mut self, generation: u64, steps: u32, total_dt: f32) {
        if let Some(last) = self.last_generation {
            if generation != last.wrapping_add(1) {
                self.reset_amplitudes();
            }
        }
        self.last_generation = Some(generation);

        let steps = steps.max(1);
        let h = finite_or_zero(total_dt).max(0.0) / steps as f32;
        if h <= 0.0 {
            return;
        }

        for _ in 0..steps {
            self.substep(h);
        }
    }

    fn reset_amplitudes(&mut self) {
        self.prev.fill(0.0);
        self.curr.fill(0.0);
        self.next.fill(0.0);
        self.memory.fill(0.0);
        self.hop_phase = 0.0;
    }

    fn substep(&mut self, h: f32) {
        let p = self.params;

        // Leaky memory integrates the clamped amplitude before the main
        // update, so the feedback term sees last substep's state.
        let r = p.memory_rate;
        if r > 0.0 {
            for i in 0..self.curr.len() {
                let u = soft_read(self.curr[i]);
                self.memory[i] = finite_or_zero((1.0 - r) * self.memory[i] + r * u);
            }
        }

        // Periodic discrete hop: inject one impulse per full phase turn,
        // with the opposite sign into prev so it perturbs velocity too.
        if p.hop_hz > 0.0 && p.hop_strength > 0.0 {
            self.hop_phase += TAU * p.hop_hz * h;
            if self.hop_phase >= TAU {
                self.hop_phase -= TAU;
                for i in 0..self.curr.len() {
                    let kick = p.hop_strength * self.source[i];
                    self.curr[i] += kick;
                    self.prev[i] -= kick;
                }
            }
        }

        if p.noise_intensity > 0.0 {
            self.add_noise_blobs();
        }

        laplacian(&self.curr, &mut self.lap, self.width, self.height, self.wrap);
        laplacian(&self.lap, &mut self.lap2, self.width, self.height, self.wrap);

        let c2 = p.wave_speed * p.wave_speed;
        let h2 = h * h;
        let damp = p.damping * h * 0.5;
        let denom = 1.0 + damp;

        for i in 0..self.curr.len() {
            let u = finite_or_zero(self.curr[i]);
            let u_prev = finite_or_zero(self.prev[i]);
            let soft = soft_read(u);
            let mem = soft_read(self.memory[i]);

            let accel = c2 * finite_or_zero(self.lap[i]) - p.dispersion * finite_or_zero(self.lap2[i])
                - p.nonlinearity * soft * soft * soft
                + p.memory_coupling * mem;

            let value = (2.0 * u - u_prev * (1.0 - damp) + h2 * accel) / denom;
            self.next[i] = finite_or_zero(value);
        }

        // Rotate prev <- curr <- next without copying.
        std::mem::swap(&mut self.prev, &mut self.curr);
        std::mem::swap(&mut self.curr, &mut self.next);
    }

    fn add_noise_blobs(&mut self) {
        let count = (self.curr.len() as f32 * self.params.noise_intensity) as usize;
        for _ in 0..count {
            let cx = (self.noise_rng.next_u64() as usize) % self.width;
            let cy = (self.noise_rng.next_u64() as usize) % self.height;
            let half = 1 + (self.noise_rng.next_u64() as usize) % 2;
            let sign = if self.noise_rng.next_bool() { 1.0 } else { -1.0 };
            let amp = sign * NOISE_BLOB_AMPLITUDE * self.noise_rng.next_f32();

            for dy in -(half as i64)..=half as i64 {
                for dx in -(half as i64)..=half as i64 {
                    if let Some(i) =
                        resolve_index(cx as i64 + dx, cy as i64 + dy, self.width, self.height, self.wrap)
                    {
                        self.curr[i] += amp;
                    }
                }
            }
        }
    }
}

// ============================================================================
// Stencil helpers
// ============================================================================

/// Resolves a possibly out-of-range coordinate to a buffer index.
///
/// Wraps when toroidal, clamps to the nearest edge cell otherwise.
pub fn resolve_index(x: i64, y: i64, width: usize, height: usize, wrap: bool) -> Option<usize> {
    if width == 0 || height == 0 {
        return None;
    }
    let (x, y) = if wrap {
        (
            x.rem_euclid(width as i64) as usize,
            y.rem_euclid(height as i64) as usize,
        )
    } else {
        (
            x.clamp(0, width as i64 - 1) as usize,
            y.clamp(0, height as i64 - 1) as usize,
        )
    };
    Some(y * width + x)
}

/// 5-point discrete Laplacian, topology-aware.
///
/// Under bounded addressing the missing neighbor reads the edge cell itself,
/// which behaves as a reflecting boundary.
fn laplacian(field: &[f32], out: &mut [f32], width: usize, height: usize, wrap: bool) {
    for y in 0..height {
        for x in 0..width {
            let i = y * width + x;
            let center = finite_or_zero(field[i]);

            let mut sum = 0.0;
            for (dx, dy) in [(-1i64, 0i64), (1, 0), (0, -1), (0, 1)] {
                if let Some(n) = resolve_index(x as i64 + dx, y as i64 + dy, width, height, wrap) {
                    sum += finite_or_zero(field[n]);
                }
            }

            out[i] = sum - 4.0 * center;
        }
    }
}

/// One topology-aware 3x3 box-blur pass from `src` into `dst`.
pub fn box_blur_3x3(src: &[f32], dst: &mut [f32], width: usize, height: usize, wrap: bool) {
    for y in 0..height {
        for x in 0..width {
            let mut sum = 0.0;
            let mut n = 0.0;
            for dy in -1i64..=1 {
                for dx in -1i64..=1 {
                    if let Some(i) = resolve_index(x as i64 + dx, y as i64 + dy, width, height, wrap) {
                        sum += finite_or_zero(src[i]);
                        n += 1.0;
                    }
                }
            }
            dst[y * width + x] = sum / n;
        }
    }
}

fn finite_or_zero(x: f32) -> f32 {
    if x.is_finite() {
        x
    } else {
        0.0
    }
}

fn soft_read(x: f32) -> f32 {
    finite_or_zero(x).clamp(-SOFT_CLAMP, SOFT_CLAMP)
}

// ============================================================================
// Seeded RNG
// ============================================================================

/// Simple LCG used for ambient noise placement.
#[derive(Debug, Clone)]
struct SimpleRng {
    state: u64,
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        Self {
            state: seed.wrapping_add(1),
        }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self
            .state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.state
    }

    fn next_bool(&mut self) -> bool {
        self.next_u64() & 1 == 1
    }

    fn next_f32(&mut self) -> f32 {
        (self.next_u64() as f64 / u64::MAX as f64) as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quiet_params() -> MediumParams {
        MediumParams {
            wave_speed: 1.0,
            damping: 0.5,
            dispersion: 0.0,
            nonlinearity: 0.0,
            memory_rate: 0.0,
            memory_coupling: 0.0,
            hop_hz: 0.0,
            hop_strength: 0.0,
            noise_intensity: 0.0,
        }
    }

    #[test]
    fn test_creation_zeroed() {
        let field = WaveField::new(32, 24, true, MediumParams::default(), 1);
        assert_eq!(field.width(), 32);
        assert_eq!(field.height(), 24);
        assert_eq!(field.energy(), 0.0);
    }

    #[test]
    fn test_impulse_carries_velocity() {
        let mut field = WaveField::new(16, 16, true, quiet_params(), 1);
        field.add_impulse(8, 8, 1.0);
        assert_eq!(field.amplitude_at(8, 8), 1.0);
        // prev holds the opposite sign, so the first substep sees motion.
        field.integrate(1, 1, 0.05);
        assert!(field.energy() > 0.0);
    }

    #[test]
    fn test_energy_non_increasing_with_damping() {
        // Overdamped regime so every mode decays without oscillation.
        let mut params = quiet_params();
        params.damping = 3.0;
        params.wave_speed = 0.6;
        let mut field = WaveField::new(48, 48, true, params, 1);

        // Smooth bump at rest: pure displacement, zero initial velocity.
        for dy in -2i64..=2 {
            for dx in -2i64..=2 {
                let falloff = 1.0 / (1.0 + (dx * dx + dy * dy) as f32);
                field.set_amplitude((24 + dx) as usize, (24 + dy) as usize, falloff);
            }
        }

        let mut last = f32::INFINITY;
        for generation in 1..=40 {
            field.integrate(generation, 8, 0.15);
            let energy = field.energy();
            assert!(
                energy <= last + 1e-4,
                "energy rose from {} to {} at generation {}",
                last,
                energy,
                generation
            );
            last = energy;
        }
    }

    #[test]
    fn test_generation_skip_resets_field() {
        let mut field = WaveField::new(16, 16, true, quiet_params(), 1);
        field.add_impulse(8, 8, 1.0);
        field.integrate(1, 4, 0.1);
        assert!(field.energy() > 0.0);

        // Jump by more than one: the field must zero rather than catch up.
        field.integrate(5, 4, 0.1);
        assert_eq!(field.energy(), 0.0);
    }

    #[test]
    fn test_generation_regression_resets_field() {
        let mut field = WaveField::new(16, 16, true, quiet_params(), 1);
        field.add_impulse(8, 8, 1.0);
        field.integrate(3, 4, 0.1);
        field.integrate(2, 4, 0.1);
        assert_eq!(field.energy(), 0.0);
    }

    #[test]
    fn test_consecutive_generations_do_not_reset() {
        let mut field = WaveField::new(16, 16, true, quiet_params(), 1);
        field.add_impulse(8, 8, 1.0);
        field.integrate(1, 4, 0.1);
        field.integrate(2, 4, 0.1);
        assert!(field.energy() > 0.0);
    }

    #[test]
    fn test_non_finite_input_absorbed() {
        let mut field = WaveField::new(16, 16, true, MediumParams::default(), 1);
        field.add_impulse(4, 4, f32::NAN);
        field.add_impulse(10, 10, f32::INFINITY);
        field.integrate(1, 8, 0.2);
        for &u in field.amplitude() {
            assert!(u.is_finite());
        }
    }

    #[test]
    fn test_hop_forcing_fires_on_phase_crossing() {
        let mut params = quiet_params();
        params.hop_hz = 10.0;
        params.hop_strength = 1.0;
        params.damping = 0.0;

        let mut field = WaveField::new(8, 8, true, params, 1);
        field.source_mut()[0] = 1.0;

        // Half a turn of phase: no hop has fired yet.
        field.integrate(1, 4, 0.05);
        assert_eq!(field.energy(), 0.0);

        // One and a half turns: the full-turn crossing has fired.
        field.integrate(2, 4, 0.05);
        field.integrate(3, 4, 0.05);
        assert!(field.energy() > 0.0);
    }

    #[test]
    fn test_hop_silent_without_source() {
        let mut params = quiet_params();
        params.hop_hz = 10.0;
        params.hop_strength = 1.0;
        let mut field = WaveField::new(8, 8, true, params, 1);
        for generation in 1..=10 {
            field.integrate(generation, 4, 0.1);
        }
        assert_eq!(field.energy(), 0.0);
    }

    #[test]
    fn test_noise_disturbs_field() {
        let mut params = quiet_params();
        params.noise_intensity = 0.01;
        let mut field = WaveField::new(32, 32, true, params, 42);
        field.integrate(1, 4, 0.1);
        assert!(field.energy() > 0.0);
    }

    #[test]
    fn test_params_clamped_at_boundary() {
        let mut field = WaveField::new(8, 8, true, MediumParams::default(), 1);
        field.set_params(MediumParams {
            wave_speed: 100.0,
            damping: -3.0,
            dispersion: f32::NAN,
            nonlinearity: 9.0,
            memory_rate: 0.9,
            memory_coupling: -10.0,
            hop_hz: 1e6,
            hop_strength: -1.0,
            noise_intensity: 1.0,
        });
        let p = field.params();
        assert_eq!(p.wave_speed, 4.0);
        assert_eq!(p.damping, 0.0);
        assert_eq!(p.dispersion, 0.0);
        assert_eq!(p.nonlinearity, 4.0);
        assert_eq!(p.memory_rate, 0.3);
        assert_eq!(p.memory_coupling, -2.0);
        assert_eq!(p.hop_hz, 60.0);
        assert_eq!(p.hop_strength, 0.0);
        assert_eq!(p.noise_intensity, 0.01);
    }

    #[test]
    fn test_cooldown_tick() {
        let mut field = WaveField::new(8, 8, true, MediumParams::default(), 1);
        field.set_cooldown(5, 2);
        assert_eq!(field.cooldown_at(5), 2);
        field.tick_cooldown();
        assert_eq!(field.cooldown_at(5), 1);
        field.tick_cooldown();
        field.tick_cooldown();
        assert_eq!(field.cooldown_at(5), 0);
    }

    #[test]
    fn test_box_blur_preserves_uniform_field() {
        let src = vec![0.5; 36];
        let mut dst = vec![0.0; 36];
        box_blur_3x3(&src, &mut dst, 6, 6, true);
        for &v in &dst {
            assert!((v - 0.5).abs() < 1e-6);
        }
    }

    #[test]
    fn test_clear() {
        let mut field = WaveField::new(8, 8, true, MediumParams::default(), 1);
        field.add_impulse(2, 2, 1.0);
        field.integrate(1, 2, 0.1);
        field.clear();
        assert_eq!(field.energy(), 0.0);
    }

    #[test]
    fn test_preset_parameters() {
        assert_eq!(MediumPreset::Still.parameters().hop_strength, 0.0);
        assert!(MediumPreset::Choppy.parameters().noise_intensity > 0.0);
        assert!(MediumPreset::Syrup.parameters().damping > 1.0);
    }
}
