//! Read-only state snapshot for rendering layers.

/// Immutable copy of the coupled state at the end of a generation.
///
/// Renderers consume this and never touch the live engine. Cell keys are
/// `row * cols + col`, sorted for deterministic iteration.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    /// Automaton rows.
    pub rows: usize,
    /// Automaton columns.
    pub cols: usize,
    /// Sorted matter cell keys.
    pub matter: Vec<u32>,
    /// Sorted antimatter cell keys.
    pub antimatter: Vec<u32>,
    /// Medium grid width.
    pub medium_width: usize,
    /// Medium grid height.
    pub medium_height: usize,
    /// Medium amplitude buffer, row-major.
    pub medium: Vec<f32>,
    /// Generation counter.
    pub generation: u64,
    /// Annihilation events recorded but not yet injected.
    pub pending_events: usize,
    /// Annihilation events injected over the engine's lifetime.
    pub consumed_events: u64,
}
