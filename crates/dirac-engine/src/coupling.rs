//! Coordinate mapping and source rebuild between automaton and medium.

use dirac_automata::{DualAutomaton, Population};
use dirac_medium::{box_blur_3x3, WaveField};
use glam::Vec2;

/// Automaton cells per medium cell along each axis.
pub const DOWNSAMPLE_FACTOR: usize = 4;

/// Smallest medium dimension the downsampling rule may produce.
pub const MIN_MEDIUM_DIM: usize = 16;

/// Largest medium dimension the downsampling rule may produce.
pub const MAX_MEDIUM_DIM: usize = 256;

/// Maps automaton coordinates to and from the lower-resolution medium grid
/// and rebuilds the signed per-generation source density.
#[derive(Debug, Clone)]
pub struct CouplingAdapter {
    rows: usize,
    cols: usize,
    width: usize,
    height: usize,
    blur_scratch: Vec<f32>,
}

impl CouplingAdapter {
    /// Creates an adapter for an automaton grid, choosing medium dimensions
    /// by the bounded downsampling rule.
    pub fn new(rows: usize, cols: usize) -> Self {
        let width = medium_dim(cols);
        let height = medium_dim(rows);
        Self {
            rows,
            cols,
            width,
            height,
            blur_scratch: vec![0.0; width * height],
        }
    }

    /// Returns the medium grid dimensions `(width, height)`.
    pub fn medium_dims(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Returns the automaton grid dimensions `(rows, cols)`.
    pub fn automaton_dims(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Ratio of medium cell count to automaton cell count.
    ///
    /// Scaling the accumulated source by this keeps wave amplitude
    /// independent of the chosen medium resolution.
    pub fn area_ratio(&self) -> f32 {
        (self.width * self.height) as f32 / (self.rows * self.cols).max(1) as f32
    }

    /// Nearest medium cell under an automaton coordinate.
    pub fn to_medium(&self, row: usize, col: usize) -> (usize, usize) {
        let scale = Vec2::new(
            self.width as f32 / self.cols.max(1) as f32,
            self.height as f32 / self.rows.max(1) as f32,
        );
        let p = Vec2::new(col as f32 + 0.5, row as f32 + 0.5) * scale;
        (
            (p.x as usize).min(self.width.saturating_sub(1)),
            (p.y as usize).min(self.height.saturating_sub(1)),
        )
    }

    /// Automaton coordinate under the center of a medium cell.
    pub fn to_automaton(&self, x: usize, y: usize) -> (usize, usize) {
        let scale = Vec2::new(
            self.cols as f32 / self.width.max(1) as f32,
            self.rows as f32 / self.height.max(1) as f32,
        );
        let p = Vec2::new(x as f32 + 0.5, y as f32 + 0.5) * scale;
        (
            (p.y as usize).min(self.rows.saturating_sub(1)),
            (p.x as usize).min(self.cols.saturating_sub(1)),
        )
    }

    /// Rebuilds the medium's signed source density from the live sets.
    ///
    /// Matter contributes `+1`, antimatter `-1`, accumulated into the
    /// nearest medium cell, normalized by the cell-area ratio, then spread
    /// with one 3x3 box-blur pass so multi-cell structures emit broader
    /// wavefronts than single cells.
    pub fn rebuild_source(&mut self, automaton: &DualAutomaton, field: &mut WaveField) {
        let wrap = field.wrap();
        let topology = automaton.topology();
        let (w, h) = (self.width, self.height);
        let ratio = self.area_ratio();

        let source = field.source_mut();
        source.fill(0.0);

        for &key in automaton.cells(Population::Matter) {
            let (r, c) = topology.coords(key);
            let (x, y) = self.to_medium(r, c);
            source[y * w + x] += ratio;
        }
        for &key in automaton.cells(Population::Antimatter) {
            let (r, c) = topology.coords(key);
            let (x, y) = self.to_medium(r, c);
            source[y * w + x] -= ratio;
        }

        box_blur_3x3(source, &mut self.blur_scratch, w, h, wrap);
        source.copy_from_slice(&self.blur_scratch);
    }
}

/// Bounded downsampling rule for one axis.
fn medium_dim(automaton_dim: usize) -> usize {
    automaton_dim
        .div_ceil(DOWNSAMPLE_FACTOR)
        .clamp(MIN_MEDIUM_DIM, MAX_MEDIUM_DIM)
}
