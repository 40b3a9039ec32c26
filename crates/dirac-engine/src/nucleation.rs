//! Threshold scan and flood-fill nucleation detection over the medium.

use dirac_automata::Population;
use dirac_medium::{box_blur_3x3, resolve_index, WaveField};
use glam::Vec2;

use crate::coupling::CouplingAdapter;

/// Generations a just-fired region stays ineligible, independent of
/// generation length.
pub const COOLDOWN_TICKS: u16 = 12;

/// Upper bound on distinct nuclei created by one scan.
pub const MAX_NUCLEI_PER_SCAN: usize = 6;

/// Walk offset advance per scan. Large and odd so repeated scans cover the
/// buffer without positional bias.
const SCAN_STRIDE: usize = 7919;

/// Radius multiplier applied to the threshold overshoot.
const RADIUS_SCALE: f32 = 1.6;

/// Largest seed radius, in automaton cells.
const MAX_RADIUS: f32 = 4.0;

/// Overshoot radii below this emit a 2x2 stable block instead of a disk.
const BLOCK_RADIUS_LIMIT: f32 = 1.5;

/// A batch of automaton coordinates to nucleate into one population.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NucleationBatch {
    /// Target population, by the sign of the originating region.
    pub population: Population,
    /// Automaton coordinates, wrapped or dropped by the receiving automaton.
    pub cells: Vec<(i64, i64)>,
}

/// Scans the medium for threshold-crossing connected regions.
///
/// The scan is deterministic: identical field contents, cooldown state, and
/// rotating offset produce identical regions and peaks.
#[derive(Debug, Clone)]
pub struct NucleationDetector {
    offset: usize,
    blurred: Vec<f32>,
    scratch: Vec<f32>,
    visited: Vec<bool>,
    stack: Vec<usize>,
}

impl NucleationDetector {
    /// Creates a detector for a medium of the given dimensions.
    pub fn new(width: usize, height: usize) -> Self {
        let size = width * height;
        Self {
            offset: 0,
            blurred: vec![0.0; size],
            scratch: vec![0.0; size],
            visited: vec![false; size],
            stack: Vec::new(),
        }
    }

    /// Scans the field and returns nucleation batches.
    ///
    /// Applies two 3x3 box-blur passes to a copy of the amplitude buffer to
    /// suppress speckle, walks all cells from the rotating offset, and
    /// flood-fills each unvisited, cooldown-expired cell whose blurred value
    /// exceeds `threshold` in magnitude. Every member of a firing region is
    /// put under cooldown. Antimatter candidates are skipped entirely when
    /// that population is disabled.
    pub fn scan(
        &mut self,
        field: &mut WaveField,
        adapter: &CouplingAdapter,
        threshold: f32,
        antimatter_enabled: bool,
    ) -> Vec<NucleationBatch> {
        let width = field.width();
        let height = field.height();
        let wrap = field.wrap();
        let size = width * height;
        if size == 0 {
            return Vec::new();
        }
        self.ensure_capacity(size);

        self.scratch.copy_from_slice(field.amplitude());
        box_blur_3x3(&self.scratch, &mut self.blurred, width, height, wrap);
        box_blur_3x3(&self.blurred, &mut self.scratch, width, height, wrap);
        std::mem::swap(&mut self.blurred, &mut self.scratch);

        self.visited.fill(false);
        self.offset = (self.offset + SCAN_STRIDE) % size;

        let mut batches = Vec::new();
        let mut nuclei = 0usize;

        for step in 0..size {
            if nuclei >= MAX_NUCLEI_PER_SCAN {
                break;
            }
            let start = (self.offset + step) % size;
            if self.visited[start]
                || field.cooldown_at(start) > 0
                || self.blurred[start].abs() <= threshold
            {
                continue;
            }

            let (region, peak_index, peak_value) =
                self.flood_fill(field, start, threshold, width, height, wrap);
            if region.is_empty() {
                continue;
            }

            for &i in &region {
                field.set_cooldown(i, COOLDOWN_TICKS);
            }

            let population = if peak_value > 0.0 {
                Population::Matter
            } else {
                Population::Antimatter
            };
            if population == Population::Antimatter && !antimatter_enabled {
                continue;
            }

            let (row, col) = adapter.to_automaton(peak_index % width, peak_index / width);
            let overshoot = (peak_value.abs() - threshold).max(0.0) / threshold;
            let radius = (RADIUS_SCALE * overshoot.sqrt()).min(MAX_RADIUS);

            batches.push(NucleationBatch {
                population,
                cells: seed_cells(row as i64, col as i64, radius),
            });
            nuclei += 1;
        }

        batches
    }

    /// Grows the maximal connected same-sign region at or beyond threshold.
    ///
    /// Iterative and 4-connected; cells under cooldown are excluded from
    /// growth. Returns the member indices with the most extreme cell.
    fn flood_fill(
        &mut self,
        field: &WaveField,
        start: usize,
        threshold: f32,
        width: usize,
        height: usize,
        wrap: bool,
    ) -> (Vec<usize>, usize, f32) {
        let positive = self.blurred[start] > 0.0;
        let mut region = Vec::new();
        let mut peak_index = start;
        let mut peak_value = self.blurred[start];

        self.stack.clear();
        self.stack.push(start);
        self.visited[start] = true;

        while let Some(i) = self.stack.pop() {
            region.push(i);
            let value = self.blurred[i];
            if value.abs() > peak_value.abs() {
                peak_index = i;
                peak_value = value;
            }

            let x = (i % width) as i64;
            let y = (i / width) as i64;
            for (dx, dy) in [(-1i64, 0i64), (1, 0), (0, -1), (0, 1)] {
                let Some(n) = resolve_index(x + dx, y + dy, width, height, wrap) else {
                    continue;
                };
                if self.visited[n] || field.cooldown_at(n) > 0 {
                    continue;
                }
                let v = self.blurred[n];
                if v.abs() >= threshold && (v > 0.0) == positive {
                    self.visited[n] = true;
                    self.stack.push(n);
                }
            }
        }

        (region, peak_index, peak_value)
    }

    fn ensure_capacity(&mut self, size: usize) {
        if self.blurred.len() != size {
            self.blurred = vec![0.0; size];
            self.scratch = vec![0.0; size];
            self.visited = vec![false; size];
            self.offset %= size.max(1);
        }
    }
}

/// Automaton seed coordinates for one nucleus.
///
/// Small overshoots emit a fixed 2x2 stable block; larger ones emit a
/// filled disk of the derived radius.
fn seed_cells(row: i64, col: i64, radius: f32) -> Vec<(i64, i64)> {
    if radius < BLOCK_RADIUS_LIMIT {
        return vec![(row, col), (row, col + 1), (row + 1, col), (row + 1, col + 1)];
    }

    let r = radius.ceil() as i64;
    let mut cells = Vec::new();
    for dr in -r..=r {
        for dc in -r..=r {
            if Vec2::new(dc as f32, dr as f32).length_squared() <= radius * radius {
                cells.push((row + dr, col + dc));
            }
        }
    }
    cells
}

#[cfg(test)]
mod tests {
    use super::*;
    use dirac_medium::MediumParams;

    fn quiet_field(adapter: &CouplingAdapter) -> WaveField {
        let (w, h) = adapter.medium_dims();
        WaveField::new(w, h, true, MediumParams::default(), 1)
    }

    /// Static blob that survives two blur passes well above threshold.
    fn hot_blob(field: &mut WaveField, cx: usize, cy: usize, value: f32) {
        for dy in 0..5 {
            for dx in 0..5 {
                field.set_amplitude(cx + dx - 2, cy + dy - 2, value);
            }
        }
    }

    #[test]
    fn test_scan_quiet_field_finds_nothing() {
        let adapter = CouplingAdapter::new(64, 64);
        let mut field = quiet_field(&adapter);
        let mut detector = NucleationDetector::new(field.width(), field.height());
        assert!(detector.scan(&mut field, &adapter, 0.5, true).is_empty());
    }

    #[test]
    fn test_scan_finds_matter_region() {
        let adapter = CouplingAdapter::new(64, 64);
        let mut field = quiet_field(&adapter);
        hot_blob(&mut field, 8, 8, 1.0);

        let mut detector = NucleationDetector::new(field.width(), field.height());
        let batches = detector.scan(&mut field, &adapter, 0.5, true);

        assert_eq!(batches.len(), 1);
        assert_eq!(batches[0].population, Population::Matter);
        assert!(!batches[0].cells.is_empty());
    }

    #[test]
    fn test_scan_finds_antimatter_region() {
        let adapter = CouplingAdapter::new(64, 64);
        let mut field = quiet_field(&adapter);
        hot_blob(&mut field, 8, 8, -1.0);

        let mut detector = NucleationDetector::new(field.width(), field.height());
        let batches = detector.scan(&mut field, &adapter, 0.5, true);

        assert_eq!(batches.len(), 1);
        assert_eq!(batches[0].population, Population::Antimatter);
    }

    #[test]
    fn test_antimatter_disabled_skips_candidate() {
        let adapter = CouplingAdapter::new(64, 64);
        let mut field = quiet_field(&adapter);
        hot_blob(&mut field, 8, 8, -1.0);

        let mut detector = NucleationDetector::new(field.width(), field.height());
        let batches = detector.scan(&mut field, &adapter, 0.5, false);
        assert!(batches.is_empty());
    }

    #[test]
    fn test_scan_deterministic() {
        let adapter = CouplingAdapter::new(64, 64);
        let mut field_a = quiet_field(&adapter);
        hot_blob(&mut field_a, 10, 6, 1.0);
        hot_blob(&mut field_a, 4, 12, -0.9);
        let mut field_b = field_a.clone();

        let mut detector_a = NucleationDetector::new(field_a.width(), field_a.height());
        let mut detector_b = detector_a.clone();

        let batches_a = detector_a.scan(&mut field_a, &adapter, 0.4, true);
        let batches_b = detector_b.scan(&mut field_b, &adapter, 0.4, true);
        assert_eq!(batches_a, batches_b);
        assert_eq!(batches_a.len(), 2);
    }

    #[test]
    fn test_cooldown_blocks_refire_until_elapsed() {
        let adapter = CouplingAdapter::new(64, 64);
        let mut field = quiet_field(&adapter);
        hot_blob(&mut field, 8, 8, 1.0);

        let mut detector = NucleationDetector::new(field.width(), field.height());
        assert_eq!(detector.scan(&mut field, &adapter, 0.5, true).len(), 1);

        // Still above threshold, but every member is cooling down.
        assert!(detector.scan(&mut field, &adapter, 0.5, true).is_empty());

        for _ in 0..COOLDOWN_TICKS {
            assert!(detector.scan(&mut field, &adapter, 0.5, true).is_empty());
            field.tick_cooldown();
        }
        assert_eq!(detector.scan(&mut field, &adapter, 0.5, true).len(), 1);
    }

    #[test]
    fn test_nuclei_cap_bounds_batches() {
        let adapter = CouplingAdapter::new(256, 256);
        let mut field = quiet_field(&adapter);
        // More isolated hot blobs than the per-scan cap.
        for i in 0..10 {
            let x = 6 + (i % 5) * 12;
            let y = 6 + (i / 5) * 24;
            hot_blob(&mut field, x, y, 1.0);
        }

        let mut detector = NucleationDetector::new(field.width(), field.height());
        let batches = detector.scan(&mut field, &adapter, 0.5, true);
        assert_eq!(batches.len(), MAX_NUCLEI_PER_SCAN);
    }

    #[test]
    fn test_small_overshoot_emits_block() {
        let cells = seed_cells(10, 10, 0.5);
        assert_eq!(cells.len(), 4);
        assert!(cells.contains(&(10, 10)));
        assert!(cells.contains(&(11, 11)));
    }

    #[test]
    fn test_large_overshoot_emits_disk() {
        let cells = seed_cells(10, 10, 2.5);
        assert!(cells.len() > 4);
        assert!(cells.contains(&(10, 10)));
        assert!(cells.contains(&(8, 10)));
        // Corners outside the radius are excluded.
        assert!(!cells.contains(&(7, 7)));
    }
}
