//! Sparse two-population cellular automaton with mutual annihilation.
//!
//! Runs two independent copies of the classic B3/S23 life rule, a "matter"
//! population and an "antimatter" population, over one shared grid. After
//! every mutation the two live sets are reconciled: any coordinate occupied
//! by both populations is removed from both, optionally recording an
//! annihilation event for downstream consumers.
//!
//! Cells are stored sparsely as integer keys (`row * cols + col`), so cost
//! scales with live population rather than grid area.
//!
//! # Example
//!
//! ```
//! use dirac_automata::{DualAutomaton, Population, patterns};
//!
//! let mut life = DualAutomaton::new(50, 50);
//! life.seed_pattern(&patterns::place(patterns::GLIDER, 10, 10), Population::Matter);
//! life.step();
//! assert!(life.population(Population::Matter) > 0);
//! ```

use std::collections::{HashMap, HashSet};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

// ============================================================================
// Grid Topology
// ============================================================================

/// Static addressing rules for a bounded or toroidal grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GridTopology {
    rows: usize,
    cols: usize,
    wrap: bool,
}

impl GridTopology {
    /// Creates a topology over `rows x cols` cells.
    pub fn new(rows: usize, cols: usize, wrap: bool) -> Self {
        Self { rows, cols, wrap }
    }

    /// Returns the number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Returns the number of columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Returns the total cell count.
    pub fn len(&self) -> usize {
        self.rows * self.cols
    }

    /// Returns true if the grid has no cells.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns true if edges wrap around (toroidal addressing).
    pub fn wrap(&self) -> bool {
        self.wrap
    }

    /// Sets toroidal vs. bounded addressing.
    pub fn set_wrap(&mut self, wrap: bool) {
        self.wrap = wrap;
    }

    /// Packs an in-bounds coordinate into a cell key.
    pub fn key(&self, row: usize, col: usize) -> u32 {
        (row * self.cols + col) as u32
    }

    /// Unpacks a cell key into `(row, col)`.
    pub fn coords(&self, key: u32) -> (usize, usize) {
        let key = key as usize;
        (key / self.cols, key % self.cols)
    }

    /// Resolves a possibly out-of-range coordinate to a cell key.
    ///
    /// Wraps modulo dimension when toroidal, otherwise returns `None` for
    /// anything outside the grid.
    pub fn resolve(&self, row: i64, col: i64) -> Option<u32> {
        if self.rows == 0 || self.cols == 0 {
            return None;
        }
        if self.wrap {
            let r = row.rem_euclid(self.rows as i64) as usize;
            let c = col.rem_euclid(self.cols as i64) as usize;
            Some(self.key(r, c))
        } else if row >= 0 && col >= 0 && (row as usize) < self.rows && (col as usize) < self.cols {
            Some(self.key(row as usize, col as usize))
        } else {
            None
        }
    }

    /// Returns true if the coordinate lies inside the grid without wrapping.
    pub fn contains(&self, row: i64, col: i64) -> bool {
        row >= 0 && col >= 0 && (row as usize) < self.rows && (col as usize) < self.cols
    }
}

// ============================================================================
// Populations and Events
// ============================================================================

/// One of the two automaton species sharing the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Population {
    /// The primary population (positive sign in the coupled medium).
    Matter,
    /// The mirror population (negative sign in the coupled medium).
    Antimatter,
}

/// Paint operation applied by [`DualAutomaton::paint_cell`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PaintMode {
    /// Add a matter cell.
    Draw,
    /// Remove a matter cell.
    Erase,
}

/// Grid coordinate of a mutual annihilation, in automaton space.
pub type AnnihilationEvent = (u32, u32);

// ============================================================================
// Dual-Population Automaton
// ============================================================================

/// Two sparse live-cell sets stepped under the classic life rule.
///
/// A live cell survives with 2-3 same-population neighbors; a dead cell is
/// born with exactly 3. The two populations never interact through the rule
/// itself, only through the annihilation pass that removes coincident
/// matter/antimatter pairs after every mutation.
#[derive(Debug, Clone)]
pub struct DualAutomaton {
    topology: GridTopology,
    matter: HashSet<u32>,
    antimatter: HashSet<u32>,
    generation: u64,
    events: Vec<AnnihilationEvent>,
    events_drained_at: Option<u64>,
    redraw: bool,
}

impl DualAutomaton {
    /// Creates an empty automaton with toroidal addressing.
    pub fn new(rows: usize, cols: usize) -> Self {
        Self::with_topology(GridTopology::new(rows, cols, true))
    }

    /// Creates an empty automaton over an explicit topology.
    pub fn with_topology(topology: GridTopology) -> Self {
        Self {
            topology,
            matter: HashSet::new(),
            antimatter: HashSet::new(),
            generation: 0,
            events: Vec::new(),
            events_drained_at: None,
            redraw: false,
        }
    }

    /// Returns the grid topology.
    pub fn topology(&self) -> GridTopology {
        self.topology
    }

    /// Sets toroidal vs. bounded addressing.
    pub fn set_wrap(&mut self, wrap: bool) {
        self.topology.set_wrap(wrap);
    }

    /// Returns the generation counter.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Returns the live-cell key set for a population.
    pub fn cells(&self, population: Population) -> &HashSet<u32> {
        match population {
            Population::Matter => &self.matter,
            Population::Antimatter => &self.antimatter,
        }
    }

    /// Counts live cells in a population.
    pub fn population(&self, population: Population) -> usize {
        self.cells(population).len()
    }

    /// Returns true if a population occupies the coordinate.
    pub fn get(&self, row: usize, col: usize, population: Population) -> bool {
        match self.topology.resolve(row as i64, col as i64) {
            Some(key) => self.cells(population).contains(&key),
            None => false,
        }
    }

    /// Returns and clears the redraw flag.
    pub fn take_redraw(&mut self) -> bool {
        std::mem::replace(&mut self.redraw, false)
    }

    /// Number of annihilation events recorded and not yet drained.
    pub fn pending_events(&self) -> usize {
        self.events.len()
    }

    /// Drains recorded annihilation events, at most once per generation.
    ///
    /// A second call within the same generation returns an empty list, so a
    /// downstream consumer can never double-inject impulses for one tick.
    pub fn drain_events(&mut self) -> Vec<AnnihilationEvent> {
        if self.events_drained_at == Some(self.generation) {
            return Vec::new();
        }
        self.events_drained_at = Some(self.generation);
        std::mem::take(&mut self.events)
    }

    /// Advances both populations by one generation.
    ///
    /// Runs the life rule independently per population, then the
    /// annihilation pass with event emission.
    pub fn step(&mut self) {
        let next_matter = self.step_population(&self.matter);
        let next_antimatter = self.step_population(&self.antimatter);
        self.matter = next_matter;
        self.antimatter = next_antimatter;
        self.annihilate(true);
        self.generation += 1;
        self.redraw = true;
    }

    /// Advances multiple generations.
    pub fn steps(&mut self, n: usize) {
        for _ in 0..n {
            self.step();
        }
    }

    /// Applies the life rule to one sparse live set.
    fn step_population(&self, live: &HashSet<u32>) -> HashSet<u32> {
        let mut counts: HashMap<u32, u8> = HashMap::with_capacity(live.len() * 4);

        for &key in live {
            let (r, c) = self.topology.coords(key);
            for dr in -1i64..=1 {
                for dc in -1i64..=1 {
                    if dr == 0 && dc == 0 {
                        continue;
                    }
                    if let Some(neighbor) = self.topology.resolve(r as i64 + dr, c as i64 + dc) {
                        *counts.entry(neighbor).or_insert(0) += 1;
                    }
                }
            }
        }

        let mut next = HashSet::with_capacity(live.len());
        for (&key, &count) in &counts {
            let alive = live.contains(&key);
            if (alive && (count == 2 || count == 3)) || (!alive && count == 3) {
                next.insert(key);
            }
        }
        next
    }

    /// Adds or removes a single matter cell.
    ///
    /// Out-of-bounds coordinates are dropped. The annihilation pass that
    /// follows a draw is silent: a manual stroke never records events, so it
    /// never feeds an impulse back into the medium.
    pub fn paint_cell(&mut self, row: usize, col: usize, mode: PaintMode) {
        if !self.topology.contains(row as i64, col as i64) {
            return;
        }
        let key = self.topology.key(row, col);
        match mode {
            PaintMode::Draw => {
                self.matter.insert(key);
            }
            PaintMode::Erase => {
                self.matter.remove(&key);
            }
        }
        self.annihilate(false);
        self.redraw = true;
    }

    /// Bulk-adds coordinates to a population, then reconciles with events.
    ///
    /// Coordinates are wrapped under toroidal addressing and silently
    /// dropped under bounded addressing.
    pub fn nucleate(&mut self, cells: &[(i64, i64)], population: Population) {
        let target = match population {
            Population::Matter => &mut self.matter,
            Population::Antimatter => &mut self.antimatter,
        };
        for &(row, col) in cells {
            if let Some(key) = self.topology.resolve(row, col) {
                target.insert(key);
            }
        }
        self.annihilate(true);
        self.redraw = true;
    }

    /// Replaces a population's cells with a seed pattern.
    pub fn seed_pattern(&mut self, cells: &[(i64, i64)], population: Population) {
        match population {
            Population::Matter => self.matter.clear(),
            Population::Antimatter => self.antimatter.clear(),
        }
        self.nucleate(cells, population);
    }

    /// Removes every cell from both populations.
    pub fn clear(&mut self) {
        self.matter.clear();
        self.antimatter.clear();
        self.events.clear();
        self.redraw = true;
    }

    /// Replaces both populations with seeded random cells.
    ///
    /// Each cell independently becomes matter with probability `density` and
    /// antimatter with the same probability; coincident draws annihilate
    /// silently. Identical seeds produce identical grids.
    pub fn randomize(&mut self, seed: u64, density: f32) {
        let density = density.clamp(0.0, 1.0);
        let mut rng = SimpleRng::new(seed);
        self.matter.clear();
        self.antimatter.clear();
        for key in 0..self.topology.len() as u32 {
            if rng.next_f32() < density {
                self.matter.insert(key);
            }
            if rng.next_f32() < density {
                self.antimatter.insert(key);
            }
        }
        self.annihilate(false);
        self.redraw = true;
    }

    /// Resizes the grid, preserving cells that remain in bounds.
    ///
    /// Shrinking silently discards cells outside the new bounds. Keys are
    /// recomputed because the column stride changes.
    pub fn resize(&mut self, rows: usize, cols: usize) {
        let old = self.topology;
        let new = GridTopology::new(rows, cols, old.wrap());

        let rekey = |set: &HashSet<u32>| -> HashSet<u32> {
            set.iter()
                .map(|&key| old.coords(key))
                .filter(|&(r, c)| r < rows && c < cols)
                .map(|(r, c)| new.key(r, c))
                .collect()
        };

        self.matter = rekey(&self.matter);
        self.antimatter = rekey(&self.antimatter);
        self.topology = new;
        self.redraw = true;
    }

    /// Removes coincident matter/antimatter pairs.
    ///
    /// Iterates the smaller set and probes the larger, bounding cost by
    /// `min(|matter|, |antimatter|)`.
    fn annihilate(&mut self, emit: bool) {
        let (smaller, larger) = if self.matter.len() <= self.antimatter.len() {
            (&self.matter, &self.antimatter)
        } else {
            (&self.antimatter, &self.matter)
        };

        let mut shared: Vec<u32> =
            smaller.iter().filter(|k| larger.contains(k)).copied().collect();
        // Set iteration order is not stable across runs; events must be.
        shared.sort_unstable();
        for key in shared {
            self.matter.remove(&key);
            self.antimatter.remove(&key);
            if emit {
                let (r, c) = self.topology.coords(key);
                self.events.push((r as u32, c as u32));
            }
        }
    }
}

// ============================================================================
// Seed Patterns
// ============================================================================

/// Classic life seed patterns as `(row, col)` offsets from an origin.
pub mod patterns {
    /// 2x2 still life.
    pub const BLOCK: &[(i64, i64)] = &[(0, 0), (0, 1), (1, 0), (1, 1)];

    /// Horizontal period-2 oscillator.
    pub const BLINKER: &[(i64, i64)] = &[(0, 0), (0, 1), (0, 2)];

    /// Diagonal glider.
    pub const GLIDER: &[(i64, i64)] = &[(0, 1), (1, 2), (2, 0), (2, 1), (2, 2)];

    /// Long-lived methuselah.
    pub const R_PENTOMINO: &[(i64, i64)] = &[(0, 1), (0, 2), (1, 0), (1, 1), (2, 1)];

    /// Translates a pattern so its origin lands at `(row, col)`.
    pub fn place(pattern: &[(i64, i64)], row: i64, col: i64) -> Vec<(i64, i64)> {
        pattern.iter().map(|&(r, c)| (r + row, c + col)).collect()
    }
}

// ============================================================================
// Seeded RNG
// ============================================================================

/// Simple LCG used for deterministic randomization.
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

    fn next_f32(&mut self) -> f32 {
        (self.next_u64() as f64 / u64::MAX as f64) as f32
    }
}
