//! Spatial hash broad phase
//!
//! Buckets bodies into fixed-size square cells by their bounding box.
//! Candidate pairs are bodies sharing a cell, deduplicated by the
//! (min id, max id) key because one body may span several cells.
//! The grid is rebuilt from scratch every step; there is no incremental update.

use std::collections::{HashMap, HashSet};

use crate::domain::{Body, BodyId};

/// Bodies spanning more cells than this go to the oversized list instead
pub const MAX_CELLS_PER_BODY: i64 = 4096;

#[derive(Clone, Copy, Debug)]
struct GridEntry {
    index: usize,
    id: BodyId,
    /// Dynamic and awake
    active: bool,
}

/// A pair of indices into the body slice passed to `rebuild`
///
/// `a` is always the body with the smaller id.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CandidatePair {
    pub a: usize,
    pub b: usize,
}

pub struct SpatialHashGrid {
    cell_size: f32,
    inv_cell_size: f32,
    cells: HashMap<(i32, i32), Vec<GridEntry>>,
    /// Bodies too large (or with non-finite bounds) to bucket
    oversized: Vec<GridEntry>,
    /// Entry per body in the last rebuild
    entries: Vec<GridEntry>,
}

impl SpatialHashGrid {
    pub fn new(cell_size: f32) -> Self {
        let cell_size = cell_size.max(1e-3);
        Self {
            cell_size,
            inv_cell_size: 1.0 / cell_size,
            cells: HashMap::new(),
            oversized: Vec::new(),
            entries: Vec::new(),
        }
    }

    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// Change the cell size; takes effect on the next rebuild
    pub fn set_cell_size(&mut self, cell_size: f32) {
        let cell_size = cell_size.max(1e-3);
        self.cell_size = cell_size;
        self.inv_cell_size = 1.0 / cell_size;
    }

    /// Integer cell coordinate containing a world coordinate
    #[inline]
    fn cell_coord(&self, v: f32) -> i32 {
        (v * self.inv_cell_size).floor() as i32
    }

    /// Number of occupied cells after the last rebuild
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Clear and repopulate from the given bodies
    pub fn rebuild(&mut self, bodies: &[Body]) {
        self.cells.clear();
        self.oversized.clear();
        self.entries.clear();
        self.entries.reserve(bodies.len());

        for (index, body) in bodies.iter().enumerate() {
            let entry = GridEntry {
                index,
                id: body.id,
                active: body.is_active(),
            };
            self.entries.push(entry);

            let bb = body.aabb();
            let finite = bb.min.x.is_finite()
                && bb.min.y.is_finite()
                && bb.max.x.is_finite()
                && bb.max.y.is_finite();
            if !finite {
                self.oversized.push(entry);
                continue;
            }

            let x0 = self.cell_coord(bb.min.x);
            let y0 = self.cell_coord(bb.min.y);
            let x1 = self.cell_coord(bb.max.x);
            let y1 = self.cell_coord(bb.max.y);

            let span = (x1 as i64 - x0 as i64 + 1) * (y1 as i64 - y0 as i64 + 1);
            if span > MAX_CELLS_PER_BODY {
                self.oversized.push(entry);
                continue;
            }

            for cy in y0..=y1 {
                for cx in x0..=x1 {
                    self.cells.entry((cx, cy)).or_default().push(entry);
                }
            }
        }
    }

    /// All distinct same-cell pairs, sorted by id key.
    ///
    /// Pairs where neither body is dynamic-and-awake (e.g. both static) are skipped.
    pub fn candidate_pairs(&self) -> Vec<CandidatePair> {
        let mut seen: HashSet<(BodyId, BodyId)> = HashSet::new();
        let mut keyed: Vec<((BodyId, BodyId), CandidatePair)> = Vec::new();

        let mut push = |a: &GridEntry, b: &GridEntry| {
            if a.index == b.index || !(a.active || b.active) {
                return;
            }
            let (lo, hi) = if a.id <= b.id { (a, b) } else { (b, a) };
            let key = (lo.id, hi.id);
            if seen.insert(key) {
                keyed.push((key, CandidatePair { a: lo.index, b: hi.index }));
            }
        };

        for bucket in self.cells.values() {
            for i in 0..bucket.len() {
                for j in (i + 1)..bucket.len() {
                    push(&bucket[i], &bucket[j]);
                }
            }
        }

        // Oversized bodies are tested against everything
        for big in &self.oversized {
            for other in &self.entries {
                push(big, other);
            }
        }

        keyed.sort_by_key(|(key, _)| *key);
        keyed.into_iter().map(|(_, pair)| pair).collect()
    }
}

impl Default for SpatialHashGrid {
    fn default() -> Self {
        Self::new(100.0)
    }
}
