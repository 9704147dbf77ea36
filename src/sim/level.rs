//! Level timeline generation
//!
//! Composes randomly chosen, rotated and mirrored pattern templates into a
//! fixed-length grid of obstacle cells, one row per beat.

use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::{INTRO_LEN, LEVEL_LEN};
use crate::patterns::{CellKind, PatternLibrary};

/// The generated obstacle grid: `lanes x LEVEL_LEN` cells, immutable once
/// generated. Lookups outside the grid are defined empty, so the state
/// machine can scroll past the end indefinitely.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelTimeline {
    lanes: usize,
    cells: Vec<CellKind>,
}

impl LevelTimeline {
    /// Generate a fresh timeline from the pattern library.
    ///
    /// The first `INTRO_LEN` beats stay empty as a safe start window. Each
    /// iteration picks a uniform pattern, start lane and rotation direction,
    /// then stamps the pattern one row per beat, mapping row position `k` to
    /// lane `(lane0 + dir*k) mod lanes`. Selection stops once the next
    /// pattern would not fully fit before `LEVEL_LEN`, leaving an empty
    /// finish gap at the tail.
    pub fn generate(library: &PatternLibrary, rng: &mut Pcg32) -> Self {
        let lanes = library.lanes;
        let mut cells = vec![CellKind::Empty; lanes * LEVEL_LEN];

        let mut beat = INTRO_LEN;
        loop {
            let pattern = &library.patterns[rng.random_range(0..library.patterns.len())];
            let lane0 = rng.random_range(0..lanes);
            let dir: isize = if rng.random_bool(0.5) { 1 } else { -1 };

            if beat + pattern.beats() >= LEVEL_LEN {
                break;
            }

            for row in &pattern.rows {
                for (k, &cell) in row.iter().enumerate() {
                    if cell != CellKind::Empty {
                        let lane = (lane0 as isize + dir * k as isize)
                            .rem_euclid(lanes as isize) as usize;
                        cells[lane * LEVEL_LEN + beat] = cell;
                    }
                }
                beat += 1;
            }
        }

        let timeline = Self { lanes, cells };
        log::info!(
            "generated level: {} lanes, last obstacle at beat {:?}",
            lanes,
            timeline.last_obstacle_beat()
        );
        timeline
    }

    pub fn lanes(&self) -> usize {
        self.lanes
    }

    /// Cell at (lane, beat). Beats outside `[0, LEVEL_LEN)` are empty.
    #[inline]
    pub fn cell(&self, lane: usize, beat: i64) -> CellKind {
        if beat < 0 || beat >= LEVEL_LEN as i64 {
            return CellKind::Empty;
        }
        self.cells[lane * LEVEL_LEN + beat as usize]
    }

    /// Last beat holding any obstacle, or `None` for an all-empty level
    pub fn last_obstacle_beat(&self) -> Option<usize> {
        (0..LEVEL_LEN).rev().find(|&beat| {
            (0..self.lanes).any(|lane| self.cells[lane * LEVEL_LEN + beat] != CellKind::Empty)
        })
    }
}

#[cfg(test)]
impl LevelTimeline {
    /// All-empty timeline for hand-built test scenarios
    pub fn empty(lanes: usize) -> Self {
        Self {
            lanes,
            cells: vec![CellKind::Empty; lanes * LEVEL_LEN],
        }
    }

    pub fn set(&mut self, lane: usize, beat: usize, kind: CellKind) {
        self.cells[lane * LEVEL_LEN + beat] = kind;
    }
}
