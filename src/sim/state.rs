//! Game state and the discrete advance rule
//!
//! The whole run is a value object: restart builds a fresh one, player
//! actions are the only mutation path, and everything is serializable.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::level::LevelTimeline;
use crate::patterns::{CellKind, PatternLibrary};

/// Discrete player actions. Every action answers exactly one beat: it
/// triggers a single timeline advance and one collision check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    RotateCw,
    RotateCcw,
    Hold,
    Jump,
}

/// Collision rule for a single cell.
///
/// Jumping over nothing is itself fatal: every beat must be answered with
/// the action matching what is immediately ahead.
#[inline]
pub fn collides(cell: CellKind, hurdling: bool) -> bool {
    match cell {
        CellKind::Wall => true,
        CellKind::Hurdle => !hurdling,
        CellKind::Empty => hurdling,
    }
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    timeline: LevelTimeline,
    lanes: usize,
    scroll_offset: usize,
    player_lane: usize,
    alive: bool,
    hurdling: bool,
}

impl GameState {
    /// Start a fresh run: generate a new timeline from the library and
    /// reset the player to lane 0 at the start of the intro window.
    pub fn new(library: &PatternLibrary, seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let timeline = LevelTimeline::generate(library, &mut rng);
        log::info!("restart: seed {seed}, {} lanes", library.lanes);
        Self {
            seed,
            lanes: library.lanes,
            timeline,
            scroll_offset: 0,
            player_lane: 0,
            alive: true,
            hurdling: false,
        }
    }

    /// Process one player action. No-op once dead; only a restart
    /// (constructing a fresh state) recovers.
    pub fn apply(&mut self, action: Action) {
        if !self.alive {
            return;
        }
        match action {
            Action::RotateCw => {
                self.player_lane = (self.player_lane + self.lanes - 1) % self.lanes;
            }
            Action::RotateCcw => {
                self.player_lane = (self.player_lane + 1) % self.lanes;
            }
            Action::Hold => {}
            Action::Jump => self.hurdling = true,
        }
        self.advance();
    }

    fn advance(&mut self) {
        self.scroll_offset += 1;
        if collides(self.incoming(self.player_lane, 0), self.hurdling) {
            self.alive = false;
            log::info!(
                "player died at beat {} in lane {}",
                self.scroll_offset,
                self.player_lane
            );
        }
        // Jump posture lasts exactly one beat
        self.hurdling = false;
    }

    /// Cell currently scrolling through band `band` of `lane`. Band 0 is
    /// the player's ring; bands past the end of the timeline are empty.
    #[inline]
    pub fn incoming(&self, lane: usize, band: i64) -> CellKind {
        self.timeline.cell(lane, band + self.scroll_offset as i64)
    }

    pub fn lanes(&self) -> usize {
        self.lanes
    }

    pub fn scroll_offset(&self) -> usize {
        self.scroll_offset
    }

    pub fn player_lane(&self) -> usize {
        self.player_lane
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn is_hurdling(&self) -> bool {
        self.hurdling
    }

    /// True once no remaining beat can collide: the player has scrolled
    /// past the last obstacle and may advance freely forever. There is no
    /// separate terminal state for this; the presentation layer decides
    /// what to show.
    pub fn cleared(&self) -> bool {
        match self.timeline.last_obstacle_beat() {
            Some(last) => self.scroll_offset > last,
            None => true,
        }
    }
}

#[cfg(test)]
impl GameState {
    /// Build a state around a hand-crafted timeline
    pub fn with_timeline(timeline: LevelTimeline) -> Self {
        let lanes = timeline.lanes();
        Self {
            seed: 0,
            timeline,
            lanes,
            scroll_offset: 0,
            player_lane: 0,
            alive: true,
            hurdling: false,
        }
    }
}
