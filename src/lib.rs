//! Hexbeat - a beat-quantized rotating-lane arcade game core
//!
//! Core modules:
//! - `patterns`: Pattern library loading (obstacle templates from text)
//! - `geometry`: Per-pixel lane/distance/band precomputation
//! - `sim`: Deterministic simulation (level generation, game state)
//! - `render`: Per-pixel color projection for presentation
//!
//! The crate is presentation-agnostic: windowing, input polling, fonts and
//! audio live in the embedding application, which drives the core through
//! `GameState::apply` and reads frames back via `render::color_at`.

pub mod geometry;
pub mod patterns;
pub mod render;
pub mod sim;

pub use geometry::GeometryCache;
pub use patterns::{CellKind, ParseError, Pattern, PatternLibrary};
pub use sim::{Action, GameState, LevelTimeline};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Radius of the solid inner disc at the arena center (pixels)
    pub const INNER_SPREAD: u32 = 32;
    /// Thickness of the ring between the inner disc and the first band
    pub const BORDER_SIZE: u32 = 16;
    /// Inner disc plus border: the radius where band 0 begins
    pub const INNER_BORDER: u32 = INNER_SPREAD + BORDER_SIZE;
    /// Radial width of one obstacle band
    pub const BAND_SIZE: u32 = 32;
    /// Visual thickness of a lone obstacle stripe within its band
    pub const BAND_THICKNESS: u32 = 16;
    /// Number of visible bands from the border to the canvas edge
    pub const NBANDS: u32 = 7;

    /// Side length of the square canvas, sized so the outermost band
    /// touches the edge
    pub const CANVAS_SIZE: u32 = 2 * INNER_SPREAD + 2 * BORDER_SIZE + 2 * NBANDS * BAND_SIZE;

    /// Beats at the start of every level guaranteed free of obstacles
    pub const INTRO_LEN: usize = 4;
    /// Total beats in a generated level timeline
    pub const LEVEL_LEN: usize = 300;

    /// Lane count bounds accepted from a pattern file
    pub const LANES_MIN: usize = 3;
    pub const LANES_MAX: usize = 16;

    /// Band reveal sweep speed (pixels per second)
    pub const ANIM_PER_SEC: f32 = 240.0;
}

/// Outward unit direction of a lane's angular bisector.
///
/// Lane 0 points straight up (screen coordinates, y down), lanes advance
/// clockwise.
#[inline]
pub fn lane_direction(lane: usize, lanes: usize) -> Vec2 {
    let rho = lane as f32 * std::f32::consts::TAU / lanes as f32;
    Vec2::new(-rho.sin(), -rho.cos())
}
