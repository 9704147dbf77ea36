//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Beat-quantized advancement only (one step per player action)
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod level;
pub mod state;

pub use level::LevelTimeline;
pub use state::{Action, GameState, collides};
