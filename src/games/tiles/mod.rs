//! Falling-tile modes (Classic and Rush).
//!
//! Tiles fall through a fixed number of lanes and must each be tapped before
//! they cross the bottom edge. Every survived frame and every tap adds to
//! the score, and the fall speed rises with the score.

pub mod game;
pub mod logic;
pub mod ticker;
pub mod types;

pub use game::TilesGame;
pub use logic::{compute_fall_speed, StepOutcome, TapOutcome};
pub use ticker::{FrameTicker, FrameToken};
pub use types::*;
