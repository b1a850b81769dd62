//! Simon mode: watch a sequence of notes, then play it back.
//!
//! Each completed sequence is worth ten points per level and makes the next
//! one a note longer and faster. A wrong note costs a life and replays the
//! same sequence.

pub mod game;
pub mod logic;
pub mod types;

pub use game::SimonGame;
pub use logic::PressOutcome;
pub use types::*;
