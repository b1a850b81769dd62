//! Piano Tiles - terminal rhythm game library.
//!
//! Exposes the game logic, persistence, and terminal front end for the
//! binary and for integration tests.

pub mod app;
pub mod games;
pub mod input;
pub mod scores;
pub mod settings;
pub mod ui;
pub mod utils;
