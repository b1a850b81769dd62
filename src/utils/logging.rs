//! Logger setup.
//!
//! The terminal is owned by the game, so log records go to
//! `~/.piano-tiles/piano-tiles.log` instead of stderr. The filter comes from
//! `RUST_LOG` and defaults to `info`.

use super::persistence::save_path;
use std::fs::OpenOptions;
use std::io;

pub const LOG_FILENAME: &str = "piano-tiles.log";

/// Install the global logger. Call once, before the terminal is taken over.
pub fn init() -> io::Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(save_path(LOG_FILENAME)?)?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .format_timestamp_millis()
        .try_init()
        .map_err(|e| io::Error::new(io::ErrorKind::AlreadyExists, e))
}
