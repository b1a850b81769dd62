//! User settings stored in `~/.piano-tiles/settings.json`.
//!
//! Every field has a default, so a partial or hand-edited file still loads.
//! A missing or unparseable file yields [`Settings::default`].

use crate::games::simon::SimonConfig;
use crate::games::tiles::TilesConfig;
use crate::games::GameMode;
use crate::utils::persistence::{
    load_json_file_or_default, load_json_or_default, save_json, save_json_file, save_path,
};
use serde::{Deserialize, Serialize};
use std::io;
use std::path::Path;

pub const SETTINGS_FILENAME: &str = "settings.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub classic: TilesConfig,
    pub rush: TilesConfig,
    pub simon: SimonConfig,
    /// Ring the terminal bell for every note.
    pub bell_on_tap: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            classic: TilesConfig::classic(),
            rush: TilesConfig::rush(),
            simon: SimonConfig::default(),
            bell_on_tap: false,
        }
    }
}

impl Settings {
    /// Load from the user's data directory, writing the defaults out on
    /// first run so there is a file to edit.
    pub fn load() -> io::Result<Self> {
        if !save_path(SETTINGS_FILENAME)?.exists() {
            let settings = Self::default();
            save_json(SETTINGS_FILENAME, &settings)?;
            return Ok(settings);
        }
        Ok(load_json_or_default::<Self>(SETTINGS_FILENAME).sanitized())
    }

    pub fn load_from(path: &Path) -> Self {
        load_json_file_or_default::<Self>(path).sanitized()
    }

    pub fn save_to(&self, path: &Path) -> io::Result<()> {
        save_json_file(path, self)
    }

    pub fn sanitized(self) -> Self {
        Self {
            classic: self.classic.sanitized(),
            rush: self.rush.sanitized(),
            simon: self.simon.sanitized(),
            bell_on_tap: self.bell_on_tap,
        }
    }

    /// Tuning for a falling-tile mode. Simon has no tile config and gets
    /// the Classic one.
    pub fn tiles_config(&self, mode: GameMode) -> TilesConfig {
        match mode {
            GameMode::Rush => self.rush.clone(),
            GameMode::Classic | GameMode::Simon => self.classic.clone(),
        }
    }
}
