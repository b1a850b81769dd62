//! Game modes: Classic and Rush falling tiles, and Simon.

pub mod simon;
pub mod tiles;

pub use simon::{SimonGame, SimonPhase};
pub use tiles::{GamePhase, TilesGame};

/// Fire-and-forget notifications for the audio layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameSignal {
    /// Play a one-shot note for this lane (or key, in Simon).
    Tap { lane: usize },
    /// Start or stop the background loop.
    PlayingChanged(bool),
}

/// Selectable game modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameMode {
    Classic,
    Rush,
    Simon,
}

impl GameMode {
    pub const ALL: [GameMode; 3] = [GameMode::Classic, GameMode::Rush, GameMode::Simon];

    pub fn from_index(index: usize) -> Self {
        Self::ALL.get(index).copied().unwrap_or(GameMode::Classic)
    }

    /// Position in `ALL` and on the menu.
    pub fn index(self) -> usize {
        match self {
            Self::Classic => 0,
            Self::Rush => 1,
            Self::Simon => 2,
        }
    }

    /// Parse a `--mode` argument.
    pub fn parse(arg: &str) -> Option<Self> {
        match arg.to_ascii_lowercase().as_str() {
            "classic" => Some(GameMode::Classic),
            "rush" => Some(GameMode::Rush),
            "simon" => Some(GameMode::Simon),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Classic => "Classic",
            Self::Rush => "Rush",
            Self::Simon => "Simon",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Classic => "Tap every falling tile. Speeds up as you score.",
            Self::Rush => "Faster tiles that keep accelerating.",
            Self::Simon => "Watch the notes, then play them back.",
        }
    }

    /// Storage key for this mode's high score.
    pub fn score_key(&self) -> &'static str {
        match self {
            Self::Classic => "tilesHighScore",
            Self::Rush => "rushHighScore",
            Self::Simon => "highScore",
        }
    }
}

/// The game currently on screen. Only one runs at a time.
pub enum ActiveGame {
    Tiles(TilesGame),
    Simon(SimonGame),
}

impl ActiveGame {
    pub fn mode(&self) -> GameMode {
        match self {
            ActiveGame::Tiles(game) => game.mode,
            ActiveGame::Simon(_) => GameMode::Simon,
        }
    }

    pub fn is_game_over(&self) -> bool {
        match self {
            ActiveGame::Tiles(game) => game.phase() == GamePhase::GameOver,
            ActiveGame::Simon(game) => game.state.phase == SimonPhase::GameOver,
        }
    }

    pub fn high_score(&self) -> u64 {
        match self {
            ActiveGame::Tiles(game) => game.high_score(),
            ActiveGame::Simon(game) => game.high_score(),
        }
    }

    /// End a running game through its normal game-over path.
    pub fn quit(&mut self) {
        match self {
            ActiveGame::Tiles(game) => game.quit(),
            ActiveGame::Simon(game) => game.quit(),
        }
    }

    pub fn drain_signals(&mut self) -> Vec<GameSignal> {
        match self {
            ActiveGame::Tiles(game) => game.drain_signals(),
            ActiveGame::Simon(game) => game.drain_signals(),
        }
    }
}
