//! Top-level application state shared by the input handler, the renderer,
//! and the main loop.

use crate::games::simon::SimonGame;
use crate::games::tiles::TilesGame;
use crate::games::{ActiveGame, GameMode, GameSignal};
use crate::scores::{load_high_score, HighScoreStore};
use crate::settings::Settings;
use rand::Rng;

/// Which screen is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Menu,
    Game,
}

/// Application state. `S` is cloned into every game that is started so
/// each game owns its store handle.
pub struct App<S: HighScoreStore + Clone + 'static> {
    pub settings: Settings,
    pub screen: Screen,
    pub menu_index: usize,
    pub game: Option<ActiveGame>,
    pub should_quit: bool,
    store: S,
    /// Best score per mode, in `GameMode::ALL` order.
    bests: [u64; GameMode::ALL.len()],
    /// Signals emitted by a game while it was being closed.
    pending_signals: Vec<GameSignal>,
}

impl<S: HighScoreStore + Clone + 'static> App<S> {
    pub fn new(settings: Settings, store: S) -> Self {
        let bests = GameMode::ALL.map(|mode| load_high_score(&store, mode.score_key()));
        Self {
            settings,
            screen: Screen::Menu,
            menu_index: 0,
            game: None,
            should_quit: false,
            store,
            bests,
            pending_signals: Vec::new(),
        }
    }

    pub fn selected_mode(&self) -> GameMode {
        GameMode::from_index(self.menu_index)
    }

    /// Best score for `mode` as of the last time a game was closed.
    pub fn high_score(&self, mode: GameMode) -> u64 {
        self.bests[mode.index()]
    }

    /// Cached best scores in menu order.
    pub fn bests(&self) -> &[u64] {
        &self.bests
    }

    pub fn menu_up(&mut self) {
        self.menu_index = self.menu_index.saturating_sub(1);
    }

    pub fn menu_down(&mut self) {
        if self.menu_index + 1 < GameMode::ALL.len() {
            self.menu_index += 1;
        }
    }

    /// Open `mode` on the game screen in its idle state.
    pub fn open_mode(&mut self, mode: GameMode) {
        let store = Box::new(self.store.clone());
        let game = match mode {
            GameMode::Classic | GameMode::Rush => ActiveGame::Tiles(TilesGame::new(
                mode,
                self.settings.tiles_config(mode),
                store,
            )),
            GameMode::Simon => ActiveGame::Simon(SimonGame::new(self.settings.simon.clone(), store)),
        };
        self.menu_index = mode.index();
        self.game = Some(game);
        self.screen = Screen::Game;
        log::debug!("opened {}", mode.name());
    }

    /// Close the current game and go back to the menu. A running game is
    /// ended first so its score is saved and its ticker cancelled.
    pub fn back_to_menu(&mut self) {
        if let Some(mut game) = self.game.take() {
            game.quit();
            self.pending_signals.extend(game.drain_signals());
            let slot = &mut self.bests[game.mode().index()];
            *slot = (*slot).max(game.high_score());
            log::debug!("closed {}", game.mode().name());
        }
        self.screen = Screen::Menu;
    }

    /// Start (or restart) the open game.
    pub fn start_game<R: Rng>(&mut self, rng: &mut R) {
        match self.game.as_mut() {
            Some(ActiveGame::Tiles(game)) => game.start_game(rng),
            Some(ActiveGame::Simon(game)) => game.start_game(rng),
            None => {}
        }
    }

    /// Advance the open game by one frame of `dt_ms` milliseconds.
    pub fn tick<R: Rng>(&mut self, dt_ms: f64, rng: &mut R) {
        match self.game.as_mut() {
            Some(ActiveGame::Tiles(game)) => {
                if let Some(token) = game.request_frame() {
                    game.on_frame(token, dt_ms, rng);
                }
            }
            Some(ActiveGame::Simon(game)) => game.tick(dt_ms),
            None => {}
        }
    }

    pub fn drain_signals(&mut self) -> Vec<GameSignal> {
        let mut signals = std::mem::take(&mut self.pending_signals);
        if let Some(game) = self.game.as_mut() {
            signals.extend(game.drain_signals());
        }
        signals
    }
}
