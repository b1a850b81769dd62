//! Falling-tile game controller: state machine, frame ticker, high score.

use super::logic::{self, StepOutcome, TapOutcome};
use super::ticker::{FrameTicker, FrameToken};
use super::types::*;
use crate::games::GameMode;
use crate::scores::{load_high_score, record_high_score, HighScoreStore};
use rand::Rng;

/// One falling-tile game with its own session, scheduler, and score store.
pub struct TilesGame {
    pub mode: GameMode,
    pub config: TilesConfig,
    pub session: GameSession,
    ticker: FrameTicker,
    high_score: u64,
    store: Box<dyn HighScoreStore>,
}

impl TilesGame {
    /// Create an idle game. The high score is read once, here.
    pub fn new(mode: GameMode, config: TilesConfig, store: Box<dyn HighScoreStore>) -> Self {
        let high_score = load_high_score(&*store, mode.score_key());
        Self {
            mode,
            config: config.sanitized(),
            session: GameSession::default(),
            ticker: FrameTicker::new(),
            high_score,
            store,
        }
    }

    pub fn phase(&self) -> GamePhase {
        self.session.phase
    }

    pub fn high_score(&self) -> u64 {
        self.high_score
    }

    pub fn store(&self) -> &dyn HighScoreStore {
        &*self.store
    }

    pub fn ticker(&self) -> &FrameTicker {
        &self.ticker
    }

    /// Start (or restart) a session and arm the frame ticker.
    pub fn start_game<R: Rng>(&mut self, rng: &mut R) {
        logic::start_session(&mut self.session, &self.config, rng);
        self.ticker.start();
        log::info!("{} started", self.mode.name());
    }

    /// Leave the game-over screen.
    pub fn acknowledge(&mut self) {
        if self.session.is_game_over() {
            self.ticker.cancel();
            self.session = GameSession::default();
        }
    }

    /// Token for the next frame, if the game is running.
    pub fn request_frame(&self) -> Option<FrameToken> {
        self.ticker.request_frame()
    }

    /// Run one simulation step for a frame scheduled with `token`.
    ///
    /// Frames scheduled before the last cancel or restart are dropped.
    pub fn on_frame<R: Rng>(&mut self, token: FrameToken, dt_ms: f64, rng: &mut R) -> StepOutcome {
        if !self.ticker.accepts(token) {
            log::trace!("dropping stale frame (generation {})", self.ticker.generation());
            return StepOutcome::Idle;
        }
        let outcome = logic::simulate_step(&mut self.session, &self.config, dt_ms, rng);
        if let StepOutcome::Missed(id) = outcome {
            self.finish(GameOverReason::Missed(id));
        }
        outcome
    }

    /// Tap a specific tile.
    pub fn tap_tile(&mut self, id: TileId) -> TapOutcome {
        let outcome = logic::handle_tap(&mut self.session, &self.config, id);
        self.settle_tap(outcome)
    }

    /// Tap whichever tile a press on `lane` targets.
    pub fn tap_lane(&mut self, lane: usize) -> TapOutcome {
        let outcome = logic::handle_lane_press(&mut self.session, &self.config, lane);
        self.settle_tap(outcome)
    }

    fn settle_tap(&mut self, outcome: TapOutcome) -> TapOutcome {
        if let TapOutcome::GameOver(reason) = outcome {
            self.finish(reason);
        }
        outcome
    }

    /// End a running session early, going through the same game-over path
    /// as a miss. Does nothing unless the session is playing.
    pub fn quit(&mut self) {
        self.finish(GameOverReason::Quit);
    }

    /// Persist the high score, then stop the ticker and enter game over.
    fn finish(&mut self, reason: GameOverReason) {
        if !self.session.is_playing() {
            return;
        }
        self.high_score = record_high_score(
            &mut *self.store,
            self.mode.score_key(),
            self.high_score,
            self.session.score,
        );
        self.ticker.cancel();
        logic::end_session(&mut self.session, reason);
    }

    pub fn snapshot(&self) -> Snapshot {
        logic::snapshot(&self.session, &self.config, self.high_score)
    }

    /// Take the queued audio signals.
    pub fn drain_signals(&mut self) -> Vec<GameSignal> {
        std::mem::take(&mut self.session.signals)
    }
}
