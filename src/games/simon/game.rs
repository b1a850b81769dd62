//! Simon game controller: owns the state, signals, and high score.

use super::logic::{self, PressOutcome};
use super::types::*;
use crate::games::{GameMode, GameSignal};
use crate::scores::{load_high_score, record_high_score, HighScoreStore};
use rand::Rng;

pub struct SimonGame {
    pub config: SimonConfig,
    pub state: SimonState,
    signals: Vec<GameSignal>,
    high_score: u64,
    store: Box<dyn HighScoreStore>,
}

impl SimonGame {
    pub fn new(config: SimonConfig, store: Box<dyn HighScoreStore>) -> Self {
        let high_score = load_high_score(&*store, GameMode::Simon.score_key());
        Self {
            config: config.sanitized(),
            state: SimonState::default(),
            signals: Vec::new(),
            high_score,
            store,
        }
    }

    pub fn high_score(&self) -> u64 {
        self.high_score
    }

    pub fn store(&self) -> &dyn HighScoreStore {
        &*self.store
    }

    pub fn start_game<R: Rng>(&mut self, rng: &mut R) {
        logic::start_game(&mut self.state, &self.config, &mut self.signals, rng);
        log::info!("{} started", GameMode::Simon.name());
    }

    /// Leave the game-over screen.
    pub fn acknowledge(&mut self) {
        if self.state.phase == SimonPhase::GameOver {
            self.state = SimonState::default();
        }
    }

    pub fn tick(&mut self, dt_ms: f64) {
        logic::tick(&mut self.state, &self.config, dt_ms, &mut self.signals);
    }

    /// Press a note. The high score is saved as soon as it is beaten.
    pub fn press_note<R: Rng>(&mut self, note: Note, rng: &mut R) -> PressOutcome {
        let outcome = logic::press_note(&mut self.state, &self.config, note, &mut self.signals, rng);
        if let PressOutcome::SequenceComplete { .. } = outcome {
            self.high_score = record_high_score(
                &mut *self.store,
                GameMode::Simon.score_key(),
                self.high_score,
                self.state.score,
            );
        }
        outcome
    }

    /// Leave a running game, saving the score reached so far.
    pub fn quit(&mut self) {
        if logic::end_game(&mut self.state, &mut self.signals) {
            self.high_score = record_high_score(
                &mut *self.store,
                GameMode::Simon.score_key(),
                self.high_score,
                self.state.score,
            );
        }
    }

    /// Take the queued audio signals.
    pub fn drain_signals(&mut self) -> Vec<GameSignal> {
        std::mem::take(&mut self.signals)
    }
}
