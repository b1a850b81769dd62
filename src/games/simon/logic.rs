//! Game logic for Simon mode: rounds, playback timing, note presses.

use super::types::*;
use crate::games::GameSignal;
use rand::Rng;

/// Result of pressing a note.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PressOutcome {
    /// Not accepting input (idle, playing back, or over).
    Ignored,
    Correct,
    /// The whole sequence was repeated; `points` were added to the score.
    SequenceComplete { points: u64 },
    /// Wrong note; the sequence will be replayed.
    Wrong { lives_left: u32 },
    /// Wrong note with no lives left.
    GameOver,
}

/// Reset `state` for a new game and start the first round.
pub fn start_game<R: Rng>(
    state: &mut SimonState,
    config: &SimonConfig,
    signals: &mut Vec<GameSignal>,
    rng: &mut R,
) {
    *state = SimonState {
        level: 1,
        lives: config.starting_lives,
        ..Default::default()
    };
    signals.push(GameSignal::PlayingChanged(true));
    start_round(state, config, signals, rng);
}

/// Roll a fresh sequence for the current level and play it.
pub fn start_round<R: Rng>(
    state: &mut SimonState,
    config: &SimonConfig,
    signals: &mut Vec<GameSignal>,
    rng: &mut R,
) {
    let length = config.sequence_length(state.level);
    state.sequence = (0..length).map(|_| SequenceStep::random(rng)).collect();
    log::debug!("simon level {}: {} notes", state.level, length);
    begin_playback(state, config, signals);
}

/// Replay the current sequence from the start.
pub fn begin_playback(state: &mut SimonState, config: &SimonConfig, signals: &mut Vec<GameSignal>) {
    state.phase = SimonPhase::Showing;
    state.progress = 0;
    state.playback = Playback::default();
    state.active_note = None;
    advance_playback(state, config, signals);
}

/// Light the note for every playback step that has come due. Switches to
/// `Repeating` once the final interval has elapsed.
fn advance_playback(state: &mut SimonState, config: &SimonConfig, signals: &mut Vec<GameSignal>) {
    let interval = config.interval_ms(state.level);
    while state.phase == SimonPhase::Showing {
        let due = state.playback.index as f64 * interval;
        if state.playback.elapsed_ms < due {
            break;
        }
        match state.sequence.get(state.playback.index) {
            Some(step) => {
                let note = step.note;
                light(state, note, signals);
                state.playback.index += 1;
            }
            None => {
                state.phase = SimonPhase::Repeating;
                state.active_note = None;
            }
        }
    }
}

fn light(state: &mut SimonState, note: Note, signals: &mut Vec<GameSignal>) {
    state.active_note = Some((note, NOTE_HIGHLIGHT_MS));
    signals.push(GameSignal::Tap { lane: note.index() });
}

/// Advance timers by `dt_ms`: the note highlight and sequence playback.
pub fn tick(state: &mut SimonState, config: &SimonConfig, dt_ms: f64, signals: &mut Vec<GameSignal>) {
    if let Some((note, remaining)) = state.active_note {
        let remaining = remaining - dt_ms;
        state.active_note = (remaining > 0.0).then_some((note, remaining));
    }
    if state.phase == SimonPhase::Showing {
        state.playback.elapsed_ms += dt_ms.max(0.0);
        advance_playback(state, config, signals);
    }
}

/// Stop a running game, keeping its score and board. Returns false if the
/// game was not running.
pub fn end_game(state: &mut SimonState, signals: &mut Vec<GameSignal>) -> bool {
    if !state.is_playing() {
        return false;
    }
    state.phase = SimonPhase::GameOver;
    signals.push(GameSignal::PlayingChanged(false));
    log::debug!("simon over at level {} with score {}", state.level, state.score);
    true
}

/// Press `note` while repeating the sequence.
pub fn press_note<R: Rng>(
    state: &mut SimonState,
    config: &SimonConfig,
    note: Note,
    signals: &mut Vec<GameSignal>,
    rng: &mut R,
) -> PressOutcome {
    if state.phase != SimonPhase::Repeating {
        return PressOutcome::Ignored;
    }

    light(state, note, signals);

    if state.expected_note() != Some(note) {
        state.lives = state.lives.saturating_sub(1);
        if state.lives == 0 {
            end_game(state, signals);
            return PressOutcome::GameOver;
        }
        begin_playback(state, config, signals);
        return PressOutcome::Wrong {
            lives_left: state.lives,
        };
    }

    state.progress += 1;
    if state.progress < state.sequence.len() {
        return PressOutcome::Correct;
    }

    let points = state.level as u64 * 10;
    state.score += points;
    state.level += 1;
    start_round(state, config, signals, rng);
    PressOutcome::SequenceComplete { points }
}
