//! Keyboard and mouse dispatch.
//!
//! Each screen gets its own handler; `handle_key` picks one by priority:
//! quit shortcuts first, then the active screen.

use crate::app::{App, Screen};
use crate::games::simon::{Note, SimonGame, SimonPhase};
use crate::games::tiles::{GamePhase, TilesGame};
use crate::games::ActiveGame;
use crate::scores::HighScoreStore;
use crate::ui::{simon_scene, tiles_scene};
use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use rand::Rng;
use ratatui::layout::Rect;

/// Result of handling an input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputResult {
    Continue,
    Quit,
}

/// Lane index for a key on a board of `lane_count` lanes. `d f j k` cover a
/// four-lane board; digits `1`-`9` work for any lane count.
pub fn lane_for_key(code: KeyCode, lane_count: usize) -> Option<usize> {
    let lane = match code {
        KeyCode::Char(c @ '1'..='9') => c as usize - '1' as usize,
        KeyCode::Char(c) if lane_count == tiles_scene::LANE_KEYS.len() => {
            tiles_scene::LANE_KEYS
                .iter()
                .position(|k| *k == c.to_ascii_lowercase())?
        }
        _ => return None,
    };
    (lane < lane_count).then_some(lane)
}

/// Note for a key: the note letter itself, or `1`-`7` left to right.
pub fn note_for_key(code: KeyCode) -> Option<Note> {
    match code {
        KeyCode::Char(c @ '1'..='7') => Note::from_index(c as usize - '1' as usize),
        KeyCode::Char(c) => Note::ALL
            .into_iter()
            .find(|n| n.name().eq_ignore_ascii_case(&c.to_string())),
        _ => None,
    }
}

pub fn handle_key<S: HighScoreStore + Clone + 'static, R: Rng>(
    key: KeyEvent,
    app: &mut App<S>,
    rng: &mut R,
) -> InputResult {
    // Ignore key release/repeat events on platforms that report them
    if key.kind != KeyEventKind::Press {
        return InputResult::Continue;
    }

    // 1. Ctrl+C always quits
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return InputResult::Quit;
    }

    match app.screen {
        Screen::Menu => handle_menu(key, app),
        Screen::Game => {
            if key.code == KeyCode::Esc {
                app.back_to_menu();
                return InputResult::Continue;
            }
            match app.game.as_mut() {
                Some(ActiveGame::Tiles(game)) => handle_tiles(key.code, game, rng),
                Some(ActiveGame::Simon(game)) => handle_simon(key.code, game, rng),
                None => {}
            }
            InputResult::Continue
        }
    }
}

fn handle_menu<S: HighScoreStore + Clone + 'static>(key: KeyEvent, app: &mut App<S>) -> InputResult {
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => app.menu_up(),
        KeyCode::Down | KeyCode::Char('j') => app.menu_down(),
        KeyCode::Enter | KeyCode::Char(' ') => app.open_mode(app.selected_mode()),
        KeyCode::Char('q') | KeyCode::Esc => return InputResult::Quit,
        _ => {}
    }
    InputResult::Continue
}

fn handle_tiles<R: Rng>(code: KeyCode, game: &mut TilesGame, rng: &mut R) {
    match game.phase() {
        GamePhase::Idle => {
            if matches!(code, KeyCode::Enter | KeyCode::Char(' ')) {
                game.start_game(rng);
            }
        }
        GamePhase::GameOver => {
            if matches!(code, KeyCode::Enter | KeyCode::Char(' ')) {
                game.acknowledge();
            }
        }
        GamePhase::Playing => {
            if let Some(lane) = lane_for_key(code, game.config.lane_count) {
                game.tap_lane(lane);
            }
        }
    }
}

fn handle_simon<R: Rng>(code: KeyCode, game: &mut SimonGame, rng: &mut R) {
    match game.state.phase {
        SimonPhase::Idle => {
            if matches!(code, KeyCode::Enter | KeyCode::Char(' ')) {
                game.start_game(rng);
            }
        }
        SimonPhase::GameOver => {
            if matches!(code, KeyCode::Enter | KeyCode::Char(' ')) {
                game.acknowledge();
            }
        }
        SimonPhase::Showing | SimonPhase::Repeating => {
            if let Some(note) = note_for_key(code) {
                game.press_note(note, rng);
            }
        }
    }
}

/// Left clicks tap the tile or key under the cursor. `size` is the terminal
/// area the last frame was drawn into.
pub fn handle_mouse<S: HighScoreStore + Clone + 'static, R: Rng>(
    event: MouseEvent,
    app: &mut App<S>,
    size: Rect,
    rng: &mut R,
) {
    if event.kind != MouseEventKind::Down(MouseButton::Left) || app.screen != Screen::Game {
        return;
    }

    match app.game.as_mut() {
        Some(ActiveGame::Tiles(game)) => {
            let area = tiles_scene::play_area(size);
            if let Some(id) = tiles_scene::tile_at(area, &game.snapshot(), event.column, event.row) {
                game.tap_tile(id);
            }
        }
        Some(ActiveGame::Simon(game)) => {
            let area = simon_scene::keyboard_area(size);
            if let Some(note) = simon_scene::key_at(area, event.column, event.row) {
                game.press_note(note, rng);
            }
        }
        None => {}
    }
}
