//! Falling-tile scene (Classic and Rush).
//!
//! Tiles are drawn into a cell buffer the size of the play area and then
//! stamped row by row. The play field is `VISIBLE_HEIGHT` logical rows tall
//! and is scaled to whatever height the terminal gives us.

use super::game_common::{
    format_score, game_layout, info_line, render_game_frame, render_game_over_banner,
    render_info_panel_frame, render_status_bar,
};
use crate::games::tiles::{
    GameOverReason, Snapshot, TileId, TilesGame, TileView, TILE_HEIGHT, VISIBLE_HEIGHT,
};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

const TILE_CHAR: char = '█';
const TAPPED_CHAR: char = '░';
const LANE_DIVIDER: char = '│';

/// Keyboard keys for the first four lanes, left to right.
pub const LANE_KEYS: [char; 4] = ['d', 'f', 'j', 'k'];

/// The area tiles fall through, for a terminal of `size`.
pub fn play_area(size: Rect) -> Rect {
    game_layout(size).content
}

/// Width in cells of one lane. Leftover columns on the right are unused.
fn lane_width(area: Rect, lane_count: usize) -> u16 {
    if lane_count == 0 {
        return 0;
    }
    area.width / lane_count as u16
}

/// Terminal row range `[top, bottom)` covered by a tile whose top is at `y`,
/// clipped to the area.
fn tile_rows(area: Rect, y: f64) -> (u16, u16) {
    let scale = area.height as f64 / VISIBLE_HEIGHT;
    let height = area.height as f64;
    let top = (y * scale).round().clamp(0.0, height);
    let bottom = ((y + TILE_HEIGHT) * scale).round().min(height);
    (top as u16, bottom.max(top) as u16)
}

/// The tile under terminal cell (`col`, `row`), if any.
pub fn tile_at(area: Rect, snapshot: &Snapshot, col: u16, row: u16) -> Option<TileId> {
    let width = lane_width(area, snapshot.lane_count);
    if width == 0
        || col < area.x
        || row < area.y
        || row >= area.y + area.height
        || col >= area.x + width * snapshot.lane_count as u16
    {
        return None;
    }

    let lane = ((col - area.x) / width) as usize;
    let local_row = row - area.y;
    snapshot
        .tiles
        .iter()
        .filter(|t| t.lane == lane)
        .find(|t| {
            let (top, bottom) = tile_rows(area, t.y);
            local_row >= top && local_row < bottom
        })
        .map(|t| t.id)
}

pub fn render_tiles_scene(frame: &mut Frame, area: Rect, game: &TilesGame) {
    let snapshot = game.snapshot();
    let title = format!(" Piano Tiles - {} ", game.mode.name());
    let layout = render_game_frame(frame, area, &title, Color::White);

    render_play_field(frame, layout.content, &snapshot);

    if !snapshot.is_playing && !snapshot.is_game_over {
        render_start_prompt(frame, layout.content);
    }

    render_status(frame, layout.status_bar, &snapshot);
    render_info_panel(frame, layout.info_panel, game, &snapshot);

    if snapshot.is_game_over {
        let reason = game
            .session
            .game_over_reason
            .map(reason_text)
            .unwrap_or("Game over");
        render_game_over_banner(
            frame,
            layout.content,
            reason,
            snapshot.score,
            snapshot.high_score,
        );
    }
}

fn reason_text(reason: GameOverReason) -> &'static str {
    match reason {
        GameOverReason::Missed(_) => "A tile slipped past",
        GameOverReason::DoubleTap(_) => "Tapped a tile twice",
        GameOverReason::StaleTap(_) => "That tile was already gone",
        GameOverReason::WrongLane(_) => "Nothing in that lane",
        GameOverReason::Quit => "Left the game",
    }
}

#[derive(Clone, Copy)]
struct Cell {
    ch: char,
    fg: Color,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            ch: ' ',
            fg: Color::Reset,
        }
    }
}

fn render_play_field(frame: &mut Frame, area: Rect, snapshot: &Snapshot) {
    let width = lane_width(area, snapshot.lane_count);
    if width < 2 || area.height < 4 {
        return;
    }

    let mut buffer = vec![vec![Cell::default(); area.width as usize]; area.height as usize];

    // Lane dividers
    for lane in 1..snapshot.lane_count {
        let col = (lane as u16 * width) as usize;
        for row in buffer.iter_mut() {
            row[col] = Cell {
                ch: LANE_DIVIDER,
                fg: Color::DarkGray,
            };
        }
    }

    // Flash under the last tapped lane
    if let Some(active) = snapshot.active_lane {
        let start = active as u16 * width;
        let last_row = buffer.len() - 1;
        for col in start..start + width {
            buffer[last_row][col as usize] = Cell {
                ch: '▔',
                fg: Color::Cyan,
            };
        }
    }

    for tile in &snapshot.tiles {
        stamp_tile(&mut buffer, area, width, tile);
    }

    for (row_idx, row) in buffer.iter().enumerate() {
        let mut spans: Vec<Span> = Vec::new();
        let mut current_fg = Color::Reset;
        let mut current_text = String::new();

        for cell in row {
            if cell.fg != current_fg && !current_text.is_empty() {
                spans.push(Span::styled(
                    std::mem::take(&mut current_text),
                    Style::default().fg(current_fg),
                ));
            }
            current_fg = cell.fg;
            current_text.push(cell.ch);
        }
        if !current_text.is_empty() {
            spans.push(Span::styled(current_text, Style::default().fg(current_fg)));
        }

        let row_area = Rect::new(area.x, area.y + row_idx as u16, area.width, 1);
        frame.render_widget(Paragraph::new(Line::from(spans)), row_area);
    }
}

fn stamp_tile(buffer: &mut [Vec<Cell>], area: Rect, width: u16, tile: &TileView) {
    let (top, bottom) = tile_rows(area, tile.y);
    let (ch, fg) = if tile.tapped {
        (TAPPED_CHAR, Color::DarkGray)
    } else {
        (TILE_CHAR, Color::White)
    };

    // Leave the divider column alone
    let first_col = tile.lane as u16 * width + u16::from(tile.lane > 0);
    let last_col = (tile.lane as u16 + 1) * width;
    for row in top..bottom {
        for col in first_col..last_col {
            if let Some(cell) = buffer
                .get_mut(row as usize)
                .and_then(|r| r.get_mut(col as usize))
            {
                *cell = Cell { ch, fg };
            }
        }
    }
}

fn render_start_prompt(frame: &mut Frame, area: Rect) {
    if area.height < 3 {
        return;
    }
    let prompt = Paragraph::new(Line::from(Span::styled(
        "Press Enter to start",
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Center);
    let y = area.y + area.height / 2;
    frame.render_widget(prompt, Rect::new(area.x, y, area.width, 1));
}

fn render_status(frame: &mut Frame, area: Rect, snapshot: &Snapshot) {
    if snapshot.is_game_over {
        render_status_bar(
            frame,
            area,
            "Game over",
            Color::Red,
            &[("[Enter]", "Continue"), ("[Esc]", "Menu")],
        );
    } else if snapshot.is_playing {
        let keys = lane_key_hint(snapshot.lane_count);
        render_status_bar(
            frame,
            area,
            "Tap every tile!",
            Color::White,
            &[(keys.as_str(), "Lanes"), ("[Click]", "Tap"), ("[Esc]", "Menu")],
        );
    } else {
        render_status_bar(
            frame,
            area,
            "Ready",
            Color::Yellow,
            &[("[Enter]", "Start"), ("[Esc]", "Menu")],
        );
    }
}

fn lane_key_hint(lane_count: usize) -> String {
    if lane_count == LANE_KEYS.len() {
        let keys: String = LANE_KEYS.iter().collect();
        format!("[{}]", keys)
    } else {
        format!("[1-{}]", lane_count)
    }
}

fn render_info_panel(frame: &mut Frame, area: Rect, game: &TilesGame, snapshot: &Snapshot) {
    let inner = render_info_panel_frame(frame, area);

    let lines = vec![
        info_line("Mode", game.mode.name().to_string(), Color::White),
        Line::from(""),
        info_line("Score", format_score(snapshot.score), Color::Yellow),
        info_line("Best", format_score(snapshot.high_score), Color::Cyan),
        Line::from(""),
        info_line("Speed", format!("{:.2}", snapshot.fall_speed), Color::Green),
        info_line("Lanes", snapshot.lane_count.to_string(), Color::White),
    ];

    frame.render_widget(Paragraph::new(lines), inner);
}
