//! Simon scene: seven piano keys that light up during playback.

use super::game_common::{
    format_score, game_layout, info_line, render_game_frame, render_game_over_banner,
    render_info_panel_frame, render_status_bar,
};
use crate::games::simon::{Note, NoteColor, SimonGame, SimonPhase};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// The area holding the keyboard, for a terminal of `size`.
pub fn keyboard_area(size: Rect) -> Rect {
    game_layout(size).content
}

fn key_rect(area: Rect, note: Note) -> Rect {
    let width = area.width / Note::ALL.len() as u16;
    Rect::new(area.x + note.index() as u16 * width, area.y, width, area.height)
}

/// The key under terminal cell (`col`, `row`), if any.
pub fn key_at(area: Rect, col: u16, row: u16) -> Option<Note> {
    let width = area.width / Note::ALL.len() as u16;
    if width == 0 || col < area.x || row < area.y || row >= area.y + area.height {
        return None;
    }
    Note::from_index(((col - area.x) / width) as usize)
}

fn note_color(color: NoteColor) -> Color {
    match color {
        NoteColor::Red => Color::Red,
        NoteColor::Blue => Color::Blue,
        NoteColor::Green => Color::Green,
        NoteColor::Yellow => Color::Yellow,
        NoteColor::Purple => Color::Magenta,
        NoteColor::Orange => Color::Rgb(255, 165, 0),
        NoteColor::Pink => Color::Rgb(255, 105, 180),
    }
}

pub fn render_simon_scene(frame: &mut Frame, area: Rect, game: &SimonGame) {
    let layout = render_game_frame(frame, area, " Piano Tiles - Simon ", Color::Magenta);
    let state = &game.state;

    let lit = state.active_note.map(|(note, _)| note);
    let lit_color = state
        .highlight_color()
        .map(note_color)
        .unwrap_or(Color::Cyan);

    for note in Note::ALL {
        render_key(frame, key_rect(layout.content, note), note, lit == Some(note), lit_color);
    }

    let (status, color) = match state.phase {
        SimonPhase::Idle => ("Ready", Color::Yellow),
        SimonPhase::Showing => ("Watch...", Color::Cyan),
        SimonPhase::Repeating => ("Your turn", Color::Green),
        SimonPhase::GameOver => ("Game over", Color::Red),
    };
    let controls: &[(&str, &str)] = match state.phase {
        SimonPhase::Idle => &[("[Enter]", "Start"), ("[Esc]", "Menu")],
        SimonPhase::GameOver => &[("[Enter]", "Continue"), ("[Esc]", "Menu")],
        _ => &[("[cdefgab/1-7]", "Play"), ("[Click]", "Press"), ("[Esc]", "Menu")],
    };
    render_status_bar(frame, layout.status_bar, status, color, controls);

    render_info_panel(frame, layout.info_panel, game);

    if state.phase == SimonPhase::GameOver {
        render_game_over_banner(
            frame,
            layout.content,
            "Wrong note",
            state.score,
            game.high_score(),
        );
    }
}

fn render_key(frame: &mut Frame, area: Rect, note: Note, lit: bool, lit_color: Color) {
    if area.width < 3 || area.height < 3 {
        return;
    }

    let (border, fill) = if lit {
        (Style::default().fg(lit_color), Style::default().bg(lit_color))
    } else {
        (Style::default().fg(Color::Gray), Style::default())
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border)
        .style(fill);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let label = Paragraph::new(Line::from(Span::styled(
        note.name(),
        Style::default()
            .fg(if lit { Color::Black } else { Color::White })
            .add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Center);
    let label_row = Rect::new(inner.x, inner.y + inner.height.saturating_sub(1), inner.width, 1);
    frame.render_widget(label, label_row);
}

fn render_info_panel(frame: &mut Frame, area: Rect, game: &SimonGame) {
    let inner = render_info_panel_frame(frame, area);
    let state = &game.state;

    let hearts: String = "♥".repeat(state.lives as usize);
    let progress = if state.phase == SimonPhase::Repeating {
        format!("{}/{}", state.progress, state.sequence.len())
    } else {
        "-".to_string()
    };

    let lines = vec![
        info_line("Level", state.level.to_string(), Color::White),
        info_line("Score", format_score(state.score), Color::Yellow),
        info_line("Best", format_score(game.high_score()), Color::Cyan),
        Line::from(""),
        info_line("Lives", hearts, Color::Red),
        info_line("Notes", progress, Color::Green),
    ];

    frame.render_widget(Paragraph::new(lines), inner);
}
