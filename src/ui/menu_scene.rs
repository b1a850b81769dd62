//! Mode selection menu.

use super::game_common::format_score;
use crate::games::GameMode;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap},
    Frame,
};

/// Render the menu. `bests` holds the high score of each entry in
/// `GameMode::ALL`, in the same order.
pub fn render_menu(frame: &mut Frame, area: Rect, selected: usize, bests: &[u64]) {
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(" Piano Tiles ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::White));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(GameMode::ALL.len() as u16 + 1),
            Constraint::Min(2),
            Constraint::Length(1),
        ])
        .split(inner);

    let header = Paragraph::new(Line::from(Span::styled(
        "Choose a mode",
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Center);
    frame.render_widget(header, chunks[0]);

    let items: Vec<ListItem> = GameMode::ALL
        .iter()
        .enumerate()
        .map(|(i, mode)| {
            let prefix = if i == selected { "> " } else { "  " };
            let style = if i == selected {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            let best = bests.get(i).copied().unwrap_or(0);
            ListItem::new(Line::from(vec![
                Span::styled(format!("{}{:<10}", prefix, mode.name()), style),
                Span::styled(
                    format!("best {}", format_score(best)),
                    Style::default().fg(Color::DarkGray),
                ),
            ]))
        })
        .collect();
    frame.render_widget(List::new(items), chunks[1]);

    let description = Paragraph::new(GameMode::from_index(selected).description())
        .style(Style::default().fg(Color::Gray))
        .wrap(Wrap { trim: true });
    frame.render_widget(description, chunks[2]);

    let help = Paragraph::new("[↑/↓] Navigate  [Enter] Play  [q/Esc] Quit")
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(help, chunks[3]);
}
