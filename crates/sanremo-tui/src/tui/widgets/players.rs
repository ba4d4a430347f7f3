// Players widget: every fantasy player with their team and total.
//
// Table: Player, Team, Total. Players appear in the order they were added;
// picks that no longer resolve to a contestant show as a placeholder.

use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table};
use ratatui::Frame;

use sanremo_core::league::LeagueState;

use super::{header_style, selected_row_style, table_state};
use crate::tui::ViewState;

/// Shown instead of the table when nobody has joined yet.
pub const EMPTY_MESSAGE: &str = "No players added yet.";

/// Render the player list into the given area.
pub fn render(frame: &mut Frame, area: Rect, state: &LeagueState, view: &ViewState) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!("Players ({})", state.players.len()));

    if state.players.is_empty() {
        let paragraph = Paragraph::new(vec![
            Line::styled(format!("  {}", EMPTY_MESSAGE), Style::default().fg(Color::DarkGray)),
            Line::styled("  Press 'a' to add one.", Style::default().fg(Color::DarkGray)),
        ])
        .block(block);
        frame.render_widget(paragraph, area);
        return;
    }

    let header = Row::new(vec![
        Cell::from("Player"),
        Cell::from("Team"),
        Cell::from("Total"),
    ])
    .style(header_style());

    let rows: Vec<Row> = state
        .players
        .iter()
        .map(|p| {
            Row::new(vec![
                Cell::from(p.name.clone()),
                Cell::from(state.team_names(p).join(", ")),
                Cell::from(p.total_score.to_string())
                    .style(Style::default().add_modifier(Modifier::BOLD)),
            ])
        })
        .collect();

    let widths = [Constraint::Length(16), Constraint::Min(20), Constraint::Length(7)];
    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .row_highlight_style(selected_row_style())
        .highlight_symbol(">> ");

    let mut table_state = table_state(view.player_cursor, state.players.len());
    frame.render_stateful_widget(table, area, &mut table_state);
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
