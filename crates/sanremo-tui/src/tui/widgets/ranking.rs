// Ranking widget: players ordered by total score, leader highlighted.

use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table};
use ratatui::Frame;

use sanremo_core::league::LeagueState;

use super::{header_style, selected_row_style, table_state};
use crate::tui::ViewState;

/// Shown instead of the table when there is nobody to rank.
pub const EMPTY_MESSAGE: &str = "Add players and contestant scores first.";

/// Render the ranking into the given area.
pub fn render(frame: &mut Frame, area: Rect, state: &LeagueState, view: &ViewState) {
    let block = Block::default().borders(Borders::ALL).title("Ranking");
    let ranked = state.ranked_players();

    if ranked.is_empty() {
        let paragraph = Paragraph::new(Line::styled(
            format!("  {}", EMPTY_MESSAGE),
            Style::default().fg(Color::DarkGray),
        ))
        .block(block);
        frame.render_widget(paragraph, area);
        return;
    }

    let header = Row::new(vec![
        Cell::from("Pos"),
        Cell::from("Player"),
        Cell::from("Score"),
    ])
    .style(header_style());

    let rows: Vec<Row> = ranked
        .iter()
        .enumerate()
        .map(|(i, p)| {
            let style = if i == 0 {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            Row::new(vec![
                Cell::from(format!("{}.", i + 1)),
                Cell::from(p.name.clone()),
                Cell::from(p.total_score.to_string()),
            ])
            .style(style)
        })
        .collect();

    let widths = [Constraint::Length(5), Constraint::Min(16), Constraint::Length(7)];
    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .row_highlight_style(selected_row_style())
        .highlight_symbol(">> ");

    let mut table_state = table_state(view.ranking_cursor, ranked.len());
    frame.render_stateful_widget(table, area, &mut table_state);
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::widgets::test_support::buffer_text;

    fn draw(state: &LeagueState) -> String {
        let backend = ratatui::backend::TestBackend::new(60, 10);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| render(frame, frame.area(), state, &ViewState::default()))
            .unwrap();
        buffer_text(&terminal)
    }

    #[test]
    fn render_empty_shows_message() {
        assert!(draw(&LeagueState::new_default()).contains(EMPTY_MESSAGE));
    }

    #[test]
    fn render_orders_by_score() {
        let mut state = LeagueState::new_default();
        state.set_contestant_score(0, "10").unwrap();
        state.set_contestant_score(1, "5").unwrap();
        state.add_player("Anna", [0, 1, 2, 3, 4], 1).unwrap();
        state.add_player("Bruno", [0, 0, 1, 1, 2], 2).unwrap();
        let text = draw(&state);
        let bruno = text.find("Bruno").unwrap();
        let anna = text.find("Anna").unwrap();
        assert!(bruno < anna, "higher total should be listed first");
        assert!(text.contains("1."));
        assert!(text.contains("30"));
    }
}
