// Scores widget: per-contestant points with a live-applying editor.

use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Cell, Row, Table};
use ratatui::Frame;

use sanremo_core::league::LeagueState;

use super::{header_style, selected_row_style, table_state};
use crate::tui::{InputMode, ViewState};

/// Render the score table into the given area.
pub fn render(frame: &mut Frame, area: Rect, state: &LeagueState, view: &ViewState) {
    let editing = match &view.mode {
        InputMode::EditScore { index, buffer } => Some((*index, buffer.as_str())),
        _ => None,
    };

    let header = Row::new(vec![
        Cell::from("#"),
        Cell::from("Contestant"),
        Cell::from("Score"),
    ])
    .style(header_style());

    let rows: Vec<Row> = state
        .contestants
        .iter()
        .enumerate()
        .map(|(i, c)| {
            let score_cell = match editing {
                Some((index, buffer)) if index == i => Cell::from(format!("{}_", buffer)).style(
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                ),
                _ => Cell::from(c.score.to_string()).style(score_style(c.score)),
            };
            Row::new(vec![
                Cell::from(format!("{}", i + 1)),
                Cell::from(c.name.clone()),
                score_cell,
            ])
        })
        .collect();

    let widths = [Constraint::Length(4), Constraint::Min(16), Constraint::Length(8)];
    let table = Table::new(rows, widths)
        .header(header)
        .block(Block::default().borders(Borders::ALL).title("Scores"))
        .row_highlight_style(selected_row_style())
        .highlight_symbol(">> ");

    let mut table_state = table_state(view.score_cursor, state.contestants.len());
    frame.render_stateful_widget(table, area, &mut table_state);
}

/// Bonuses green, maluses red.
pub fn score_style(score: i64) -> Style {
    match score {
        s if s > 0 => Style::default().fg(Color::Green),
        s if s < 0 => Style::default().fg(Color::Red),
        _ => Style::default().fg(Color::DarkGray),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::widgets::test_support::buffer_text;

    #[test]
    fn score_style_by_sign() {
        assert_eq!(score_style(5).fg, Some(Color::Green));
        assert_eq!(score_style(-5).fg, Some(Color::Red));
        assert_eq!(score_style(0).fg, Some(Color::DarkGray));
    }

    #[test]
    fn render_shows_scores() {
        let backend = ratatui::backend::TestBackend::new(60, 10);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        let mut state = LeagueState::new_default();
        state.set_contestant_score(0, "-15").unwrap();
        terminal
            .draw(|frame| render(frame, frame.area(), &state, &ViewState::default()))
            .unwrap();
        assert!(buffer_text(&terminal).contains("-15"));
    }

    #[test]
    fn render_shows_edit_buffer() {
        let backend = ratatui::backend::TestBackend::new(60, 10);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        let state = LeagueState::new_default();
        let view = ViewState {
            mode: InputMode::EditScore {
                index: 1,
                buffer: "4".into(),
            },
            score_cursor: 1,
            ..ViewState::default()
        };
        terminal
            .draw(|frame| render(frame, frame.area(), &state, &view))
            .unwrap();
        assert!(buffer_text(&terminal).contains("4_"));
    }
}
