// Contestants widget: the roster with inline renaming.
//
// Table: #, Name. The selected row is highlighted; while a rename is in
// progress the edited row shows the input buffer instead of the name.

use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Cell, Row, Table};
use ratatui::Frame;

use sanremo_core::league::LeagueState;

use super::{header_style, selected_row_style, table_state};
use crate::tui::{InputMode, ViewState};

/// Render the contestant roster into the given area.
pub fn render(frame: &mut Frame, area: Rect, state: &LeagueState, view: &ViewState) {
    let editing = match &view.mode {
        InputMode::EditName { index, buffer } => Some((*index, buffer.as_str())),
        _ => None,
    };

    let header = Row::new(vec![Cell::from("#"), Cell::from("Name")]).style(header_style());

    let rows: Vec<Row> = state
        .contestants
        .iter()
        .enumerate()
        .map(|(i, c)| {
            let name_cell = match editing {
                Some((index, buffer)) if index == i => Cell::from(format!("{}_", buffer)).style(
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                ),
                _ => Cell::from(c.name.clone()),
            };
            Row::new(vec![Cell::from(format!("{}", i + 1)), name_cell])
        })
        .collect();

    let title = if editing.is_some() {
        "Contestants (Enter: save, Esc: cancel)"
    } else {
        "Contestants"
    };

    let table = Table::new(rows, [Constraint::Length(4), Constraint::Min(16)])
        .header(header)
        .block(Block::default().borders(Borders::ALL).title(title))
        .row_highlight_style(selected_row_style())
        .highlight_symbol(">> ");

    let mut table_state = table_state(view.name_cursor, state.contestants.len());
    frame.render_stateful_widget(table, area, &mut table_state);
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::widgets::test_support::buffer_text;

    #[test]
    fn render_lists_default_names() {
        let backend = ratatui::backend::TestBackend::new(60, 30);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        let state = LeagueState::new_default();
        let view = ViewState::default();
        terminal
            .draw(|frame| render(frame, frame.area(), &state, &view))
            .unwrap();
        let text = buffer_text(&terminal);
        assert!(text.contains("Contestant 1"));
        assert!(text.contains("Contestant 20"));
    }

    #[test]
    fn render_shows_edit_buffer() {
        let backend = ratatui::backend::TestBackend::new(60, 10);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        let state = LeagueState::new_default();
        let view = ViewState {
            mode: InputMode::EditName {
                index: 0,
                buffer: "Mahmood".into(),
            },
            ..ViewState::default()
        };
        terminal
            .draw(|frame| render(frame, frame.area(), &state, &view))
            .unwrap();
        let text = buffer_text(&terminal);
        assert!(text.contains("Mahmood_"));
        assert!(!text.contains("Contestant 1 "));
    }

    #[test]
    fn render_empty_roster_does_not_panic() {
        let backend = ratatui::backend::TestBackend::new(40, 6);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        let state = LeagueState {
            contestants: Vec::new(),
            players: Vec::new(),
        };
        terminal
            .draw(|frame| render(frame, frame.area(), &state, &ViewState::default()))
            .unwrap();
    }
}
