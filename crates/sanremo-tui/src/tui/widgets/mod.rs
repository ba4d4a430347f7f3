// TUI widget modules for each dashboard panel.

pub mod confirm;
pub mod contestants;
pub mod help_bar;
pub mod player_form;
pub mod players;
pub mod ranking;
pub mod scores;
pub mod status_bar;
pub mod summary;

use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::TableState;

/// Bold white style shared by table headers.
pub(crate) fn header_style() -> Style {
    Style::default()
        .fg(Color::White)
        .add_modifier(Modifier::BOLD)
}

/// Style of the selected table row.
pub(crate) fn selected_row_style() -> Style {
    Style::default().bg(Color::DarkGray)
}

/// Table state selecting `cursor`, or nothing for an empty table.
pub(crate) fn table_state(cursor: usize, len: usize) -> TableState {
    let selected = if len == 0 { None } else { Some(cursor.min(len - 1)) };
    TableState::default().with_selected(selected)
}
