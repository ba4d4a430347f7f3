// Add-player form overlay: a name field plus one selector per pick.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use sanremo_core::league::{LeagueState, PICKS_PER_TEAM, UNKNOWN_CONTESTANT};

use super::confirm::centered_rect;
use crate::tui::{FormField, PlayerForm};

const FORM_WIDTH: u16 = 56;
/// Borders, name, blank, one row per pick, blank, hint.
const FORM_HEIGHT: u16 = 2 + 1 + 1 + PICKS_PER_TEAM as u16 + 1 + 1;

/// Render the form centered over `area`.
pub fn render(frame: &mut Frame, area: Rect, state: &LeagueState, form: &PlayerForm) {
    let form_area = centered_rect(FORM_WIDTH, FORM_HEIGHT, area);
    frame.render_widget(Clear, form_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(Span::styled(
            " Add player ",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ));

    let paragraph = Paragraph::new(build_form_lines(state, form))
        .block(block)
        .style(Style::default().bg(Color::Black));
    frame.render_widget(paragraph, form_area);
}

fn build_form_lines(state: &LeagueState, form: &PlayerForm) -> Vec<Line<'static>> {
    let label = Style::default().fg(Color::Gray);
    let mut lines = Vec::with_capacity(PICKS_PER_TEAM + 4);

    let name_focused = form.focus == FormField::Name;
    let name_text = if name_focused {
        format!("{}_", form.name)
    } else {
        form.name.clone()
    };
    lines.push(Line::from(vec![
        Span::styled(" Name:   ", label),
        Span::styled(name_text, field_style(name_focused)),
    ]));
    lines.push(Line::raw(""));

    for (i, &position) in form.picks.iter().enumerate() {
        let focused = form.focus == FormField::Pick(i);
        let name = state
            .contestants
            .get(position)
            .map(|c| c.name.clone())
            .unwrap_or_else(|| UNKNOWN_CONTESTANT.to_string());
        let text = if focused {
            format!("< {} >", name)
        } else {
            format!("  {}", name)
        };
        lines.push(Line::from(vec![
            Span::styled(format!(" Pick {}: ", i + 1), label),
            Span::styled(text, field_style(focused)),
        ]));
    }

    lines.push(Line::raw(""));
    lines.push(Line::styled(
        " Enter: save   Esc: cancel",
        Style::default().fg(Color::DarkGray),
    ));
    lines
}

fn field_style(focused: bool) -> Style {
    if focused {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
