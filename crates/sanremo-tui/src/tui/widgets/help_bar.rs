// Help bar widget: last status message plus key hints for the current mode.

use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::protocol::TabId;
use crate::tui::{InputMode, ViewState};

/// Render the help bar (status line + hint line) into the given area.
pub fn render(frame: &mut Frame, area: Rect, view: &ViewState) {
    let status_line = match &view.status {
        Some(msg) => {
            let color = if msg.is_error { Color::Red } else { Color::Green };
            Line::from(Span::styled(format!(" {}", msg.text), Style::default().fg(color)))
        }
        None => Line::raw(""),
    };

    let hints = Line::from(Span::styled(
        format!(" {}", hints(view)),
        Style::default().fg(Color::DarkGray),
    ));

    frame.render_widget(Paragraph::new(vec![status_line, hints]), area);
}

/// Key hints for the active mode and tab.
pub fn hints(view: &ViewState) -> &'static str {
    match &view.mode {
        InputMode::EditName { .. } => "type a name  Enter: save  Esc: cancel",
        InputMode::EditScore { .. } => "digits/-: edit (applied live)  Enter/Esc: done",
        InputMode::AddPlayer(_) => "Tab/↑↓: field  ←→: change pick  Enter: save  Esc: cancel",
        InputMode::Confirm(_) => "y: confirm  n/Esc: cancel",
        InputMode::Normal => match view.active_tab {
            TabId::Contestants => "1-4/Tab: tabs  ↑↓: select  Enter: rename  a: add player  R: reset  q: quit",
            TabId::Scores => "1-4/Tab: tabs  ↑↓: select  Enter: edit  +/-: adjust  R: reset  q: quit",
            TabId::Players => "1-4/Tab: tabs  ↑↓: select  a: add  d: remove  R: reset  q: quit",
            TabId::Ranking => "1-4/Tab: tabs  ↑↓: select  a: add player  R: reset  q: quit",
        },
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
