// Summary widget: contestant and player counts plus the current leader.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use sanremo_core::league::LeagueSummary;

/// Render the league summary into the given area.
pub fn render(frame: &mut Frame, area: Rect, summary: &LeagueSummary) {
    let paragraph = Paragraph::new(build_summary_line(summary))
        .block(Block::default().borders(Borders::ALL).title("Summary"));
    frame.render_widget(paragraph, area);
}

fn build_summary_line(summary: &LeagueSummary) -> Line<'static> {
    let label = Style::default().fg(Color::Gray);
    let value = Style::default().fg(Color::White).add_modifier(Modifier::BOLD);

    let mut spans = vec![
        Span::styled(" Contestants: ", label),
        Span::styled(summary.contestant_count.to_string(), value),
        Span::styled("   Players: ", label),
        Span::styled(summary.player_count.to_string(), value),
        Span::styled("   Leader: ", label),
    ];

    match (&summary.leader_name, summary.leader_score) {
        (Some(name), Some(score)) => {
            spans.push(Span::styled(
                name.clone(),
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ));
            spans.push(Span::styled(format!(" ({} pts)", score), label));
        }
        _ => spans.push(Span::styled("-", Style::default().fg(Color::DarkGray))),
    }

    Line::from(spans)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
