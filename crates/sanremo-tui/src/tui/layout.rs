// Screen layout: panel arrangement and sizing.
//
// +--------------------------------------------------+
// | Status Bar (1 row): league name + tab strip      |
// +--------------------------------------------------+
// | Summary (3 rows): counts and current leader      |
// +--------------------------------------------------+
// | Main Panel (fill): active tab                    |
// +--------------------------------------------------+
// | Help Bar (2 rows): status message + key hints    |
// +--------------------------------------------------+

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Resolved screen areas for each dashboard zone.
#[derive(Debug, Clone)]
pub struct AppLayout {
    pub status_bar: Rect,
    pub summary: Rect,
    pub main_panel: Rect,
    pub help_bar: Rect,
}

/// Build the dashboard layout from the available terminal area.
pub fn build_layout(area: Rect) -> AppLayout {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // status bar
            Constraint::Length(3), // summary
            Constraint::Min(5),    // main panel
            Constraint::Length(2), // help bar
        ])
        .split(area);

    AppLayout {
        status_bar: vertical[0],
        summary: vertical[1],
        main_panel: vertical[2],
        help_bar: vertical[3],
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
