// TUI dashboard: layout, input handling, and widget rendering.
//
// The TUI owns a `ViewState` holding everything that is purely
// presentational (active tab, cursors, open editors and dialogs). League
// data is read straight from the store on every frame; mutations go through
// `UserCommand`s handled by the app layer.

pub mod input;
pub mod layout;
pub mod widgets;

use std::time::Duration;

use crossterm::event::{self, Event};
use ratatui::{DefaultTerminal, Frame};
use sanremo_core::db::SnapshotStore;
use sanremo_core::league::{LeagueState, PICKS_PER_TEAM};

use crate::app::App;
use crate::protocol::TabId;

use layout::build_layout;

/// How long to wait for input before redrawing anyway.
const POLL_INTERVAL: Duration = Duration::from_millis(250);

// ---------------------------------------------------------------------------
// Player form
// ---------------------------------------------------------------------------

/// Which field of the add-player form has focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Name,
    Pick(usize),
}

/// In-progress "add player" form: a name plus one contestant selector per
/// pick. Selectors hold positions in the contestant list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerForm {
    pub name: String,
    pub picks: [usize; PICKS_PER_TEAM],
    pub focus: FormField,
}

impl PlayerForm {
    /// A blank form whose selectors start on the first contestants of a
    /// roster of `roster_len`.
    pub fn new(roster_len: usize) -> Self {
        let last = roster_len.saturating_sub(1);
        PlayerForm {
            name: String::new(),
            picks: std::array::from_fn(|i| i.min(last)),
            focus: FormField::Name,
        }
    }

    /// Resolve the selectors to contestant ids.
    pub fn pick_ids(&self, state: &LeagueState) -> [u32; PICKS_PER_TEAM] {
        std::array::from_fn(|i| {
            state
                .contestants
                .get(self.picks[i])
                .map(|c| c.id)
                .unwrap_or(self.picks[i] as u32)
        })
    }
}

// ---------------------------------------------------------------------------
// Modes
// ---------------------------------------------------------------------------

/// A yes/no question waiting for an answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingConfirm {
    /// The form picks the same contestant more than once.
    DuplicatePicks(PlayerForm),
    RemovePlayer { id: i64, name: String },
    ResetAll,
    Quit,
}

impl PendingConfirm {
    pub fn question(&self) -> String {
        match self {
            PendingConfirm::DuplicatePicks(_) => {
                "The same contestant is picked more than once. Continue anyway?".to_string()
            }
            PendingConfirm::RemovePlayer { name, .. } => {
                format!("Really remove player \"{name}\"?")
            }
            PendingConfirm::ResetAll => {
                "Delete all data (contestants, players, scores)?".to_string()
            }
            PendingConfirm::Quit => "Really quit?".to_string(),
        }
    }
}

/// What keyboard input currently drives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    EditName { index: usize, buffer: String },
    EditScore { index: usize, buffer: String },
    AddPlayer(PlayerForm),
    Confirm(PendingConfirm),
}

// ---------------------------------------------------------------------------
// ViewState
// ---------------------------------------------------------------------------

/// A one-line message shown above the help bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub is_error: bool,
}

/// TUI-local state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    pub active_tab: TabId,
    /// Selected row on the Contestants tab.
    pub name_cursor: usize,
    /// Selected row on the Scores tab.
    pub score_cursor: usize,
    /// Selected row on the Players tab.
    pub player_cursor: usize,
    /// Selected row on the Ranking tab.
    pub ranking_cursor: usize,
    pub mode: InputMode,
    pub status: Option<StatusMessage>,
}

impl Default for ViewState {
    fn default() -> Self {
        ViewState {
            active_tab: TabId::Contestants,
            name_cursor: 0,
            score_cursor: 0,
            player_cursor: 0,
            ranking_cursor: 0,
            mode: InputMode::Normal,
            status: None,
        }
    }
}

impl ViewState {
    pub fn info(&mut self, text: impl Into<String>) {
        self.status = Some(StatusMessage {
            text: text.into(),
            is_error: false,
        });
    }

    pub fn error(&mut self, text: impl Into<String>) {
        self.status = Some(StatusMessage {
            text: text.into(),
            is_error: true,
        });
    }

    /// Keep every cursor inside the current league data, e.g. after a
    /// player was removed or the league was reset.
    pub fn clamp_cursors(&mut self, state: &LeagueState) {
        let last_contestant = state.contestants.len().saturating_sub(1);
        let last_player = state.players.len().saturating_sub(1);
        self.name_cursor = self.name_cursor.min(last_contestant);
        self.score_cursor = self.score_cursor.min(last_contestant);
        self.player_cursor = self.player_cursor.min(last_player);
        self.ranking_cursor = self.ranking_cursor.min(last_player);
    }
}

// ---------------------------------------------------------------------------
// Render frame
// ---------------------------------------------------------------------------

/// Render the complete dashboard frame.
pub fn render_frame(frame: &mut Frame, state: &LeagueState, view: &ViewState, league_name: &str) {
    let layout = build_layout(frame.area());

    widgets::status_bar::render(frame, layout.status_bar, view.active_tab, league_name);
    widgets::summary::render(frame, layout.summary, &state.summary());

    match view.active_tab {
        TabId::Contestants => widgets::contestants::render(frame, layout.main_panel, state, view),
        TabId::Scores => widgets::scores::render(frame, layout.main_panel, state, view),
        TabId::Players => widgets::players::render(frame, layout.main_panel, state, view),
        TabId::Ranking => widgets::ranking::render(frame, layout.main_panel, state, view),
    }

    widgets::help_bar::render(frame, layout.help_bar, view);

    match &view.mode {
        InputMode::AddPlayer(form) => widgets::player_form::render(frame, frame.area(), state, form),
        InputMode::Confirm(pending) => widgets::confirm::render(frame, frame.area(), &pending.question()),
        _ => {}
    }
}

// ---------------------------------------------------------------------------
// Main TUI loop
// ---------------------------------------------------------------------------

/// Run the TUI event loop until the user quits.
///
/// Initializes the terminal, installs a panic hook that restores it, then
/// alternates between drawing and handling one input event. Every event is
/// handled to completion before the next is read.
pub fn run<S: SnapshotStore>(app: &mut App<S>) -> anyhow::Result<()> {
    let mut terminal = ratatui::init();

    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        ratatui::restore();
        original_hook(panic_info);
    }));

    let result = event_loop(&mut terminal, app);

    ratatui::restore();
    result
}

fn event_loop<S: SnapshotStore>(terminal: &mut DefaultTerminal, app: &mut App<S>) -> anyhow::Result<()> {
    loop {
        terminal.draw(|frame| {
            render_frame(frame, app.store.state(), &app.view, &app.config.league_name)
        })?;

        if !event::poll(POLL_INTERVAL)? {
            continue;
        }

        if let Event::Key(key_event) = event::read()? {
            if let Some(cmd) = input::handle_key(key_event, &mut app.view, app.store.state()) {
                if app.handle_user_command(cmd)? {
                    break;
                }
            }
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn view_state_default_is_sensible() {
        let state = ViewState::default();
        assert_eq!(state.active_tab, TabId::Contestants);
        assert_eq!(state.mode, InputMode::Normal);
        assert_eq!(state.name_cursor, 0);
        assert_eq!(state.player_cursor, 0);
        assert!(state.status.is_none());
    }

    #[test]
    fn player_form_starts_on_distinct_contestants() {
        let form = PlayerForm::new(20);
        assert_eq!(form.picks, [0, 1, 2, 3, 4]);
        assert_eq!(form.focus, FormField::Name);
        assert!(form.name.is_empty());
    }

    #[test]
    fn player_form_clamps_to_small_roster() {
        let form = PlayerForm::new(3);
        assert_eq!(form.picks, [0, 1, 2, 2, 2]);
    }

    #[test]
    fn pick_ids_follow_contestant_ids() {
        let mut state = LeagueState::new_default();
        state.contestants.remove(0);
        let form = PlayerForm::new(state.contestants.len());
        assert_eq!(form.pick_ids(&state), [1, 2, 3, 4, 5]);
    }

    #[test]
    fn clamp_cursors_after_players_shrink() {
        let mut state = LeagueState::new_default();
        state.add_player("Anna", [0, 1, 2, 3, 4], 1).unwrap();
        let mut view = ViewState {
            player_cursor: 5,
            ranking_cursor: 3,
            name_cursor: 40,
            ..ViewState::default()
        };
        view.clamp_cursors(&state);
        assert_eq!(view.player_cursor, 0);
        assert_eq!(view.ranking_cursor, 0);
        assert_eq!(view.name_cursor, 19);
    }

    #[test]
    fn confirm_questions_mention_subject() {
        let q = PendingConfirm::RemovePlayer {
            id: 1,
            name: "Anna".into(),
        }
        .question();
        assert!(q.contains("Anna"));
    }

    #[test]
    fn render_frame_every_tab() {
        let mut state = LeagueState::new_default();
        state.set_contestant_score(0, "10").unwrap();
        state.add_player("Anna", [0, 1, 2, 3, 4], 1).unwrap();

        for tab in TabId::ALL {
            let backend = TestBackend::new(100, 40);
            let mut terminal = Terminal::new(backend).unwrap();
            let view = ViewState {
                active_tab: tab,
                ..ViewState::default()
            };
            terminal
                .draw(|frame| render_frame(frame, &state, &view, "FantaSanremo"))
                .unwrap();
            let text = buffer_text(&terminal);
            assert!(text.contains("FantaSanremo"));
            assert!(text.contains("Anna"), "leader should appear on tab {:?}", tab);
        }
    }

    #[test]
    fn render_frame_with_overlays() {
        let state = LeagueState::new_default();
        for mode in [
            InputMode::AddPlayer(PlayerForm::new(20)),
            InputMode::Confirm(PendingConfirm::ResetAll),
        ] {
            let backend = TestBackend::new(100, 40);
            let mut terminal = Terminal::new(backend).unwrap();
            let view = ViewState {
                mode,
                ..ViewState::default()
            };
            terminal
                .draw(|frame| render_frame(frame, &state, &view, "FantaSanremo"))
                .unwrap();
        }
    }

    #[test]
    fn render_frame_tiny_terminal_does_not_panic() {
        let state = LeagueState::new_default();
        let backend = TestBackend::new(20, 5);
        let mut terminal = Terminal::new(backend).unwrap();
        let view = ViewState {
            mode: InputMode::AddPlayer(PlayerForm::new(20)),
            ..ViewState::default()
        };
        terminal
            .draw(|frame| render_frame(frame, &state, &view, "FantaSanremo"))
            .unwrap();
    }
}
