// Keyboard input handling and command dispatch.
//
// Translates crossterm key events into `UserCommand`s for the app layer,
// or into local `ViewState` changes (tab switching, cursor movement, open
// editors, form fields, confirmation dialogs).

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use sanremo_core::league::{has_duplicate_picks, LeagueState, PICKS_PER_TEAM};

use super::{FormField, InputMode, PendingConfirm, PlayerForm, ViewState};
use crate::protocol::{TabId, UserCommand};

/// Rows moved by PageUp/PageDown.
const PAGE_SIZE: usize = 10;

/// Handle a keyboard event.
///
/// Returns `Some(UserCommand)` when the key press should be forwarded to the
/// app layer. Returns `None` when it was handled locally.
pub fn handle_key(
    key_event: KeyEvent,
    view_state: &mut ViewState,
    league: &LeagueState,
) -> Option<UserCommand> {
    // Windows reports both Press and Release; only act on Press.
    if key_event.kind != KeyEventKind::Press {
        return None;
    }

    // Ctrl+C always quits immediately regardless of mode
    if key_event.modifiers.contains(KeyModifiers::CONTROL) && key_event.code == KeyCode::Char('c') {
        return Some(UserCommand::Quit);
    }

    // Take the mode out so its payload can be moved into the next mode.
    match std::mem::replace(&mut view_state.mode, InputMode::Normal) {
        InputMode::Normal => handle_normal(key_event, view_state, league),
        InputMode::EditName { index, buffer } => handle_edit_name(key_event, view_state, index, buffer),
        InputMode::EditScore { index, buffer } => handle_edit_score(key_event, view_state, index, buffer),
        InputMode::AddPlayer(form) => handle_form(key_event, view_state, league, form),
        InputMode::Confirm(pending) => handle_confirm(key_event, view_state, league, pending),
    }
}

// ---------------------------------------------------------------------------
// Normal mode
// ---------------------------------------------------------------------------

fn handle_normal(key_event: KeyEvent, view_state: &mut ViewState, league: &LeagueState) -> Option<UserCommand> {
    view_state.status = None;

    match key_event.code {
        // Tab switching
        KeyCode::Char('1') => view_state.active_tab = TabId::Contestants,
        KeyCode::Char('2') => view_state.active_tab = TabId::Scores,
        KeyCode::Char('3') => view_state.active_tab = TabId::Players,
        KeyCode::Char('4') => view_state.active_tab = TabId::Ranking,
        KeyCode::Tab => view_state.active_tab = view_state.active_tab.next(),

        // Cursor movement
        KeyCode::Up | KeyCode::Char('k') => move_cursor(view_state, league, -1),
        KeyCode::Down | KeyCode::Char('j') => move_cursor(view_state, league, 1),
        KeyCode::PageUp => move_cursor(view_state, league, -(PAGE_SIZE as isize)),
        KeyCode::PageDown => move_cursor(view_state, league, PAGE_SIZE as isize),

        KeyCode::Enter => open_editor(view_state, league),

        // Score nudges
        KeyCode::Char('+') | KeyCode::Char('-') if view_state.active_tab == TabId::Scores => {
            let index = view_state.score_cursor;
            let contestant = league.contestants.get(index)?;
            let delta = if key_event.code == KeyCode::Char('+') { 1 } else { -1 };
            return Some(UserCommand::SetScore {
                index,
                raw: contestant.score.saturating_add(delta).to_string(),
            });
        }

        KeyCode::Char('a') => {
            view_state.active_tab = TabId::Players;
            view_state.mode = InputMode::AddPlayer(PlayerForm::new(league.contestants.len()));
        }

        KeyCode::Char('d') | KeyCode::Delete if view_state.active_tab == TabId::Players => {
            if let Some(player) = league.players.get(view_state.player_cursor) {
                view_state.mode = InputMode::Confirm(PendingConfirm::RemovePlayer {
                    id: player.id,
                    name: player.name.clone(),
                });
            }
        }

        KeyCode::Char('R') => view_state.mode = InputMode::Confirm(PendingConfirm::ResetAll),

        // Quit: enter confirmation mode instead of quitting immediately
        KeyCode::Char('q') => view_state.mode = InputMode::Confirm(PendingConfirm::Quit),

        _ => {}
    }
    None
}

/// Enter opens the inline editor for the selected contestant.
fn open_editor(view_state: &mut ViewState, league: &LeagueState) {
    match view_state.active_tab {
        TabId::Contestants => {
            let index = view_state.name_cursor;
            if let Some(c) = league.contestants.get(index) {
                view_state.mode = InputMode::EditName {
                    index,
                    buffer: c.name.clone(),
                };
            }
        }
        TabId::Scores => {
            let index = view_state.score_cursor;
            if let Some(c) = league.contestants.get(index) {
                view_state.mode = InputMode::EditScore {
                    index,
                    buffer: c.score.to_string(),
                };
            }
        }
        TabId::Players | TabId::Ranking => {}
    }
}

fn move_cursor(view_state: &mut ViewState, league: &LeagueState, delta: isize) {
    let (cursor, len) = match view_state.active_tab {
        TabId::Contestants => (&mut view_state.name_cursor, league.contestants.len()),
        TabId::Scores => (&mut view_state.score_cursor, league.contestants.len()),
        TabId::Players => (&mut view_state.player_cursor, league.players.len()),
        TabId::Ranking => (&mut view_state.ranking_cursor, league.players.len()),
    };
    let last = len.saturating_sub(1);
    *cursor = cursor.saturating_add_signed(delta).min(last);
}

// ---------------------------------------------------------------------------
// Inline editors
// ---------------------------------------------------------------------------

/// Name editor: Enter saves, Esc discards.
fn handle_edit_name(
    key_event: KeyEvent,
    view_state: &mut ViewState,
    index: usize,
    mut buffer: String,
) -> Option<UserCommand> {
    match key_event.code {
        KeyCode::Enter => return Some(UserCommand::RenameContestant { index, name: buffer }),
        KeyCode::Esc => return None,
        KeyCode::Backspace => {
            buffer.pop();
        }
        KeyCode::Char(c) => buffer.push(c),
        _ => {}
    }
    view_state.mode = InputMode::EditName { index, buffer };
    None
}

/// Score editor: every edit is applied immediately; Enter or Esc closes
/// the editor.
fn handle_edit_score(
    key_event: KeyEvent,
    view_state: &mut ViewState,
    index: usize,
    mut buffer: String,
) -> Option<UserCommand> {
    match key_event.code {
        KeyCode::Enter | KeyCode::Esc => return None,
        KeyCode::Backspace => {
            buffer.pop();
        }
        KeyCode::Char(c) if c.is_ascii_digit() || c == '-' => buffer.push(c),
        _ => {
            view_state.mode = InputMode::EditScore { index, buffer };
            return None;
        }
    }
    let raw = buffer.clone();
    view_state.mode = InputMode::EditScore { index, buffer };
    Some(UserCommand::SetScore { index, raw })
}

// ---------------------------------------------------------------------------
// Add-player form
// ---------------------------------------------------------------------------

fn handle_form(
    key_event: KeyEvent,
    view_state: &mut ViewState,
    league: &LeagueState,
    mut form: PlayerForm,
) -> Option<UserCommand> {
    let roster_len = league.contestants.len();

    match (key_event.code, form.focus) {
        (KeyCode::Esc, _) => return None,
        (KeyCode::Enter, _) => return submit_form(view_state, league, form),

        (KeyCode::Tab | KeyCode::Down, _) => form.focus = next_field(form.focus),
        (KeyCode::BackTab | KeyCode::Up, _) => form.focus = prev_field(form.focus),

        (KeyCode::Backspace, FormField::Name) => {
            form.name.pop();
        }
        (KeyCode::Char(c), FormField::Name) => form.name.push(c),

        (KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('+'), FormField::Pick(i)) => {
            form.picks[i] = cycle(form.picks[i], roster_len, 1);
        }
        (KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('-'), FormField::Pick(i)) => {
            form.picks[i] = cycle(form.picks[i], roster_len, -1);
        }

        _ => {}
    }
    view_state.mode = InputMode::AddPlayer(form);
    None
}

/// Validate and submit the form. A blank name keeps the form open with a
/// prompt; duplicate picks ask for confirmation first.
fn submit_form(view_state: &mut ViewState, league: &LeagueState, form: PlayerForm) -> Option<UserCommand> {
    if form.name.trim().is_empty() {
        view_state.error("Enter the player's name.");
        view_state.mode = InputMode::AddPlayer(PlayerForm {
            focus: FormField::Name,
            ..form
        });
        return None;
    }

    if has_duplicate_picks(&form.pick_ids(league)) {
        view_state.mode = InputMode::Confirm(PendingConfirm::DuplicatePicks(form));
        return None;
    }

    Some(UserCommand::AddPlayer {
        picks: form.pick_ids(league),
        name: form.name,
    })
}

fn next_field(field: FormField) -> FormField {
    match field {
        FormField::Name => FormField::Pick(0),
        FormField::Pick(i) if i + 1 < PICKS_PER_TEAM => FormField::Pick(i + 1),
        FormField::Pick(_) => FormField::Name,
    }
}

fn prev_field(field: FormField) -> FormField {
    match field {
        FormField::Name => FormField::Pick(PICKS_PER_TEAM - 1),
        FormField::Pick(0) => FormField::Name,
        FormField::Pick(i) => FormField::Pick(i - 1),
    }
}

/// Step a selector through `0..len`, wrapping at both ends.
fn cycle(current: usize, len: usize, step: isize) -> usize {
    if len == 0 {
        return 0;
    }
    let len = len as isize;
    ((current as isize + step).rem_euclid(len)) as usize
}

// ---------------------------------------------------------------------------
// Confirmation dialogs
// ---------------------------------------------------------------------------

/// `y` confirms, `n`/Esc cancels, everything else is ignored.
fn handle_confirm(
    key_event: KeyEvent,
    view_state: &mut ViewState,
    league: &LeagueState,
    pending: PendingConfirm,
) -> Option<UserCommand> {
    let confirmed = match key_event.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => true,
        KeyCode::Char('q') | KeyCode::Char('Q') if pending == PendingConfirm::Quit => true,
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => false,
        _ => {
            view_state.mode = InputMode::Confirm(pending);
            return None;
        }
    };

    match (pending, confirmed) {
        (PendingConfirm::DuplicatePicks(form), true) => Some(UserCommand::AddPlayer {
            picks: form.pick_ids(league),
            name: form.name,
        }),
        // Declining the duplicate warning returns to the form untouched.
        (PendingConfirm::DuplicatePicks(form), false) => {
            view_state.mode = InputMode::AddPlayer(form);
            None
        }
        (PendingConfirm::RemovePlayer { id, .. }, true) => Some(UserCommand::RemovePlayer { id }),
        (PendingConfirm::ResetAll, true) => Some(UserCommand::ResetAll),
        (PendingConfirm::Quit, true) => Some(UserCommand::Quit),
        (_, false) => None,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEventState, KeyModifiers};

    /// Helper to create a KeyEvent with no modifiers.
    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    /// Helper to create a KeyEvent with Ctrl modifier.
    fn ctrl_key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::CONTROL,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn type_text(text: &str, view: &mut ViewState, league: &LeagueState) -> Vec<UserCommand> {
        text.chars()
            .filter_map(|c| handle_key(key(KeyCode::Char(c)), view, league))
            .collect()
    }

    fn league_with_players() -> LeagueState {
        let mut league = LeagueState::new_default();
        league.add_player("Anna", [0, 1, 2, 3, 4], 100).unwrap();
        league.add_player("Bruno", [5, 6, 7, 8, 9], 200).unwrap();
        league
    }

    // -- Global keys --

    #[test]
    fn ctrl_c_quits_from_any_mode() {
        let league = LeagueState::new_default();
        let mut view = ViewState {
            mode: InputMode::AddPlayer(PlayerForm::new(20)),
            ..ViewState::default()
        };
        assert_eq!(
            handle_key(ctrl_key(KeyCode::Char('c')), &mut view, &league),
            Some(UserCommand::Quit)
        );
    }

    #[test]
    fn release_events_ignored() {
        let league = LeagueState::new_default();
        let mut view = ViewState::default();
        let mut ev = key(KeyCode::Char('2'));
        ev.kind = KeyEventKind::Release;
        assert!(handle_key(ev, &mut view, &league).is_none());
        assert_eq!(view.active_tab, TabId::Contestants);
    }

    // -- Tabs and cursors --

    #[test]
    fn number_keys_switch_tabs() {
        let league = LeagueState::new_default();
        let mut view = ViewState::default();
        for (c, tab) in [('2', TabId::Scores), ('3', TabId::Players), ('4', TabId::Ranking), ('1', TabId::Contestants)] {
            assert!(handle_key(key(KeyCode::Char(c)), &mut view, &league).is_none());
            assert_eq!(view.active_tab, tab);
        }
        handle_key(key(KeyCode::Tab), &mut view, &league);
        assert_eq!(view.active_tab, TabId::Scores);
    }

    #[test]
    fn cursor_stays_in_bounds() {
        let league = LeagueState::new_default();
        let mut view = ViewState::default();
        handle_key(key(KeyCode::Up), &mut view, &league);
        assert_eq!(view.name_cursor, 0);
        handle_key(key(KeyCode::Down), &mut view, &league);
        handle_key(key(KeyCode::Char('j')), &mut view, &league);
        assert_eq!(view.name_cursor, 2);
        for _ in 0..5 {
            handle_key(key(KeyCode::PageDown), &mut view, &league);
        }
        assert_eq!(view.name_cursor, 19);
    }

    #[test]
    fn player_cursor_with_no_players() {
        let league = LeagueState::new_default();
        let mut view = ViewState {
            active_tab: TabId::Players,
            ..ViewState::default()
        };
        handle_key(key(KeyCode::Down), &mut view, &league);
        assert_eq!(view.player_cursor, 0);
    }

    #[test]
    fn keypress_clears_status() {
        let league = LeagueState::new_default();
        let mut view = ViewState::default();
        view.info("Player added!");
        handle_key(key(KeyCode::Down), &mut view, &league);
        assert!(view.status.is_none());
    }

    // -- Name editing --

    #[test]
    fn rename_flow() {
        let league = LeagueState::new_default();
        let mut view = ViewState {
            name_cursor: 2,
            ..ViewState::default()
        };
        handle_key(key(KeyCode::Enter), &mut view, &league);
        assert_eq!(
            view.mode,
            InputMode::EditName {
                index: 2,
                buffer: "Contestant 3".into()
            }
        );
        for _ in 0.."Contestant 3".len() {
            handle_key(key(KeyCode::Backspace), &mut view, &league);
        }
        assert!(type_text("Elodie", &mut view, &league).is_empty());
        assert_eq!(
            handle_key(key(KeyCode::Enter), &mut view, &league),
            Some(UserCommand::RenameContestant {
                index: 2,
                name: "Elodie".into()
            })
        );
        assert_eq!(view.mode, InputMode::Normal);
    }

    #[test]
    fn rename_escape_discards() {
        let league = LeagueState::new_default();
        let mut view = ViewState::default();
        handle_key(key(KeyCode::Enter), &mut view, &league);
        type_text("xyz", &mut view, &league);
        assert!(handle_key(key(KeyCode::Esc), &mut view, &league).is_none());
        assert_eq!(view.mode, InputMode::Normal);
    }

    #[test]
    fn q_inside_name_editor_is_text() {
        let league = LeagueState::new_default();
        let mut view = ViewState::default();
        handle_key(key(KeyCode::Enter), &mut view, &league);
        handle_key(key(KeyCode::Char('q')), &mut view, &league);
        assert!(matches!(view.mode, InputMode::EditName { ref buffer, .. } if buffer.ends_with('q')));
    }

    // -- Score editing --

    #[test]
    fn score_editor_applies_each_keystroke() {
        let league = LeagueState::new_default();
        let mut view = ViewState {
            active_tab: TabId::Scores,
            score_cursor: 1,
            ..ViewState::default()
        };
        handle_key(key(KeyCode::Enter), &mut view, &league);
        assert_eq!(
            handle_key(key(KeyCode::Backspace), &mut view, &league),
            Some(UserCommand::SetScore { index: 1, raw: String::new() })
        );
        let cmds = type_text("12x", &mut view, &league);
        assert_eq!(
            cmds,
            vec![
                UserCommand::SetScore { index: 1, raw: "1".into() },
                UserCommand::SetScore { index: 1, raw: "12".into() },
            ]
        );
        assert!(handle_key(key(KeyCode::Enter), &mut view, &league).is_none());
        assert_eq!(view.mode, InputMode::Normal);
    }

    #[test]
    fn plus_minus_nudge_score() {
        let mut league = LeagueState::new_default();
        league.set_contestant_score(0, "4").unwrap();
        let mut view = ViewState {
            active_tab: TabId::Scores,
            ..ViewState::default()
        };
        assert_eq!(
            handle_key(key(KeyCode::Char('+')), &mut view, &league),
            Some(UserCommand::SetScore { index: 0, raw: "5".into() })
        );
        assert_eq!(
            handle_key(key(KeyCode::Char('-')), &mut view, &league),
            Some(UserCommand::SetScore { index: 0, raw: "3".into() })
        );
    }

    // -- Add player --

    #[test]
    fn add_player_flow() {
        let league = LeagueState::new_default();
        let mut view = ViewState::default();
        handle_key(key(KeyCode::Char('a')), &mut view, &league);
        assert_eq!(view.active_tab, TabId::Players);
        assert!(matches!(view.mode, InputMode::AddPlayer(_)));

        type_text("Anna", &mut view, &league);
        // Move to the last pick and step it forward twice: 4 -> 6.
        for _ in 0..PICKS_PER_TEAM {
            handle_key(key(KeyCode::Tab), &mut view, &league);
        }
        handle_key(key(KeyCode::Right), &mut view, &league);
        handle_key(key(KeyCode::Right), &mut view, &league);

        assert_eq!(
            handle_key(key(KeyCode::Enter), &mut view, &league),
            Some(UserCommand::AddPlayer {
                name: "Anna".into(),
                picks: [0, 1, 2, 3, 6]
            })
        );
        assert_eq!(view.mode, InputMode::Normal);
    }

    #[test]
    fn add_player_blank_name_prompts() {
        let league = LeagueState::new_default();
        let mut view = ViewState::default();
        handle_key(key(KeyCode::Char('a')), &mut view, &league);
        type_text("   ", &mut view, &league);
        assert!(handle_key(key(KeyCode::Enter), &mut view, &league).is_none());
        assert!(matches!(view.mode, InputMode::AddPlayer(_)));
        assert!(view.status.as_ref().is_some_and(|s| s.is_error));
    }

    #[test]
    fn duplicate_picks_ask_for_confirmation() {
        let league = LeagueState::new_default();
        let mut view = ViewState::default();
        handle_key(key(KeyCode::Char('a')), &mut view, &league);
        type_text("Bruno", &mut view, &league);
        // Second pick steps back onto the first contestant.
        handle_key(key(KeyCode::Tab), &mut view, &league);
        handle_key(key(KeyCode::Tab), &mut view, &league);
        handle_key(key(KeyCode::Left), &mut view, &league);

        assert!(handle_key(key(KeyCode::Enter), &mut view, &league).is_none());
        assert!(matches!(view.mode, InputMode::Confirm(PendingConfirm::DuplicatePicks(_))));

        // Declining returns to the form with the input intact.
        handle_key(key(KeyCode::Char('n')), &mut view, &league);
        match &view.mode {
            InputMode::AddPlayer(form) => assert_eq!(form.name, "Bruno"),
            other => panic!("expected form, got {:?}", other),
        }

        handle_key(key(KeyCode::Enter), &mut view, &league);
        assert_eq!(
            handle_key(key(KeyCode::Char('y')), &mut view, &league),
            Some(UserCommand::AddPlayer {
                name: "Bruno".into(),
                picks: [0, 0, 2, 3, 4]
            })
        );
    }

    #[test]
    fn pick_selector_wraps() {
        assert_eq!(cycle(0, 20, -1), 19);
        assert_eq!(cycle(19, 20, 1), 0);
        assert_eq!(cycle(5, 0, 1), 0);
    }

    #[test]
    fn form_field_navigation_wraps() {
        assert_eq!(next_field(FormField::Name), FormField::Pick(0));
        assert_eq!(next_field(FormField::Pick(PICKS_PER_TEAM - 1)), FormField::Name);
        assert_eq!(prev_field(FormField::Name), FormField::Pick(PICKS_PER_TEAM - 1));
        assert_eq!(prev_field(FormField::Pick(0)), FormField::Name);
    }

    // -- Remove / reset / quit --

    #[test]
    fn remove_player_requires_confirmation() {
        let league = league_with_players();
        let mut view = ViewState {
            active_tab: TabId::Players,
            player_cursor: 1,
            ..ViewState::default()
        };
        assert!(handle_key(key(KeyCode::Char('d')), &mut view, &league).is_none());
        assert_eq!(
            view.mode,
            InputMode::Confirm(PendingConfirm::RemovePlayer {
                id: 200,
                name: "Bruno".into()
            })
        );
        assert_eq!(
            handle_key(key(KeyCode::Char('y')), &mut view, &league),
            Some(UserCommand::RemovePlayer { id: 200 })
        );
    }

    #[test]
    fn remove_ignored_outside_players_tab() {
        let league = league_with_players();
        let mut view = ViewState::default();
        handle_key(key(KeyCode::Char('d')), &mut view, &league);
        assert_eq!(view.mode, InputMode::Normal);
    }

    #[test]
    fn reset_cancelled_with_n() {
        let league = LeagueState::new_default();
        let mut view = ViewState::default();
        handle_key(key(KeyCode::Char('R')), &mut view, &league);
        assert!(handle_key(key(KeyCode::Char('n')), &mut view, &league).is_none());
        assert_eq!(view.mode, InputMode::Normal);
    }

    #[test]
    fn reset_confirmed_with_y() {
        let league = LeagueState::new_default();
        let mut view = ViewState::default();
        handle_key(key(KeyCode::Char('R')), &mut view, &league);
        assert_eq!(
            handle_key(key(KeyCode::Char('y')), &mut view, &league),
            Some(UserCommand::ResetAll)
        );
    }

    #[test]
    fn quit_confirmation_blocks_other_keys() {
        let league = LeagueState::new_default();
        let mut view = ViewState::default();
        handle_key(key(KeyCode::Char('q')), &mut view, &league);
        assert!(handle_key(key(KeyCode::Char('2')), &mut view, &league).is_none());
        assert_eq!(view.active_tab, TabId::Contestants);
        assert_eq!(view.mode, InputMode::Confirm(PendingConfirm::Quit));
        assert_eq!(
            handle_key(key(KeyCode::Char('q')), &mut view, &league),
            Some(UserCommand::Quit)
        );
    }
}
