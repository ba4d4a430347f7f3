// Application layer: owns the league store and the TUI view state, and
// applies user commands to the store.

use tracing::{info, warn};

use sanremo_core::config::Config;
use sanremo_core::db::SnapshotStore;
use sanremo_core::league::{LeagueStore, StoreError};

use crate::protocol::UserCommand;
use crate::tui::ViewState;

/// Everything the TUI loop needs: configuration, league data and the
/// presentational state.
pub struct App<S: SnapshotStore> {
    pub config: Config,
    pub store: LeagueStore<S>,
    pub view: ViewState,
}

impl<S: SnapshotStore> App<S> {
    pub fn new(config: Config, store: LeagueStore<S>) -> Self {
        App {
            config,
            store,
            view: ViewState::default(),
        }
    }

    /// Apply one user command to the store.
    ///
    /// Returns `Ok(true)` when the app should quit. Rejected input becomes a
    /// status message; a failed persist is returned as an error.
    pub fn handle_user_command(&mut self, cmd: UserCommand) -> anyhow::Result<bool> {
        match cmd {
            UserCommand::RenameContestant { index, name } => {
                let result = self.store.rename_contestant(index, &name);
                if self.report(result)?.is_some() {
                    self.view.info("Contestants updated!");
                }
            }
            UserCommand::SetScore { index, raw } => {
                // Applied on every keystroke; success stays quiet.
                let result = self.store.set_contestant_score(index, &raw);
                self.report(result)?;
            }
            UserCommand::AddPlayer { name, picks } => {
                let result = self.store.add_player(&name, picks);
                if let Some(player) = self.report(result)? {
                    self.view.info(format!("Player \"{}\" added!", player.name));
                    self.view.player_cursor = self.store.players().len().saturating_sub(1);
                }
            }
            UserCommand::RemovePlayer { id } => {
                let Some(name) = self.store.state().player(id).map(|p| p.name.clone()) else {
                    warn!("Remove requested for unknown player id {}", id);
                    return Ok(false);
                };
                if self.store.remove_player(id)? {
                    self.view.info(format!("Player \"{}\" removed.", name));
                }
            }
            UserCommand::ResetAll => {
                self.store.reset_all()?;
                self.view = ViewState {
                    active_tab: self.view.active_tab,
                    ..ViewState::default()
                };
                self.view.info("Reset complete.");
            }
            UserCommand::Quit => {
                info!("Quit command received, shutting down");
                return Ok(true);
            }
        }

        self.view.clamp_cursors(self.store.state());
        Ok(false)
    }

    /// Turn a rejected input into an error status; propagate persistence
    /// failures.
    fn report<T>(&mut self, result: Result<T, StoreError>) -> anyhow::Result<Option<T>> {
        match result {
            Ok(value) => Ok(Some(value)),
            Err(StoreError::League(e)) => {
                warn!("Command rejected: {}", e);
                self.view.error(e.to_string());
                Ok(None)
            }
            Err(StoreError::Persist(e)) => Err(e),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
