// League state store: the single source of truth for presentation code.
//
// Wraps an owned `LeagueState` together with a `SnapshotStore` backend and
// persists the full snapshot after every mutation.

use anyhow::Context;
use thiserror::Error;
use tracing::{debug, error, info, warn};

use crate::db::SnapshotStore;

use super::contestant::Contestant;
use super::player::{Player, PICKS_PER_TEAM};
use super::snapshot::{self, SnapshotError, SNAPSHOT_KEY};
use super::state::{LeagueState, LeagueSummary};
use super::LeagueError;

/// Failure of a store operation.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The input was rejected; nothing changed.
    #[error(transparent)]
    League(#[from] LeagueError),

    /// The snapshot could not be written.
    #[error(transparent)]
    Persist(#[from] anyhow::Error),
}

/// How `LeagueStore::load` obtained its state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// A stored snapshot was restored.
    Restored,
    /// No snapshot existed; a default league was created.
    Fresh,
    /// The stored snapshot was unusable and was replaced by a default league.
    Recovered,
}

/// Owns the league state and the slot it is persisted to.
pub struct LeagueStore<S: SnapshotStore> {
    backend: S,
    key: String,
    state: LeagueState,
}

impl<S: SnapshotStore> LeagueStore<S> {
    /// Create a default league in `backend` and persist it immediately,
    /// replacing whatever the slot held.
    pub fn initialize_default(backend: S) -> anyhow::Result<Self> {
        Self::initialize_default_at(backend, SNAPSHOT_KEY)
    }

    /// Like `initialize_default`, using a custom slot key.
    pub fn initialize_default_at(backend: S, key: &str) -> anyhow::Result<Self> {
        let store = LeagueStore {
            backend,
            key: key.to_string(),
            state: LeagueState::new_default(),
        };
        store.persist()?;
        info!("Initialized default league ({} contestants)", store.state.contestants.len());
        Ok(store)
    }

    /// Restore the league from `backend`, falling back to a fresh default
    /// league when the slot is empty or its snapshot is unusable.
    pub fn load(backend: S) -> anyhow::Result<(Self, LoadOutcome)> {
        Self::load_at(backend, SNAPSHOT_KEY)
    }

    /// Like `load`, using a custom slot key.
    pub fn load_at(backend: S, key: &str) -> anyhow::Result<(Self, LoadOutcome)> {
        let raw = backend
            .read(key)
            .with_context(|| format!("failed to read snapshot slot '{key}'"))?;

        let Some(raw) = raw else {
            info!("No saved league found, starting fresh");
            return Ok((Self::initialize_default_at(backend, key)?, LoadOutcome::Fresh));
        };

        match snapshot::decode(&raw) {
            Ok(mut state) => {
                state.recalc_all_scores();
                info!(
                    "Restored league: {} contestants, {} players",
                    state.contestants.len(),
                    state.players.len()
                );
                let store = LeagueStore {
                    backend,
                    key: key.to_string(),
                    state,
                };
                Ok((store, LoadOutcome::Restored))
            }
            Err(SnapshotError::NoContestants) => {
                warn!("Saved league has no contestants, resetting to defaults");
                Ok((Self::initialize_default_at(backend, key)?, LoadOutcome::Recovered))
            }
            Err(e) => {
                error!("Failed to parse saved league, resetting to defaults: {}", e);
                Ok((Self::initialize_default_at(backend, key)?, LoadOutcome::Recovered))
            }
        }
    }

    /// Write the full snapshot, overwriting the previous one.
    pub fn persist(&self) -> anyhow::Result<()> {
        let json = snapshot::encode(&self.state).context("failed to serialize league snapshot")?;
        self.backend
            .write(&self.key, &json)
            .with_context(|| format!("failed to persist snapshot to slot '{}'", self.key))?;
        debug!("Persisted league snapshot ({} bytes)", json.len());
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    pub fn state(&self) -> &LeagueState {
        &self.state
    }

    pub fn contestants(&self) -> &[Contestant] {
        &self.state.contestants
    }

    pub fn players(&self) -> &[Player] {
        &self.state.players
    }

    pub fn ranked_players(&self) -> Vec<&Player> {
        self.state.ranked_players()
    }

    pub fn summary(&self) -> LeagueSummary {
        self.state.summary()
    }

    pub fn contestant_name(&self, id: u32) -> &str {
        self.state.contestant_name(id)
    }

    pub fn team_names(&self, player: &Player) -> Vec<&str> {
        self.state.team_names(player)
    }

    // -----------------------------------------------------------------------
    // Mutations (each persists on success)
    // -----------------------------------------------------------------------

    pub fn rename_contestant(&mut self, index: usize, new_name: &str) -> Result<(), StoreError> {
        self.state.rename_contestant(index, new_name)?;
        self.persist()?;
        Ok(())
    }

    /// Apply the rename rule to every `(index, name)` pair, then persist
    /// once. Any out-of-range index rejects the whole batch.
    pub fn rename_contestants<'a, I>(&mut self, names: I) -> Result<(), StoreError>
    where
        I: IntoIterator<Item = (usize, &'a str)>,
    {
        let names: Vec<(usize, &str)> = names.into_iter().collect();
        let len = self.state.contestants.len();
        if let Some(&(index, _)) = names.iter().find(|(index, _)| *index >= len) {
            return Err(LeagueError::ContestantIndexOutOfRange { index, len }.into());
        }
        for (index, name) in names {
            self.state.rename_contestant(index, name)?;
        }
        self.persist()?;
        Ok(())
    }

    /// Set a contestant's score from raw input; returns the stored value.
    pub fn set_contestant_score(&mut self, index: usize, raw_value: &str) -> Result<i64, StoreError> {
        let score = self.state.set_contestant_score(index, raw_value)?;
        self.persist()?;
        Ok(score)
    }

    /// Add a player, using the wall clock to seed its id.
    pub fn add_player(&mut self, name: &str, picks: [u32; PICKS_PER_TEAM]) -> Result<Player, StoreError> {
        let now_ms = chrono::Utc::now().timestamp_millis();
        let player = self.state.add_player(name, picks, now_ms)?.clone();
        self.persist()?;
        Ok(player)
    }

    /// Remove a player by id. Returns whether a player was removed; a
    /// missing id changes nothing and writes nothing.
    pub fn remove_player(&mut self, player_id: i64) -> anyhow::Result<bool> {
        if !self.state.remove_player(player_id) {
            debug!("remove_player: no player with id {}", player_id);
            return Ok(false);
        }
        self.persist()?;
        Ok(true)
    }

    pub fn recalc_all_scores(&mut self) -> anyhow::Result<()> {
        self.state.recalc_all_scores();
        self.persist()
    }

    /// Discard the stored snapshot and start over with a default league.
    pub fn reset_all(&mut self) -> anyhow::Result<()> {
        self.backend
            .remove(&self.key)
            .with_context(|| format!("failed to clear snapshot slot '{}'", self.key))?;
        self.state = LeagueState::new_default();
        self.persist()?;
        info!("League reset to defaults");
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
