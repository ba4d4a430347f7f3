// League state: contestant roster, players, score recomputation and ranking.
//
// Every operation here is a synchronous, total update of an owned
// `LeagueState`. Persistence is layered on top by `LeagueStore`.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::contestant::{default_name, parse_score, Contestant, DEFAULT_ROSTER_SIZE};
use super::player::{Player, PICKS_PER_TEAM};
use super::LeagueError;

/// Label shown for a pick whose contestant no longer exists.
pub const UNKNOWN_CONTESTANT: &str = "??";

/// The full league: roster plus players, in display (insertion) order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeagueState {
    pub contestants: Vec<Contestant>,
    #[serde(default)]
    pub players: Vec<Player>,
}

/// Headline numbers for the status bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeagueSummary {
    pub contestant_count: usize,
    pub player_count: usize,
    /// Name of the top-ranked player, `None` when there are no players.
    pub leader_name: Option<String>,
    /// Score of the top-ranked player, `None` when there are no players.
    pub leader_score: Option<i64>,
}

impl Default for LeagueState {
    fn default() -> Self {
        Self::new_default()
    }
}

impl LeagueState {
    /// A fresh league: the default roster of templated contestants, all at
    /// zero, and no players.
    pub fn new_default() -> Self {
        LeagueState {
            contestants: (0..DEFAULT_ROSTER_SIZE).map(Contestant::placeholder).collect(),
            players: Vec::new(),
        }
    }

    // -----------------------------------------------------------------------
    // Contestants
    // -----------------------------------------------------------------------

    /// Rename the contestant at `index`. The name is trimmed; an empty
    /// result falls back to the template name for that position.
    pub fn rename_contestant(&mut self, index: usize, new_name: &str) -> Result<(), LeagueError> {
        let contestant = self.contestant_at_mut(index)?;
        let trimmed = new_name.trim();
        contestant.name = if trimmed.is_empty() {
            default_name(index)
        } else {
            trimmed.to_string()
        };
        debug!("Renamed contestant {} to '{}'", index, contestant.name);
        Ok(())
    }

    /// Set the score of the contestant at `index` from raw user input.
    ///
    /// Unparseable input counts as 0. Negative values are kept as given.
    /// All player totals are recomputed afterwards.
    pub fn set_contestant_score(&mut self, index: usize, raw_value: &str) -> Result<i64, LeagueError> {
        let score = parse_score(raw_value).unwrap_or(0);
        self.contestant_at_mut(index)?.score = score;
        self.recalc_all_scores();
        Ok(score)
    }

    /// Resolve a contestant id to its display name, or the `"??"`
    /// placeholder when no contestant has that id.
    pub fn contestant_name(&self, id: u32) -> &str {
        self.contestants
            .iter()
            .find(|c| c.id == id)
            .map(|c| c.name.as_str())
            .unwrap_or(UNKNOWN_CONTESTANT)
    }

    /// A player's picks resolved to contestant names, in pick order.
    pub fn team_names(&self, player: &Player) -> Vec<&str> {
        player
            .picks
            .iter()
            .map(|id| self.contestant_name(*id))
            .collect()
    }

    fn contestant_at_mut(&mut self, index: usize) -> Result<&mut Contestant, LeagueError> {
        let len = self.contestants.len();
        self.contestants
            .get_mut(index)
            .ok_or(LeagueError::ContestantIndexOutOfRange { index, len })
    }

    // -----------------------------------------------------------------------
    // Players
    // -----------------------------------------------------------------------

    /// Add a player with the given picks. Rejects a blank name.
    ///
    /// `now_ms` seeds the id; if it would collide with (or precede) an
    /// existing id the next free id after the current maximum is used.
    pub fn add_player(
        &mut self,
        name: &str,
        picks: [u32; PICKS_PER_TEAM],
        now_ms: i64,
    ) -> Result<&Player, LeagueError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(LeagueError::EmptyPlayerName);
        }

        let id = self.next_player_id(now_ms);
        let mut player = Player {
            id,
            name: name.to_string(),
            picks: picks.to_vec(),
            total_score: 0,
        };
        player.total_score = self.team_score(&player.picks);
        info!(
            "Added player '{}' (id={}) with total {}",
            player.name, player.id, player.total_score
        );

        self.players.push(player);
        let idx = self.players.len() - 1;
        Ok(&self.players[idx])
    }

    /// Remove the player with `player_id`. Returns `false` (and changes
    /// nothing) if no such player exists.
    pub fn remove_player(&mut self, player_id: i64) -> bool {
        let Some(idx) = self.players.iter().position(|p| p.id == player_id) else {
            return false;
        };
        let removed = self.players.remove(idx);
        info!("Removed player '{}' (id={})", removed.name, removed.id);
        self.recalc_all_scores();
        true
    }

    /// Look up a player by id.
    pub fn player(&self, player_id: i64) -> Option<&Player> {
        self.players.iter().find(|p| p.id == player_id)
    }

    fn next_player_id(&self, now_ms: i64) -> i64 {
        match self.players.iter().map(|p| p.id).max() {
            Some(max) if now_ms <= max => match max.checked_add(1) {
                Some(next) => next,
                None => self.first_free_id(),
            },
            _ => now_ms,
        }
    }

    /// Smallest non-negative id no player holds.
    fn first_free_id(&self) -> i64 {
        let taken: std::collections::HashSet<i64> = self.players.iter().map(|p| p.id).collect();
        (0..).find(|id| !taken.contains(id)).unwrap_or_default()
    }

    // -----------------------------------------------------------------------
    // Scoring and ranking
    // -----------------------------------------------------------------------

    /// Recompute every player's `total_score` from the current contestant
    /// scores. Unresolved pick ids contribute 0.
    pub fn recalc_all_scores(&mut self) {
        let scores: HashMap<u32, i64> = self.contestants.iter().map(|c| (c.id, c.score)).collect();
        for player in &mut self.players {
            player.total_score = sum_picks(&scores, &player.picks);
        }
    }

    /// Sum of the scores of `picks` against the current roster.
    pub fn team_score(&self, picks: &[u32]) -> i64 {
        let scores: HashMap<u32, i64> = self.contestants.iter().map(|c| (c.id, c.score)).collect();
        sum_picks(&scores, picks)
    }

    /// Players ordered by descending total, ties kept in insertion order.
    /// The stored order of `players` is left untouched.
    pub fn ranked_players(&self) -> Vec<&Player> {
        let mut ranked: Vec<&Player> = self.players.iter().collect();
        ranked.sort_by(|a, b| b.total_score.cmp(&a.total_score));
        ranked
    }

    pub fn summary(&self) -> LeagueSummary {
        let leader = self.ranked_players().into_iter().next();
        LeagueSummary {
            contestant_count: self.contestants.len(),
            player_count: self.players.len(),
            leader_name: leader.map(|p| p.name.clone()),
            leader_score: leader.map(|p| p.total_score),
        }
    }
}

/// Totals saturate at the i64 bounds.
fn sum_picks(scores: &HashMap<u32, i64>, picks: &[u32]) -> i64 {
    picks
        .iter()
        .map(|id| scores.get(id).copied().unwrap_or(0))
        .fold(0i64, i64::saturating_add)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
