// Players and their drafted teams.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Number of contestants each player drafts.
pub const PICKS_PER_TEAM: usize = 5;

/// A participant who drafts five contestants and accrues their summed score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    /// Unique identifier. Only uniqueness is guaranteed, not ordering.
    pub id: i64,
    /// Non-empty display name.
    pub name: String,
    /// Contestant ids in draft order. May repeat.
    #[serde(default)]
    pub picks: Vec<u32>,
    /// Cached sum of the picked contestants' scores. Recomputed, never
    /// patched.
    #[serde(default)]
    pub total_score: i64,
}

/// Returns `true` if the same contestant appears more than once in `picks`.
///
/// Duplicates are allowed; callers use this to ask the user for
/// confirmation before adding the player.
pub fn has_duplicate_picks(picks: &[u32]) -> bool {
    let mut seen = HashSet::with_capacity(picks.len());
    picks.iter().any(|id| !seen.insert(*id))
}
