// Snapshot encoding: the JSON document stored in the durable slot.
//
// {
//   "contestants": [ { "id", "name", "score" }, ... ],
//   "players":     [ { "id", "name", "picks", "totalScore" }, ... ]
// }

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;
use tracing::warn;

use super::contestant::Contestant;
use super::player::Player;
use super::state::LeagueState;

/// Slot key for the snapshot. Bump the version suffix whenever the
/// document shape changes so old and new formats never collide.
pub const SNAPSHOT_KEY: &str = "fantasanremo_league_v1";

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("snapshot is not valid league JSON: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("snapshot has no contestants")]
    NoContestants,
}

/// Serialize the full state, derived totals included.
pub fn encode(state: &LeagueState) -> serde_json::Result<String> {
    serde_json::to_string(state)
}

/// Parse a stored snapshot.
///
/// A document whose `contestants` field is missing, not an array, or empty
/// is rejected as `NoContestants`. Players are taken as stored: missing
/// optional fields fall back to their defaults, and an entry that cannot be
/// read as a player is dropped with a warning while the rest of the league
/// is kept.
pub fn decode(raw: &str) -> Result<LeagueState, SnapshotError> {
    let value: Value = serde_json::from_str(raw)?;
    let Value::Object(mut doc) = value else {
        return Err(SnapshotError::NoContestants);
    };

    let contestants = match doc.remove("contestants") {
        Some(Value::Array(list)) if !list.is_empty() => {
            serde_json::from_value::<Vec<Contestant>>(Value::Array(list))?
        }
        _ => return Err(SnapshotError::NoContestants),
    };

    let players = match doc.remove("players") {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(entries)) => decode_players(&entries),
        Some(other) => {
            warn!("Ignoring non-array players field in snapshot: {}", other);
            Vec::new()
        }
    };

    Ok(LeagueState { contestants, players })
}

fn decode_players(entries: &[Value]) -> Vec<Player> {
    entries
        .iter()
        .enumerate()
        .filter_map(|(i, entry)| match Player::deserialize(entry) {
            Ok(player) => Some(player),
            Err(e) => {
                warn!("Dropping unreadable player #{} from snapshot: {}", i, e);
                None
            }
        })
        .collect()
}
