// League domain: contestants, players, scoring, and the persisted store.

pub mod contestant;
pub mod player;
pub mod snapshot;
pub mod state;
pub mod store;

use thiserror::Error;

pub use contestant::{Contestant, DEFAULT_ROSTER_SIZE};
pub use player::{has_duplicate_picks, Player, PICKS_PER_TEAM};
pub use state::{LeagueState, LeagueSummary, UNKNOWN_CONTESTANT};
pub use store::{LeagueStore, LoadOutcome, StoreError};

/// Input the league rejects.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LeagueError {
    #[error("player name must not be empty")]
    EmptyPlayerName,

    #[error("contestant index {index} out of range (roster has {len})")]
    ContestantIndexOutOfRange { index: usize, len: usize },
}
