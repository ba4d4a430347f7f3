// Messages between the input handler and the app layer.

use sanremo_core::league::PICKS_PER_TEAM;

/// Tabs of the main panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TabId {
    Contestants,
    Scores,
    Players,
    Ranking,
}

impl TabId {
    pub const ALL: [TabId; 4] = [TabId::Contestants, TabId::Scores, TabId::Players, TabId::Ranking];

    pub fn label(self) -> &'static str {
        match self {
            TabId::Contestants => "Contestants",
            TabId::Scores => "Scores",
            TabId::Players => "Players",
            TabId::Ranking => "Ranking",
        }
    }

    pub fn next(self) -> TabId {
        match self {
            TabId::Contestants => TabId::Scores,
            TabId::Scores => TabId::Players,
            TabId::Players => TabId::Ranking,
            TabId::Ranking => TabId::Contestants,
        }
    }
}

/// A league mutation (or quit) requested by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserCommand {
    RenameContestant { index: usize, name: String },
    SetScore { index: usize, raw: String },
    AddPlayer { name: String, picks: [u32; PICKS_PER_TEAM] },
    RemovePlayer { id: i64 },
    ResetAll,
    Quit,
}
