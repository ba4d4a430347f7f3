// Contestant roster entries and score input parsing.

use serde::{Deserialize, Serialize};

/// Number of contestants in a freshly initialized roster.
pub const DEFAULT_ROSTER_SIZE: usize = 20;

/// A roster entry with a name and a score assigned by the group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contestant {
    /// Zero-based position assigned at initialization. Never reassigned.
    pub id: u32,
    /// Display name, user-editable.
    pub name: String,
    /// Score assigned by the group. The store does not enforce a floor.
    #[serde(default)]
    pub score: i64,
}

impl Contestant {
    /// Build the contestant at roster position `index` with the template
    /// name and a zero score.
    pub fn placeholder(index: usize) -> Self {
        Contestant {
            id: index as u32,
            name: default_name(index),
            score: 0,
        }
    }
}

/// Template name for the contestant at roster position `index`
/// ("Contestant 1" for index 0).
pub fn default_name(index: usize) -> String {
    format!("Contestant {}", index + 1)
}

/// Parse raw score input the way a lenient number field does.
///
/// Leading whitespace is skipped, an optional sign is accepted, and the
/// leading run of ASCII digits is read; anything after it is ignored
/// (`"7abc"` -> 7, `"3.9"` -> 3). Input without digits, or whose digits
/// overflow an `i64`, yields `None`.
pub fn parse_score(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits_len == 0 {
        return None;
    }

    let magnitude: i64 = rest[..digits_len].parse().ok()?;
    Some(if negative { -magnitude } else { magnitude })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
