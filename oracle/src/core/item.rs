//! Values carried through inboxes, outboxes, and floor tiles.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Positive level number.
pub type LevelId = u32;

/// Ordered output produced by a level transform.
pub type Outbox = Vec<Item>;

/// Preset floor values for one level. `None` is an empty floor cell.
pub type TileTable = Vec<Option<Item>>;

/// A single box on the conveyor: a signed number or a one-character letter.
///
/// The derived ordering is the one comparator used by every sorting level:
/// numbers compare numerically, letters by code point, and all numbers sort
/// before all letters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Item {
    Number(i64),
    Letter(char),
}

impl Item {
    /// The numeric value, or `None` for letters.
    pub fn as_number(self) -> Option<i64> {
        match self {
            Item::Number(value) => Some(value),
            Item::Letter(_) => None,
        }
    }

    /// True for the string terminator `0`.
    pub fn is_sentinel(self) -> bool {
        self == Item::Number(0)
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Item::Number(value) => write!(f, "{}", value),
            Item::Letter(letter) => write!(f, "{}", letter),
        }
    }
}

/// Error for a command-line token that is neither an integer nor one character.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid item '{0}': expected an integer or a single letter")]
pub struct ParseItemError(pub String);

impl FromStr for Item {
    type Err = ParseItemError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        if let Ok(value) = token.parse::<i64>() {
            return Ok(Item::Number(value));
        }
        let mut chars = token.chars();
        match (chars.next(), chars.next()) {
            (Some(letter), None) if !letter.is_whitespace() => Ok(Item::Letter(letter)),
            _ => Err(ParseItemError(token.to_string())),
        }
    }
}

/// Parse a list of items from a JSON array or from whitespace/comma separated tokens.
pub fn parse_items(input: &str) -> Result<Vec<Item>, ParseItemError> {
    let trimmed = input.trim();
    if trimmed.starts_with('[') {
        return serde_json::from_str(trimmed).map_err(|_| ParseItemError(trimmed.to_string()));
    }
    trimmed
        .split(|ch: char| ch.is_whitespace() || ch == ',')
        .filter(|token| !token.is_empty())
        .map(str::parse::<Item>)
        .collect()
}

/// Render items space separated, the plain output format.
pub fn format_items(items: &[Item]) -> String {
    items
        .iter()
        .map(Item::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}
