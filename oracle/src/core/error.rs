//! Error types surfaced by `LevelRegistry::generate`.

use thiserror::Error;

use crate::core::item::{Item, LevelId};
use crate::core::split::UnterminatedString;

/// Failure to produce an outbox for a level.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerateError {
    /// The level is unknown, or registered without a transform.
    #[error("level {0} is not implemented")]
    NotImplemented(LevelId),

    /// The inbox breaks a precondition of the level's transform.
    #[error("malformed inbox for level {level}: {reason}")]
    MalformedInput { level: LevelId, reason: InputError },
}

impl GenerateError {
    pub fn is_not_implemented(&self) -> bool {
        matches!(self, GenerateError::NotImplemented(_))
    }
}

/// Precondition violated by an inbox. Indices refer to inbox positions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("inbox length {len} is not a multiple of {group_size}")]
    UngroupedLength { len: usize, group_size: usize },

    #[error("string starting at index {start} is not terminated by 0")]
    UnterminatedString { start: usize },

    #[error("string starting at index {start} is empty")]
    EmptyString { start: usize },

    #[error("expected a number at index {index}, found '{found}'")]
    ExpectedNumber { index: usize, found: Item },

    #[error("division by zero at index {index}")]
    DivisionByZero { index: usize },

    #[error("arithmetic overflow at index {index}")]
    Overflow { index: usize },

    #[error("tile {tile} at index {index} is outside the floor (0..{len})")]
    TileOutOfRange { index: usize, tile: i64, len: usize },

    #[error("tile {tile} at index {index} is an empty floor cell")]
    EmptyTile { index: usize, tile: i64 },

    #[error("cannot factor negative value {value} at index {index}")]
    NegativeFactorTarget { index: usize, value: i64 },
}

impl From<UnterminatedString> for InputError {
    fn from(err: UnterminatedString) -> Self {
        InputError::UnterminatedString { start: err.start }
    }
}
