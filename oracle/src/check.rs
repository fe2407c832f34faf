//! Checking a player's outbox for `oracle check`.

use crate::core::compare::{Mismatch, first_mismatch};
use crate::core::error::GenerateError;
use crate::core::item::{Item, LevelId, Outbox};
use crate::core::registry::LevelRegistry;

/// Structured check outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckOutcome {
    /// The player's outbox equals the expected one.
    Match,
    /// The outboxes differ; `expected` is the full expected outbox.
    Mismatch { expected: Outbox, at: Mismatch },
}

/// Compare `outbox` with the expected outbox of `level` for `inbox`.
pub fn check_solution(
    registry: &LevelRegistry,
    level: LevelId,
    inbox: &[Item],
    outbox: &[Item],
) -> Result<CheckOutcome, GenerateError> {
    let expected = registry.generate(level, inbox)?;
    Ok(match first_mismatch(&expected, outbox) {
        None => CheckOutcome::Match,
        Some(at) => CheckOutcome::Mismatch { expected, at },
    })
}
