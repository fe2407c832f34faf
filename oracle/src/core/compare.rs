//! Comparison of a produced outbox against the expected one.

use crate::core::item::Item;

/// First position where two outboxes disagree.
///
/// `None` on either side means that outbox ended before `index`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mismatch {
    pub index: usize,
    pub expected: Option<Item>,
    pub actual: Option<Item>,
}

/// Return the first mismatch between `expected` and `actual`, if any.
pub fn first_mismatch(expected: &[Item], actual: &[Item]) -> Option<Mismatch> {
    let len = expected.len().max(actual.len());
    (0..len)
        .map(|index| Mismatch {
            index,
            expected: expected.get(index).copied(),
            actual: actual.get(index).copied(),
        })
        .find(|slot| slot.expected != slot.actual)
}
