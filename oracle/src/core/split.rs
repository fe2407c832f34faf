//! Sequence splitting shared by the grouped and string-encoded levels.

use crate::core::item::Item;

/// A string-encoded sequence whose last string has no terminating `0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("string starting at index {start} is not terminated by 0")]
pub struct UnterminatedString {
    /// Offset of the first item after the last sentinel.
    pub start: usize,
}

/// Split a zero-terminated sequence into its strings, sentinels excluded.
///
/// Every string must be followed by a `0`. An empty input has no strings.
/// A trailing fragment without its sentinel is rejected rather than emitted.
pub fn split_by_sentinel(seq: &[Item]) -> Result<Vec<&[Item]>, UnterminatedString> {
    let mut strings = Vec::new();
    let mut start = 0;
    for (index, item) in seq.iter().enumerate() {
        if item.is_sentinel() {
            strings.push(&seq[start..index]);
            start = index + 1;
        }
    }
    if start < seq.len() {
        return Err(UnterminatedString { start });
    }
    Ok(strings)
}

/// Split `seq` into consecutive groups of `group_size`.
///
/// The final group is shorter when the length is not a multiple of
/// `group_size`. Panics if `group_size` is zero.
pub fn split_fixed_groups<T>(seq: &[T], group_size: usize) -> Vec<&[T]> {
    seq.chunks(group_size).collect()
}
