//! Stable exit codes for oracle CLI commands.

use crate::core::error::GenerateError;

/// Command succeeded; for `check` and `verify`, every outbox matched.
pub const OK: i32 = 0;
/// Command failed due to invalid input, config, level data, or other errors.
pub const INVALID: i32 = 1;
/// `oracle check` or `oracle verify` found an outbox that differs.
pub const MISMATCH: i32 = 2;
/// The requested level has no transform.
pub const NOT_IMPLEMENTED: i32 = 3;

/// Exit code for a failed `generate`: a missing transform is an answer of
/// its own, a malformed inbox is invalid input.
pub fn for_generate_error(err: &GenerateError) -> i32 {
    match err {
        GenerateError::NotImplemented(_) => NOT_IMPLEMENTED,
        GenerateError::MalformedInput { .. } => INVALID,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::InputError;

    #[test]
    fn generate_errors_map_to_distinct_codes() {
        assert_eq!(
            for_generate_error(&GenerateError::NotImplemented(30)),
            NOT_IMPLEMENTED
        );
        let malformed = GenerateError::MalformedInput {
            level: 24,
            reason: InputError::DivisionByZero { index: 1 },
        };
        assert_eq!(for_generate_error(&malformed), INVALID);
    }
}
