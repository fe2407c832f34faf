//! Reference oracle for numbered puzzle levels.
//!
//! Given a level number and an inbox, the oracle computes the outbox a correct
//! solution must produce, so player-authored solutions can be checked against
//! ground truth. The crate keeps a strict separation:
//!
//! - **[`core`]**: Pure, deterministic logic (items, splitters, per-level
//!   transforms, the level registry). No I/O, fully testable in isolation.
//! - **[`io`]**: Side-effecting operations (config file, level catalog).
//!
//! Orchestration modules ([`session`], [`check`], [`verify`]) combine the two
//! to implement CLI commands.

pub mod check;
pub mod core;
pub mod exit_codes;
pub mod io;
pub mod logging;
pub mod session;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
pub mod verify;
