//! I/O helpers for oracle commands.

pub mod config;
pub mod levels;
