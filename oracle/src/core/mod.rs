//! Deterministic, pure logic behind `generate`.
//!
//! Core modules must be free of I/O side effects. Level metadata and prime
//! factorization reach the registry only through the [`tiles::TileSource`]
//! and [`primes::PrimeFactors`] traits.

pub mod compare;
pub mod error;
pub mod item;
pub mod primes;
pub mod registry;
pub mod split;
pub mod tiles;
pub mod transforms;
