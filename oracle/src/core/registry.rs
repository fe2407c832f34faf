//! Immutable level-to-transform dispatch table.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::core::error::{GenerateError, InputError};
use crate::core::item::{Item, LevelId, Outbox};
use crate::core::primes::PrimeFactors;
use crate::core::tiles::TileSource;
use crate::core::transforms;

/// A level's pure inbox to outbox function.
pub type Transform = Box<dyn Fn(&[Item]) -> Result<Outbox, InputError> + Send + Sync>;

/// Level whose floor tiles drive the lookup transform.
pub const STORAGE_FLOOR: LevelId = 29;

/// What the registry knows about one level.
pub enum LevelEntry {
    Transform(Transform),
    /// The level exists but its expected output has not been authored.
    Unimplemented,
}

impl LevelEntry {
    pub fn is_implemented(&self) -> bool {
        matches!(self, LevelEntry::Transform(_))
    }
}

impl fmt::Debug for LevelEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LevelEntry::Transform(_) => f.write_str("Transform(..)"),
            LevelEntry::Unimplemented => f.write_str("Unimplemented"),
        }
    }
}

fn transform<F>(f: F) -> LevelEntry
where
    F: Fn(&[Item]) -> Result<Outbox, InputError> + Send + Sync + 'static,
{
    LevelEntry::Transform(Box::new(f))
}

/// Level table built once from its providers and never modified afterwards.
#[derive(Debug)]
pub struct LevelRegistry {
    entries: BTreeMap<LevelId, LevelEntry>,
}

impl LevelRegistry {
    /// Build the table, capturing tile tables from `tiles` and sharing `primes`.
    ///
    /// A lookup level without a tile table is registered as unimplemented.
    pub fn build(tiles: &dyn TileSource, primes: Arc<dyn PrimeFactors>) -> Self {
        let storage_floor = match tiles.tiles(STORAGE_FLOOR) {
            Some(table) => transform(transforms::tile_lookup(table.to_vec())),
            None => {
                warn!(
                    level = STORAGE_FLOOR,
                    "no floor tiles for lookup level; marking unimplemented"
                );
                LevelEntry::Unimplemented
            }
        };

        let entries = BTreeMap::from([
            (1, transform(transforms::copy)),
            (2, transform(transforms::copy)),
            (3, transform(transforms::spell_bug)),
            (4, transform(transforms::reverse_sort_pairs)),
            (6, transform(transforms::sum_pairs)),
            (7, transform(transforms::drop_zeros)),
            (8, transform(transforms::scale(3))),
            (9, transform(transforms::keep_zeros)),
            (10, transform(transforms::scale(8))),
            (11, transform(transforms::differences_both_ways)),
            (12, transform(transforms::scale(40))),
            (13, transform(transforms::equal_pairs)),
            (14, transform(transforms::max_pairs)),
            (16, transform(transforms::absolute)),
            (17, transform(transforms::opposite_signs)),
            (19, transform(transforms::countdown)),
            (20, transform(transforms::multiply_pairs)),
            (21, transform(transforms::sum_strings)),
            (22, transform(transforms::fibonacci_past)),
            (23, transform(transforms::min_strings)),
            (24, transform(transforms::remainder_pairs)),
            (25, transform(transforms::triangular)),
            (26, transform(transforms::floor_divide_pairs)),
            (28, transform(transforms::sort_triples)),
            (STORAGE_FLOOR, storage_floor),
            (30, LevelEntry::Unimplemented),
            (31, transform(transforms::reverse_strings)),
            (32, LevelEntry::Unimplemented),
            (34, LevelEntry::Unimplemented),
            (35, LevelEntry::Unimplemented),
            (36, LevelEntry::Unimplemented),
            (37, LevelEntry::Unimplemented),
            (38, LevelEntry::Unimplemented),
            (39, LevelEntry::Unimplemented),
            (40, transform(transforms::prime_factors(primes))),
            (41, transform(transforms::sort_strings)),
        ]);

        debug!(levels = entries.len(), "level registry built");
        Self { entries }
    }

    pub fn entry(&self, level: LevelId) -> Option<&LevelEntry> {
        self.entries.get(&level)
    }

    pub fn is_implemented(&self, level: LevelId) -> bool {
        self.entry(level).is_some_and(LevelEntry::is_implemented)
    }

    /// Registered levels in ascending order.
    pub fn levels(&self) -> impl Iterator<Item = (LevelId, &LevelEntry)> + '_ {
        self.entries.iter().map(|(level, entry)| (*level, entry))
    }

    /// Compute the expected outbox of `level` for `inbox`.
    ///
    /// Unknown and unimplemented levels both yield
    /// [`GenerateError::NotImplemented`].
    pub fn generate(&self, level: LevelId, inbox: &[Item]) -> Result<Outbox, GenerateError> {
        let Some(LevelEntry::Transform(apply)) = self.entries.get(&level) else {
            debug!(level, "no transform registered");
            return Err(GenerateError::NotImplemented(level));
        };
        debug!(level, inbox_len = inbox.len(), "generating outbox");
        apply(inbox).map_err(|reason| GenerateError::MalformedInput { level, reason })
    }
}
