//! Floor tile tables for the memory-indexed levels.

use std::collections::BTreeMap;

use crate::core::item::{Item, LevelId, TileTable};

/// Supplies the preset floor tiles of a level, if it has any.
pub trait TileSource {
    fn tiles(&self, level: LevelId) -> Option<&[Option<Item>]>;
}

impl TileSource for BTreeMap<LevelId, TileTable> {
    fn tiles(&self, level: LevelId) -> Option<&[Option<Item>]> {
        self.get(&level).map(Vec::as_slice)
    }
}

/// A source with no tables at all.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoTiles;

impl TileSource for NoTiles {
    fn tiles(&self, _level: LevelId) -> Option<&[Option<Item>]> {
        None
    }
}
