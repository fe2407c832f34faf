//! Level catalog: names, floor tiles, and worked examples.
//!
//! The catalog is JSON validated against `schemas/levels/v1.schema.json`
//! before deserialization. A copy ships inside the binary.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow, bail};
use jsonschema::Draft;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::core::item::{Item, LevelId, TileTable};
use crate::core::tiles::TileSource;

const LEVELS_SCHEMA: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../schemas/levels/v1.schema.json"
));
const BUNDLED_LEVELS: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/data/levels.json"));

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Level {
    pub number: LevelId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub floor: Option<Floor>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub examples: Vec<Example>,
}

/// Preset floor layout. `null` tiles are empty cells.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Floor {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub columns: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rows: Option<u32>,
    pub tiles: TileTable,
}

/// A known inbox and the outbox a correct solution produces for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Example {
    pub inbox: Vec<Item>,
    pub outbox: Vec<Item>,
}

/// Levels sorted by number, numbers unique.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelCatalog {
    levels: Vec<Level>,
}

impl LevelCatalog {
    /// The catalog compiled into the binary.
    pub fn bundled() -> Result<Self> {
        Self::from_json(BUNDLED_LEVELS).context("load bundled level catalog")
    }

    /// Read and validate a catalog file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents =
            fs::read_to_string(path).with_context(|| format!("read levels {}", path.display()))?;
        Self::from_json(&contents).with_context(|| format!("load levels {}", path.display()))
    }

    /// Parse a catalog: schema conformance, then semantic invariants.
    pub fn from_json(contents: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(contents).context("parse levels json")?;
        validate_schema(&value)?;
        let mut levels: Vec<Level> =
            serde_json::from_value(value).context("deserialize levels")?;
        levels.sort_by_key(|level| level.number);
        let errors = validate_levels(&levels);
        if !errors.is_empty() {
            bail!("level catalog invariant violations:\n- {}", errors.join("\n- "));
        }
        Ok(Self { levels })
    }

    pub fn levels(&self) -> &[Level] {
        &self.levels
    }

    pub fn level(&self, number: LevelId) -> Option<&Level> {
        self.levels
            .binary_search_by_key(&number, |level| level.number)
            .ok()
            .map(|index| &self.levels[index])
    }

    pub fn name(&self, number: LevelId) -> Option<&str> {
        self.level(number).map(|level| level.name.as_str())
    }
}

impl TileSource for LevelCatalog {
    fn tiles(&self, level: LevelId) -> Option<&[Option<Item>]> {
        self.level(level)?
            .floor
            .as_ref()
            .map(|floor| floor.tiles.as_slice())
    }
}

/// Validate a JSON instance against the catalog schema (Draft 2020-12).
fn validate_schema(instance: &Value) -> Result<()> {
    let schema: Value = serde_json::from_str(LEVELS_SCHEMA).context("parse levels schema")?;
    let compiled = jsonschema::options()
        .with_draft(Draft::Draft202012)
        .build(&schema)
        .map_err(|err| anyhow!("invalid levels schema: {}", err))?;
    let messages: Vec<String> = compiled
        .iter_errors(instance)
        .map(|err| err.to_string())
        .collect();
    if !messages.is_empty() {
        bail!("levels schema validation failed:\n- {}", messages.join("\n- "));
    }
    Ok(())
}

/// Invariants the schema cannot express. Expects `levels` sorted by number.
fn validate_levels(levels: &[Level]) -> Vec<String> {
    let mut errors = Vec::new();
    let mut seen = HashSet::new();
    for level in levels {
        if !seen.insert(level.number) {
            errors.push(format!("duplicate level number {}", level.number));
        }
        if level.name.trim().is_empty() {
            errors.push(format!("level {}: name must be non-empty", level.number));
        }
        if let Some(floor) = &level.floor
            && let (Some(columns), Some(rows)) = (floor.columns, floor.rows)
        {
            let cells = columns as usize * rows as usize;
            if floor.tiles.len() > cells {
                errors.push(format!(
                    "level {}: {} tiles do not fit a {}x{} floor",
                    level.number,
                    floor.tiles.len(),
                    columns,
                    rows
                ));
            }
        }
    }
    errors
}
