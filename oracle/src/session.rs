//! Process-wide oracle state: config, level catalog, and registry.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::debug;

use crate::core::primes::TrialDivision;
use crate::core::registry::LevelRegistry;
use crate::io::config::{OracleConfig, load_config};
use crate::io::levels::LevelCatalog;

/// Everything a command needs, built once at startup.
#[derive(Debug)]
pub struct Session {
    pub config: OracleConfig,
    pub catalog: LevelCatalog,
    pub registry: LevelRegistry,
}

impl Session {
    /// Load config from `config_path` and the catalog it points at.
    pub fn open(config_path: &Path) -> Result<Self> {
        let config = load_config(config_path).context("load config")?;
        let catalog = match config.resolved_levels_path(config_path) {
            Some(levels_path) => {
                debug!(path = %levels_path.display(), "loading level catalog");
                LevelCatalog::load(&levels_path)?
            }
            None => LevelCatalog::bundled()?,
        };
        Ok(Self::new(config, catalog))
    }

    pub fn new(config: OracleConfig, catalog: LevelCatalog) -> Self {
        let registry = LevelRegistry::build(&catalog, Arc::new(TrialDivision));
        Self {
            config,
            catalog,
            registry,
        }
    }
}
