//! Oracle configuration stored in `oracle.toml`.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};

/// Default config file name, resolved against the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "oracle.toml";

/// Oracle configuration (TOML).
///
/// Missing fields default to the bundled catalog and plain output.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct OracleConfig {
    /// Level catalog to load instead of the bundled one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub levels_path: Option<PathBuf>,

    /// How outboxes are printed.
    pub output: OutputFormat,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Space separated items.
    #[default]
    Plain,
    /// A JSON array.
    Json,
}

impl OracleConfig {
    pub fn validate(&self) -> Result<()> {
        if let Some(path) = &self.levels_path
            && path.as_os_str().is_empty()
        {
            return Err(anyhow!("levels_path must be non-empty when set"));
        }
        Ok(())
    }

    /// Resolve `levels_path` relative to the directory holding the config file.
    pub fn resolved_levels_path(&self, config_path: &Path) -> Option<PathBuf> {
        let levels_path = self.levels_path.as_ref()?;
        if levels_path.is_absolute() {
            return Some(levels_path.clone());
        }
        let base = config_path.parent().unwrap_or_else(|| Path::new(""));
        Some(base.join(levels_path))
    }
}

/// Load config from a TOML file.
///
/// If the file is missing, returns `OracleConfig::default()`.
pub fn load_config(path: &Path) -> Result<OracleConfig> {
    if !path.exists() {
        let cfg = OracleConfig::default();
        cfg.validate()?;
        return Ok(cfg);
    }
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: OracleConfig =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    cfg.validate()?;
    Ok(cfg)
}

/// Atomically write config to disk (temp file + rename).
pub fn write_config(path: &Path, cfg: &OracleConfig) -> Result<()> {
    cfg.validate()?;
    let mut buf = toml::to_string_pretty(cfg).context("serialize config toml")?;
    buf.push('\n');
    write_atomic(path, &buf)
}

fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    let parent = path
        .parent()
        .with_context(|| format!("config path missing parent {}", path.display()))?;
    fs::create_dir_all(parent).with_context(|| format!("create directory {}", parent.display()))?;
    let tmp_path = path.with_extension("toml.tmp");
    fs::write(&tmp_path, contents)
        .with_context(|| format!("write temp config {}", tmp_path.display()))?;
    fs::rename(&tmp_path, path).with_context(|| format!("replace config {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_missing_returns_default() {
        let temp = tempfile::tempdir().expect("tempdir");
        let cfg = load_config(&temp.path().join("missing.toml")).expect("load");
        assert_eq!(cfg, OracleConfig::default());
        assert_eq!(cfg.output, OutputFormat::Plain);
    }

    #[test]
    fn write_then_load_round_trips() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("oracle.toml");
        let cfg = OracleConfig {
            levels_path: Some(PathBuf::from("levels.json")),
            output: OutputFormat::Json,
        };
        write_config(&path, &cfg).expect("write");
        let loaded = load_config(&path).expect("load");
        assert_eq!(loaded, cfg);
    }

    #[test]
    fn parses_partial_file() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("oracle.toml");
        fs::write(&path, "output = \"json\"\n").expect("write");
        let cfg = load_config(&path).expect("load");
        assert_eq!(cfg.output, OutputFormat::Json);
        assert_eq!(cfg.levels_path, None);
    }

    #[test]
    fn rejects_empty_levels_path() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("oracle.toml");
        fs::write(&path, "levels_path = \"\"\n").expect("write");
        let err = load_config(&path).expect_err("empty path");
        assert!(err.to_string().contains("levels_path"));
    }

    #[test]
    fn levels_path_is_relative_to_config() {
        let cfg = OracleConfig {
            levels_path: Some(PathBuf::from("data/levels.json")),
            output: OutputFormat::Plain,
        };
        assert_eq!(
            cfg.resolved_levels_path(Path::new("conf/oracle.toml")),
            Some(PathBuf::from("conf/data/levels.json"))
        );
        assert_eq!(
            OracleConfig::default().resolved_levels_path(Path::new("oracle.toml")),
            None
        );
    }
}
