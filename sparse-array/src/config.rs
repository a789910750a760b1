//! Sparse array configuration, optionally stored as TOML.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::SparseArrayError;

/// Sparse array configuration (TOML).
///
/// Missing fields default to sensible values.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SparseArrayConfig {
    /// Width of a load window; also the size of the initial load.
    pub batch_size: usize,
}

impl Default for SparseArrayConfig {
    fn default() -> Self {
        Self { batch_size: 50 }
    }
}

impl SparseArrayConfig {
    pub fn with_batch_size(batch_size: usize) -> Self {
        Self { batch_size }
    }

    pub fn validate(&self) -> std::result::Result<(), SparseArrayError> {
        if self.batch_size == 0 {
            return Err(SparseArrayError::InvalidConfiguration(
                "batch_size must be > 0".to_string(),
            ));
        }
        Ok(())
    }
}

/// Load config from a TOML file.
///
/// If the file is missing, returns `SparseArrayConfig::default()`.
pub fn load_config(path: &Path) -> Result<SparseArrayConfig> {
    if !path.exists() {
        let cfg = SparseArrayConfig::default();
        cfg.validate()?;
        return Ok(cfg);
    }
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: SparseArrayConfig =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    cfg.validate()
        .with_context(|| format!("validate {}", path.display()))?;
    Ok(cfg)
}

/// Atomically write config to disk (temp file + rename).
pub fn write_config(path: &Path, cfg: &SparseArrayConfig) -> Result<()> {
    cfg.validate()?;
    let mut buf = toml::to_string_pretty(cfg).context("serialize config toml")?;
    buf.push('\n');
    let parent = path
        .parent()
        .with_context(|| format!("config path missing parent {}", path.display()))?;
    fs::create_dir_all(parent).with_context(|| format!("create directory {}", parent.display()))?;
    let tmp_path = path.with_extension("toml.tmp");
    fs::write(&tmp_path, &buf)
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
        assert_eq!(cfg, SparseArrayConfig::default());
    }

    #[test]
    fn write_then_load_round_trips() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("nested").join("sparse.toml");
        let cfg = SparseArrayConfig::with_batch_size(12);
        write_config(&path, &cfg).expect("write");
        let loaded = load_config(&path).expect("load");
        assert_eq!(loaded, cfg);
    }

    #[test]
    fn zero_batch_size_is_rejected() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("sparse.toml");
        fs::write(&path, "batch_size = 0\n").expect("write");
        let err = load_config(&path).expect_err("zero batch size");
        assert!(format!("{:#}", err).contains("batch_size must be > 0"));
    }

    #[test]
    fn empty_file_uses_defaults() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("sparse.toml");
        fs::write(&path, "").expect("write");
        assert_eq!(load_config(&path).expect("load").batch_size, 50);
    }
}
