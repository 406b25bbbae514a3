use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Real hops sought between communities when no depth is given.
pub const DEFAULT_MAX_DEPTH: i64 = 2;

/// Subsets at least this large compute their max id with a parallel reduction.
pub const PAR_REDUCE_THRESHOLD: usize = 64 * 1024;

/// A membership bitmap is used while `max_id + 1 <= factor * |subset| + slack`;
/// sparser id spaces fall back to a hashed set.
pub const MAX_BITMAP_SPARSITY: usize = 64;
pub const BITMAP_SLACK_BITS: usize = 4096;

pub const READ_BUFFER_SIZE: usize = 1024 * 1024;

pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Derivation settings, read from a YAML file by the command line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeriveConfig {
    pub max_depth: i64,
    pub log_level: String,
}

impl Default for DeriveConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl DeriveConfig {
    pub fn from_yaml_str(text: &str) -> Result<Self> {
        serde_yaml::from_str(text).context("invalid derive config")
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        Self::from_yaml_str(&text).with_context(|| format!("in config {}", path.display()))
    }
}

#[cfg(test)]
mod test_config {
    use std::io::Write;

    use crate::config::{DeriveConfig, DEFAULT_MAX_DEPTH};

    #[test]
    fn test_defaults_fill_missing_fields() {
        let config = DeriveConfig::from_yaml_str("max_depth: 5\n").unwrap();
        assert_eq!(config.max_depth, 5);
        assert_eq!(config.log_level, "info");

        let empty = DeriveConfig::from_yaml_str("{}").unwrap();
        assert_eq!(empty.max_depth, DEFAULT_MAX_DEPTH);
    }

    #[test]
    fn test_rejects_bad_types() {
        assert!(DeriveConfig::from_yaml_str("max_depth: deep\n").is_err());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "max_depth: -1\nlog_level: debug").unwrap();
        let config = DeriveConfig::load(file.path()).unwrap();
        assert_eq!(config.max_depth, -1);
        assert_eq!(config.log_level, "debug");

        assert!(DeriveConfig::load("/nonexistent/derive.yaml").is_err());
    }
}
