//! # Configuration
//!
//! Configuration is managed by [`confique`], layered in priority order:
//! 1. **Environment variables**: `MINDDUMP_DATA`, `MINDDUMP_NOTIFICATIONS`, `MINDDUMP_LOG`.
//! 2. **Config file**: `minddump.toml` in the OS config directory (via `directories`).
//! 3. **Compiled defaults**: `#[config(default = ...)]`.
//!
//! ## Available Settings
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `data_dir` | OS data dir | Where entries, the reminder spool and logs live |
//! | `notifications` | `true` | Whether task reminders may be scheduled |
//! | `log_level` | `warn` | Level for the rolling log file |

use crate::error::{MindDumpError, Result};
use confique::Config;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_FILENAME: &str = "minddump.toml";

/// Configuration for minddump, stored in `minddump.toml`.
#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct MindDumpConfig {
    /// Directory holding entries, the reminder spool and logs.
    /// When absent, the OS data directory is used.
    #[config(env = "MINDDUMP_DATA")]
    pub data_dir: Option<PathBuf>,

    /// Whether task reminders may be scheduled. This is the answer to the
    /// notification permission prompt.
    #[config(env = "MINDDUMP_NOTIFICATIONS", default = true)]
    pub notifications: bool,

    /// Log level for the rolling log file (trace, debug, info, warn, error).
    #[config(env = "MINDDUMP_LOG", default = "warn")]
    pub log_level: String,
}

impl Default for MindDumpConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            notifications: true,
            log_level: "warn".to_string(),
        }
    }
}

impl MindDumpConfig {
    /// Loads from the environment and `<config_dir>/minddump.toml`.
    /// A missing file is fine; a malformed one is an error.
    pub fn load(config_dir: &Path) -> Result<Self> {
        Self::builder()
            .env()
            .file(config_dir.join(CONFIG_FILENAME))
            .load()
            .map_err(|e| MindDumpError::Config(e.to_string()))
    }

    /// Environment only, for hosts without a config directory.
    pub fn from_env() -> Self {
        Self::builder().env().load().unwrap_or_else(|e| {
            log::warn!("ignoring configuration: {}", e);
            Self::default()
        })
    }

    /// Like [`MindDumpConfig::load`], falling back to defaults on error.
    pub fn load_or_default(config_dir: &Path) -> Self {
        Self::load(config_dir).unwrap_or_else(|e| {
            log::warn!("ignoring configuration: {}", e);
            Self::default()
        })
    }
}
