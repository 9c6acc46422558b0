//! # Context Setup
//!
//! Resolves where data lives and wires the production adapters together.
//!
//! ## Data Directory Resolution
//!
//! [`initialize`] picks the data directory in this order:
//! 1. The explicit `data_override` (the CLI's `--data` flag).
//! 2. `data_dir` from [`MindDumpConfig`] (which `MINDDUMP_DATA` overrides).
//! 3. The OS data directory (via the `directories` crate).
//!
//! ## Layout
//!
//! ```text
//! <data_dir>/
//!   mind_dump_entries.json   # The entry collection (key `@mind_dump_entries`)
//!   reminders.json           # Reminder spool
//!   logs/                    # Rolling log files
//! ```

use crate::api::MindDumpApi;
use crate::config::MindDumpConfig;
use crate::error::{MindDumpError, Result};
use crate::kv::fs_backend::FsKv;
use crate::notify::spool::SpoolNotifier;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

pub const LOG_DIR_NAME: &str = "logs";

pub struct MindDumpContext {
    pub api: MindDumpApi<FsKv, SpoolNotifier>,
    pub config: MindDumpConfig,
    pub data_dir: PathBuf,
}

impl MindDumpContext {
    pub fn log_dir(&self) -> PathBuf {
        self.data_dir.join(LOG_DIR_NAME)
    }

    pub fn spool(&self) -> &SpoolNotifier {
        self.api.reminders().notifier()
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "minddump", "minddump")
}

/// Loads configuration and builds the production context.
///
/// Nothing is read from the entry store yet; call
/// [`MindDumpApi::bootstrap`] on `ctx.api` for that.
pub fn initialize(data_override: Option<PathBuf>) -> Result<MindDumpContext> {
    let dirs = project_dirs();
    let config = match &dirs {
        Some(dirs) => MindDumpConfig::load_or_default(dirs.config_dir()),
        None => MindDumpConfig::from_env(),
    };

    let data_dir = resolve_data_dir(
        data_override,
        &config,
        dirs.as_ref().map(|d| d.data_dir()),
    )?;

    Ok(initialize_in(data_dir, config))
}

/// Builds the context for an already resolved data directory.
pub fn initialize_in(data_dir: PathBuf, config: MindDumpConfig) -> MindDumpContext {
    let kv = FsKv::new(data_dir.clone());
    let notifier = SpoolNotifier::new(data_dir.clone(), config.notifications);
    let api = MindDumpApi::new(kv, notifier);

    MindDumpContext {
        api,
        config,
        data_dir,
    }
}

pub fn resolve_data_dir(
    data_override: Option<PathBuf>,
    config: &MindDumpConfig,
    os_data_dir: Option<&Path>,
) -> Result<PathBuf> {
    data_override
        .or_else(|| config.data_dir.clone())
        .or_else(|| os_data_dir.map(Path::to_path_buf))
        .ok_or_else(|| {
            MindDumpError::Config(
                "could not determine a data directory; pass --data or set MINDDUMP_DATA"
                    .to_string(),
            )
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn override_beats_config_beats_os_dir() {
        let config = MindDumpConfig {
            data_dir: Some(PathBuf::from("/from/config")),
            ..MindDumpConfig::default()
        };
        let os = Path::new("/from/os");

        let dir = resolve_data_dir(Some(PathBuf::from("/from/flag")), &config, Some(os)).unwrap();
        assert_eq!(dir, PathBuf::from("/from/flag"));

        let dir = resolve_data_dir(None, &config, Some(os)).unwrap();
        assert_eq!(dir, PathBuf::from("/from/config"));

        let dir = resolve_data_dir(None, &MindDumpConfig::default(), Some(os)).unwrap();
        assert_eq!(dir, PathBuf::from("/from/os"));
    }

    #[test]
    fn no_directory_at_all_is_a_config_error() {
        let err = resolve_data_dir(None, &MindDumpConfig::default(), None).unwrap_err();
        assert!(matches!(err, MindDumpError::Config(_)));
    }

    #[test]
    fn context_lays_out_files_under_data_dir() {
        let dir = TempDir::new().unwrap();
        let mut ctx = initialize_in(dir.path().to_path_buf(), MindDumpConfig::default());

        ctx.api.bootstrap();
        ctx.api.add_thought("hello");

        assert!(dir.path().join("mind_dump_entries.json").exists());
        assert_eq!(ctx.log_dir(), dir.path().join("logs"));
        assert_eq!(ctx.spool().spool_path(), dir.path().join("reminders.json"));
    }

    #[test]
    fn disabled_notifications_advise_on_bootstrap() {
        let dir = TempDir::new().unwrap();
        let config = MindDumpConfig {
            notifications: false,
            ..MindDumpConfig::default()
        };
        let mut ctx = initialize_in(dir.path().to_path_buf(), config);
        let result = ctx.api.bootstrap();
        assert_eq!(result.messages.len(), 1);
    }
}
