//! Data directory resolution.

use std::env;
use std::ffi::OsString;
use std::path::PathBuf;

use anyhow::{Context, Result};
use directories::ProjectDirs;
use tracing::debug;

use crate::commands::Entity;

/// Environment variable overriding the platform data directory.
pub const DATA_DIR_ENV: &str = "INNKEEP_DATA_DIR";

#[derive(Debug, Clone)]
pub struct Config {
    data_dir: PathBuf,
}

impl Config {
    /// `--data-dir`, then `INNKEEP_DATA_DIR`, then the platform data dir.
    pub fn resolve(flag: Option<PathBuf>) -> Result<Self> {
        let config = Self::resolve_with(flag, env::var_os(DATA_DIR_ENV))?;
        debug!(data_dir = %config.data_dir.display(), "Resolved data directory");
        Ok(config)
    }

    fn resolve_with(flag: Option<PathBuf>, env_value: Option<OsString>) -> Result<Self> {
        let data_dir = match (flag, env_value) {
            (Some(dir), _) => dir,
            (None, Some(dir)) if !dir.is_empty() => PathBuf::from(dir),
            _ => ProjectDirs::from("", "", "innkeep")
                .context("Could not determine data directory")?
                .data_dir()
                .to_path_buf(),
        };
        Ok(Self { data_dir })
    }

    /// `<data-dir>/<entity>.json`
    pub fn entity_path(&self, entity: Entity) -> PathBuf {
        self.data_dir.join(format!("{}.json", entity))
    }
}
