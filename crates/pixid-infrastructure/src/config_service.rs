//! Configuration service implementation.
//!
//! Loads [`AppConfig`] from `config.toml`. A missing file means "all
//! defaults"; a present but malformed or invalid file is an error.

use crate::paths::PixidPaths;
use pixid_core::config::AppConfig;
use pixid_core::error::Result;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

#[derive(Debug, Clone)]
pub struct ConfigService {
    path: PathBuf,
}

impl ConfigService {
    /// Uses `config.toml` in the resolved config directory.
    pub fn new(paths: &PixidPaths) -> Result<Self> {
        Ok(Self::with_path(paths.config_file()?))
    }

    pub fn with_path(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<AppConfig> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "no config file, using defaults");
            return Ok(AppConfig::default());
        }

        let content = std::fs::read_to_string(&self.path)?;
        let config: AppConfig = toml::from_str(&content)?;
        config.validate()?;

        info!(path = %self.path.display(), chain_id = config.network.chain_id, "configuration loaded");
        Ok(config)
    }
}
