//! Unified path management for pixid configuration files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/pixid/             # Config directory
//! ├── config.toml              # Network, contract, wallet and model settings
//! ├── secret.json              # Gemini API key
//! └── logs/                    # Application logs
//!     └── pixid.log.YYYY-MM-DD
//! ```

use pixid_core::config::{GeminiSecret, SecretConfig};
use pixid_core::error::{PixidError, Result};
use std::path::{Path, PathBuf};

const APP_DIR: &str = "pixid";

/// Resolves pixid paths, optionally rooted at an explicit directory.
#[derive(Debug, Clone)]
pub struct PixidPaths {
    base: Option<PathBuf>,
}

impl PixidPaths {
    /// `base` replaces the platform config directory (tests, `--config-dir`).
    pub fn new(base: Option<&Path>) -> Self {
        Self {
            base: base.map(Path::to_path_buf),
        }
    }

    /// Returns the pixid configuration directory (e.g. `~/.config/pixid/`).
    pub fn config_dir(&self) -> Result<PathBuf> {
        match &self.base {
            Some(base) => Ok(base.clone()),
            None => dirs::config_dir()
                .map(|dir| dir.join(APP_DIR))
                .ok_or_else(|| PixidError::config("Cannot find home directory")),
        }
    }

    pub fn config_file(&self) -> Result<PathBuf> {
        Ok(self.config_dir()?.join("config.toml"))
    }

    /// Returns the path to the secrets file.
    ///
    /// Keep this file at 600 permissions; it holds the API key.
    pub fn secret_file(&self) -> Result<PathBuf> {
        Ok(self.config_dir()?.join("secret.json"))
    }

    pub fn logs_dir(&self) -> Result<PathBuf> {
        Ok(self.config_dir()?.join("logs"))
    }

    /// Ensures the secret file exists, creating a blank template if it doesn't.
    ///
    /// On Unix the new file is restricted to the owner (600).
    pub fn ensure_secret_file(&self) -> Result<PathBuf> {
        let secret_path = self.secret_file()?;
        if secret_path.exists() {
            return Ok(secret_path);
        }

        if let Some(parent) = secret_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let template = SecretConfig {
            gemini: Some(GeminiSecret {
                api_key: String::new(),
            }),
        };
        std::fs::write(&secret_path, serde_json::to_string_pretty(&template)?)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let permissions = std::fs::Permissions::from_mode(0o600);
            std::fs::set_permissions(&secret_path, permissions)?;
        }

        Ok(secret_path)
    }
}

impl Default for PixidPaths {
    fn default() -> Self {
        Self::new(None)
    }
}
