//! Secret service implementation.
//!
//! The Gemini key comes from the `GEMINI_API_KEY` environment variable when
//! set, otherwise from `secret.json`. The loaded config is cached.

use crate::paths::PixidPaths;
use pixid_core::config::{GeminiSecret, SecretConfig};
use pixid_core::error::Result;
use pixid_core::secret::SecretService;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

pub const GEMINI_API_KEY_ENV: &str = "GEMINI_API_KEY";

#[derive(Clone)]
pub struct SecretServiceImpl {
    path: PathBuf,
    env_api_key: Option<String>,
    secrets: Arc<RwLock<Option<SecretConfig>>>,
}

impl SecretServiceImpl {
    /// Reads `secret.json` from the resolved config directory and the key
    /// from the process environment.
    pub fn new(paths: &PixidPaths) -> Result<Self> {
        Ok(Self {
            path: paths.secret_file()?,
            env_api_key: std::env::var(GEMINI_API_KEY_ENV).ok(),
            secrets: Arc::new(RwLock::new(None)),
        })
    }

    /// Replaces the environment lookup with an explicit value.
    pub fn with_env_api_key(mut self, value: Option<String>) -> Self {
        self.env_api_key = value;
        self
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    async fn read_file(&self) -> std::result::Result<SecretConfig, String> {
        if !tokio::fs::try_exists(&self.path).await.unwrap_or(false) {
            return Ok(SecretConfig::default());
        }

        let content = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| format!("Failed to read {}: {}", self.path.display(), e))?;
        serde_json::from_str(&content)
            .map_err(|e| format!("Failed to parse {}: {}", self.path.display(), e))
    }

    /// The effective Gemini key, if any.
    pub async fn gemini_api_key(&self) -> std::result::Result<Option<String>, String> {
        let secrets = self.load_secrets().await?;
        Ok(secrets.gemini_api_key().map(str::to_string))
    }
}

#[async_trait::async_trait]
impl SecretService for SecretServiceImpl {
    async fn load_secrets(&self) -> std::result::Result<SecretConfig, String> {
        if let Some(cached) = self.secrets.read().await.as_ref() {
            return Ok(cached.clone());
        }

        let mut loaded = self.read_file().await?;
        if let Some(key) = self
            .env_api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
        {
            debug!(source = GEMINI_API_KEY_ENV, "using Gemini key from environment");
            loaded.gemini = Some(GeminiSecret {
                api_key: key.to_string(),
            });
        }

        *self.secrets.write().await = Some(loaded.clone());
        Ok(loaded)
    }

    async fn secret_file_exists(&self) -> bool {
        tokio::fs::try_exists(&self.path).await.unwrap_or(false)
    }
}
