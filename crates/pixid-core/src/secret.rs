//! Secret management service trait.
//!
//! Defines the interface for loading the generative API credential.

use crate::config::SecretConfig;

/// Service for managing secret configuration.
///
/// Implementations must never log or echo the key itself; error messages
/// describe where loading failed, not what was loaded.
#[async_trait::async_trait]
pub trait SecretService: Send + Sync {
    /// Loads the secret configuration.
    async fn load_secrets(&self) -> Result<SecretConfig, String>;

    /// Checks if the secret file exists.
    async fn secret_file_exists(&self) -> bool;
}
