//! Error types for the PIXID application.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display};
use thiserror::Error;

/// Failures of an interaction flow step.
///
/// Every variant is terminal for the current attempt. The `Display` output is
/// the single message shown to the user.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FlowError {
    /// No wallet capability is registered in the environment.
    #[error("No crypto wallet found. Please install a Celo-compatible wallet or configure a wallet endpoint.")]
    NoWalletFound,

    /// The user declined the account access request.
    #[error("{0}")]
    UserRejected(String),

    /// Account access failed for any other reason.
    #[error("{0}")]
    ConnectionFailed(String),

    /// The wallet refused to switch to the target network.
    #[error("Failed to switch to {chain_name} network.")]
    NetworkSwitchFailed { chain_name: String },

    /// The wallet did not know the target network and registering it failed.
    #[error("Failed to add {chain_name} network to wallet.")]
    NetworkAddFailed { chain_name: String },

    /// The transaction was declined or the submission call errored.
    #[error("{0}")]
    TransactionRejected(String),

    /// No generative API credential is configured.
    #[error("API Key is missing.")]
    MissingCredential,

    /// The generative response carried no inline image.
    #[error("No image generated.")]
    NoImageReturned,

    /// Transport or provider failure while generating.
    #[error("Failed to generate pixel art identity: {0}")]
    GenerationFailed(String),
}

/// Stable tag for a [`FlowError`] variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr, Serialize, Deserialize)]
pub enum ErrorKind {
    NoWalletFound,
    UserRejected,
    ConnectionFailed,
    NetworkSwitchFailed,
    NetworkAddFailed,
    TransactionRejected,
    MissingCredential,
    NoImageReturned,
    GenerationFailed,
}

impl FlowError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NoWalletFound => ErrorKind::NoWalletFound,
            Self::UserRejected(_) => ErrorKind::UserRejected,
            Self::ConnectionFailed(_) => ErrorKind::ConnectionFailed,
            Self::NetworkSwitchFailed { .. } => ErrorKind::NetworkSwitchFailed,
            Self::NetworkAddFailed { .. } => ErrorKind::NetworkAddFailed,
            Self::TransactionRejected(_) => ErrorKind::TransactionRejected,
            Self::MissingCredential => ErrorKind::MissingCredential,
            Self::NoImageReturned => ErrorKind::NoImageReturned,
            Self::GenerationFailed(_) => ErrorKind::GenerationFailed,
        }
    }

    /// Whether the failure came from the wallet side of the flow.
    pub fn is_chain_error(&self) -> bool {
        matches!(
            self,
            Self::NoWalletFound
                | Self::UserRejected(_)
                | Self::ConnectionFailed(_)
                | Self::NetworkSwitchFailed { .. }
                | Self::NetworkAddFailed { .. }
                | Self::TransactionRejected(_)
        )
    }
}

/// A shared error type for configuration and storage concerns.
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum PixidError {
    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "TOML", "JSON"
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl PixidError {
    /// Creates an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Check if this is a config error
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }

    /// Check if this is a serialization error
    pub fn is_serialization(&self) -> bool {
        matches!(self, Self::Serialization { .. })
    }
}

impl From<std::io::Error> for PixidError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for PixidError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for PixidError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, PixidError>`.
pub type Result<T> = std::result::Result<T, PixidError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_network_errors_name_the_chain() {
        let err = FlowError::NetworkAddFailed {
            chain_name: "Celo Mainnet".to_string(),
        };
        assert_eq!(err.to_string(), "Failed to add Celo Mainnet network to wallet.");
        assert_eq!(err.kind(), ErrorKind::NetworkAddFailed);
        assert!(err.is_chain_error());
    }

    #[test]
    fn test_generation_errors_are_not_chain_errors() {
        assert!(!FlowError::MissingCredential.is_chain_error());
        assert!(!FlowError::NoImageReturned.is_chain_error());
        assert_eq!(FlowError::NoImageReturned.to_string(), "No image generated.");
    }

    #[test]
    fn test_toml_error_converts_to_serialization() {
        let err: PixidError = toml::from_str::<toml::Table>("= broken").unwrap_err().into();
        assert!(err.is_serialization());
    }
}
