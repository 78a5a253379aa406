//! Flat status tag rendered by the presentation layer.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

/// Exactly one status holds at any time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, Serialize, Deserialize)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    Idle,
    Connecting,
    /// Waiting for the wallet to return a transaction hash.
    Interacting,
    /// Waiting for the image model.
    Generating,
    Success,
    Error,
}

impl Status {
    /// A flow is in flight; triggering actions must be disabled.
    pub fn is_busy(self) -> bool {
        matches!(self, Self::Connecting | Self::Interacting | Self::Generating)
    }

    pub fn busy_label(self) -> Option<&'static str> {
        match self {
            Self::Connecting => Some("Connecting..."),
            Self::Interacting => Some("Confirming..."),
            Self::Generating => Some("Dreaming..."),
            Self::Idle | Self::Success | Self::Error => None,
        }
    }
}
