//! Session domain model.
//!
//! The outcome records live inside the phase that owns them, so a result can
//! only exist in `Success` and an error only in `Error`.

use super::result::{ErrorRecord, GenerationResult};
use super::status::Status;
use crate::error::FlowError;
use crate::wallet::WalletAddress;
use serde::{Deserialize, Serialize};

/// Current step of the interaction flow, with the data that step owns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum Phase {
    #[default]
    Idle,
    Connecting,
    Interacting,
    Generating,
    Success(GenerationResult),
    Error(ErrorRecord),
}

impl Phase {
    pub fn status(&self) -> Status {
        match self {
            Self::Idle => Status::Idle,
            Self::Connecting => Status::Connecting,
            Self::Interacting => Status::Interacting,
            Self::Generating => Status::Generating,
            Self::Success(_) => Status::Success,
            Self::Error(_) => Status::Error,
        }
    }
}

/// State of one front-end session. Never persisted.
///
/// The wallet address survives failures and resets; only the phase moves.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    wallet_address: Option<WalletAddress>,
    phase: Phase,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> Status {
        self.phase.status()
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn wallet_address(&self) -> Option<&WalletAddress> {
        self.wallet_address.as_ref()
    }

    pub fn result(&self) -> Option<&GenerationResult> {
        match &self.phase {
            Phase::Success(result) => Some(result),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&ErrorRecord> {
        match &self.phase {
            Phase::Error(record) => Some(record),
            _ => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error().map(|record| record.message.as_str())
    }

    pub fn set_wallet_address(&mut self, address: WalletAddress) {
        self.wallet_address = Some(address);
    }

    /// Moves to a new phase. Entering any phase drops the previous
    /// phase's result or error record.
    pub fn enter(&mut self, phase: Phase) {
        self.phase = phase;
    }

    pub fn fail(&mut self, err: &FlowError) {
        self.phase = Phase::Error(ErrorRecord::from(err));
    }

    pub fn succeed(&mut self, result: GenerationResult) {
        self.phase = Phase::Success(result);
    }

    /// Back to `Idle`, clearing any result or error.
    pub fn reset(&mut self) {
        self.phase = Phase::Idle;
    }
}
