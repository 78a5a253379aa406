//! Read-only snapshot handed to the presentation layer.

use pixid_core::ErrorKind;
use pixid_core::session::{GenerationResult, Session, Status};
use pixid_core::wallet::WalletAddress;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionView {
    pub status: Status,
    pub wallet_address: Option<WalletAddress>,
    /// `0x1234...abcd` form of the wallet address.
    pub short_address: Option<String>,
    pub result: Option<GenerationResult>,
    pub error: Option<String>,
    pub error_kind: Option<ErrorKind>,
}

impl SessionView {
    /// Triggering actions must be disabled while this is true.
    pub fn is_busy(&self) -> bool {
        self.status.is_busy()
    }

    pub fn is_connected(&self) -> bool {
        self.wallet_address.is_some()
    }
}

impl From<&Session> for SessionView {
    fn from(session: &Session) -> Self {
        Self {
            status: session.status(),
            wallet_address: session.wallet_address().cloned(),
            short_address: session.wallet_address().map(WalletAddress::short),
            result: session.result().cloned(),
            error: session.error_message().map(str::to_string),
            error_kind: session.error().map(|record| record.kind),
        }
    }
}
