//! Wallet capability port.
//!
//! The wallet is an external capability in the EIP-1193 sense: it owns the
//! keys, prompts the user, signs and broadcasts. This crate only describes the
//! requests made to it and the errors it may report.

use crate::config::{ContractConfig, NativeCurrency, NetworkConfig};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Account identifier returned by the wallet.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WalletAddress(String);

impl WalletAddress {
    pub fn new(address: impl Into<String>) -> Self {
        Self(address.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `0x1234...abcd` form used in headers and prompts.
    pub fn short(&self) -> String {
        shorten_hex(&self.0)
    }
}

impl fmt::Display for WalletAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Hash of a submitted (not necessarily mined) transaction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TxHash(String);

impl TxHash {
    pub fn new(hash: impl Into<String>) -> Self {
        Self(hash.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TxHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Keeps the first six and last four characters of a hex string.
///
/// Strings too short to abbreviate are returned unchanged.
pub fn shorten_hex(value: &str) -> String {
    let chars: Vec<char> = value.chars().collect();
    if chars.len() <= 10 {
        return value.to_string();
    }
    let head: String = chars[..6].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{head}...{tail}")
}

/// Error object reported by a wallet capability.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[error("wallet error {code}: {message}")]
pub struct WalletRpcError {
    pub code: i64,
    pub message: String,
}

impl WalletRpcError {
    /// The user rejected the request.
    pub const USER_REJECTED: i64 = 4001;
    /// The requested chain has not been added to the wallet.
    pub const UNRECOGNIZED_CHAIN: i64 = 4902;
    /// Internal JSON-RPC error; also used for transport failures.
    pub const INTERNAL: i64 = -32603;

    pub fn new(code: i64, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(Self::INTERNAL, message)
    }

    pub fn is_user_rejected(&self) -> bool {
        self.code == Self::USER_REJECTED
    }

    pub fn is_unrecognized_chain(&self) -> bool {
        self.code == Self::UNRECOGNIZED_CHAIN
    }
}

/// Parameters for `wallet_addEthereumChain`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddChainParameters {
    pub chain_id: String,
    pub chain_name: String,
    pub native_currency: NativeCurrency,
    pub rpc_urls: Vec<String>,
    pub block_explorer_urls: Vec<String>,
}

impl From<&NetworkConfig> for AddChainParameters {
    fn from(network: &NetworkConfig) -> Self {
        Self {
            chain_id: network.chain_id_hex(),
            chain_name: network.chain_name.clone(),
            native_currency: network.native_currency.clone(),
            rpc_urls: network.rpc_urls.clone(),
            block_explorer_urls: network.block_explorer_urls.clone(),
        }
    }
}

/// Parameters for `eth_sendTransaction`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRequest {
    pub to: String,
    pub from: String,
    pub value: String,
    pub data: String,
}

impl TransactionRequest {
    /// Zero-value call of the configured selector on the configured contract.
    pub fn interaction(contract: &ContractConfig, from: &WalletAddress) -> Self {
        Self {
            to: contract.address.clone(),
            from: from.as_str().to_string(),
            value: "0x0".to_string(),
            data: contract.call_data.clone(),
        }
    }
}

/// The narrow request surface the chain gateway needs from a wallet.
#[async_trait]
pub trait WalletCapability: Send + Sync {
    /// Prompts for account access (`eth_requestAccounts`).
    async fn request_accounts(&self) -> Result<Vec<WalletAddress>, WalletRpcError>;

    /// Already-authorized accounts, without prompting (`eth_accounts`).
    async fn accounts(&self) -> Result<Vec<WalletAddress>, WalletRpcError>;

    /// Activates a chain (`wallet_switchEthereumChain`).
    async fn switch_network(&self, chain_id_hex: &str) -> Result<(), WalletRpcError>;

    /// Registers and activates a chain (`wallet_addEthereumChain`).
    async fn add_network(&self, params: &AddChainParameters) -> Result<(), WalletRpcError>;

    /// Signs and broadcasts a transaction (`eth_sendTransaction`).
    async fn send_transaction(&self, tx: &TransactionRequest) -> Result<TxHash, WalletRpcError>;
}
