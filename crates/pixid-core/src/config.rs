//! Configuration types.
//!
//! `AppConfig` mirrors `config.toml`; every section and key is optional and
//! falls back to the Celo mainnet deployment. `SecretConfig` mirrors
//! `secret.json` and only ever carries the generative API credential.

use crate::error::{PixidError, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

pub const DEFAULT_CHAIN_ID: u64 = 42220;
pub const DEFAULT_CONTRACT_ADDRESS: &str = "0x15548f0a85034a0441D313fC8ceABBb0BFbBA06a";
/// Selector of a no-argument `mint()`.
pub const DEFAULT_CALL_DATA: &str = "0x1249c58b";
pub const DEFAULT_GEMINI_IMAGE_MODEL: &str = "gemini-2.5-flash-image";
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

static ADDRESS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^0x[0-9a-fA-F]{40}$").expect("static regex"));
static SELECTOR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^0x[0-9a-fA-F]{8}$").expect("static regex"));

/// Root configuration structure for config.toml
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub network: NetworkConfig,
    pub contract: ContractConfig,
    pub wallet: WalletConfig,
    pub gemini: GeminiModelConfig,
}

impl AppConfig {
    /// Rejects contract parameters that cannot form a valid transaction.
    pub fn validate(&self) -> Result<()> {
        self.contract.validate()
    }
}

/// Target network, in the shape `wallet_addEthereumChain` expects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    pub chain_id: u64,
    pub chain_name: String,
    pub native_currency: NativeCurrency,
    pub rpc_urls: Vec<String>,
    pub block_explorer_urls: Vec<String>,
}

impl NetworkConfig {
    /// Chain id in the `0x`-prefixed lowercase hex form wallets expect.
    pub fn chain_id_hex(&self) -> String {
        format!("{:#x}", self.chain_id)
    }
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            chain_id: DEFAULT_CHAIN_ID,
            chain_name: "Celo Mainnet".to_string(),
            native_currency: NativeCurrency::default(),
            rpc_urls: vec!["https://forno.celo.org".to_string()],
            block_explorer_urls: vec!["https://explorer.celo.org".to_string()],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NativeCurrency {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
}

impl Default for NativeCurrency {
    fn default() -> Self {
        Self {
            name: "CELO".to_string(),
            symbol: "CELO".to_string(),
            decimals: 18,
        }
    }
}

/// Contract the interaction transaction targets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContractConfig {
    pub address: String,
    /// 4-byte function selector sent as transaction data.
    pub call_data: String,
}

impl ContractConfig {
    pub fn validate(&self) -> Result<()> {
        if !ADDRESS_RE.is_match(&self.address) {
            return Err(PixidError::config(format!(
                "contract.address must be 0x followed by 40 hex digits, got '{}'",
                self.address
            )));
        }
        if !SELECTOR_RE.is_match(&self.call_data) {
            return Err(PixidError::config(format!(
                "contract.call_data must be a 4-byte selector (0x + 8 hex digits), got '{}'",
                self.call_data
            )));
        }
        Ok(())
    }
}

impl Default for ContractConfig {
    fn default() -> Self {
        Self {
            address: DEFAULT_CONTRACT_ADDRESS.to_string(),
            call_data: DEFAULT_CALL_DATA.to_string(),
        }
    }
}

/// Wallet capability location. No endpoint means no wallet is registered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WalletConfig {
    pub endpoint: Option<String>,
}

/// Gemini image model settings (the key lives in secret.json).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeminiModelConfig {
    pub model_name: String,
    pub base_url: String,
}

impl Default for GeminiModelConfig {
    fn default() -> Self {
        Self {
            model_name: DEFAULT_GEMINI_IMAGE_MODEL.to_string(),
            base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
        }
    }
}

/// Root configuration structure for secret.json
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SecretConfig {
    #[serde(default)]
    pub gemini: Option<GeminiSecret>,
}

impl SecretConfig {
    /// The configured Gemini key, ignoring blank placeholders.
    pub fn gemini_api_key(&self) -> Option<&str> {
        self.gemini
            .as_ref()
            .map(|g| g.api_key.trim())
            .filter(|key| !key.is_empty())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeminiSecret {
    pub api_key: String,
}
