//! JSON-RPC wallet capability.
//!
//! Talks to a wallet that exposes the EIP-1193 request surface over HTTP
//! (a local wallet bridge, or a dev node with unlocked accounts). Prompting,
//! signing and broadcasting all happen on the wallet side.

use async_trait::async_trait;
use pixid_core::wallet::{
    AddChainParameters, TransactionRequest, TxHash, WalletAddress, WalletCapability,
    WalletRpcError,
};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::debug;

/// Wallet capability reached through JSON-RPC 2.0 over HTTP.
pub struct HttpWalletProvider {
    client: Client,
    endpoint: String,
    next_id: AtomicU64,
}

impl HttpWalletProvider {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
            next_id: AtomicU64::new(1),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn request<T: DeserializeOwned>(
        &self,
        method: &'static str,
        params: Value,
    ) -> Result<T, WalletRpcError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let body = RpcRequest {
            jsonrpc: "2.0",
            id,
            method,
            params,
        };
        debug!(method, id, "wallet request");

        let response = self
            .client
            .post(&self.endpoint)
            .json(&body)
            .send()
            .await
            .map_err(|err| WalletRpcError::internal(format!("Wallet request failed: {err}")))?;

        let status = response.status();
        let envelope: RpcResponse = response.json().await.map_err(|err| {
            WalletRpcError::internal(format!("Invalid wallet response (HTTP {status}): {err}"))
        })?;

        decode_response(method, envelope)
    }
}

#[async_trait]
impl WalletCapability for HttpWalletProvider {
    async fn request_accounts(&self) -> Result<Vec<WalletAddress>, WalletRpcError> {
        self.request("eth_requestAccounts", json!([])).await
    }

    async fn accounts(&self) -> Result<Vec<WalletAddress>, WalletRpcError> {
        self.request("eth_accounts", json!([])).await
    }

    async fn switch_network(&self, chain_id_hex: &str) -> Result<(), WalletRpcError> {
        let _: Value = self
            .request(
                "wallet_switchEthereumChain",
                json!([{ "chainId": chain_id_hex }]),
            )
            .await?;
        Ok(())
    }

    async fn add_network(&self, params: &AddChainParameters) -> Result<(), WalletRpcError> {
        let _: Value = self
            .request("wallet_addEthereumChain", json!([params]))
            .await?;
        Ok(())
    }

    async fn send_transaction(&self, tx: &TransactionRequest) -> Result<TxHash, WalletRpcError> {
        self.request("eth_sendTransaction", json!([tx])).await
    }
}

#[derive(Serialize)]
struct RpcRequest {
    jsonrpc: &'static str,
    id: u64,
    method: &'static str,
    params: Value,
}

#[derive(Deserialize)]
struct RpcResponse {
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<RpcErrorObject>,
}

#[derive(Deserialize)]
struct RpcErrorObject {
    code: i64,
    #[serde(default)]
    message: String,
}

fn decode_response<T: DeserializeOwned>(
    method: &str,
    envelope: RpcResponse,
) -> Result<T, WalletRpcError> {
    if let Some(error) = envelope.error {
        return Err(WalletRpcError::new(error.code, error.message));
    }

    // `null` is a legal result for the wallet_* methods.
    let result = envelope.result.unwrap_or(Value::Null);
    serde_json::from_value(result).map_err(|err| {
        WalletRpcError::internal(format!("Unexpected result for {method}: {err}"))
    })
}
