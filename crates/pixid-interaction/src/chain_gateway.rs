//! Chain gateway.
//!
//! Wraps the wallet capability with the three operations the flow needs and
//! turns wallet errors into [`FlowError`]s. Only the submission handshake is
//! awaited; mining and confirmation are never tracked.

use pixid_core::FlowError;
use pixid_core::config::{ContractConfig, NetworkConfig};
use pixid_core::wallet::{
    AddChainParameters, TransactionRequest, TxHash, WalletAddress, WalletCapability,
    WalletRpcError,
};
use std::sync::Arc;
use tracing::{debug, info, warn};

pub struct ChainGateway {
    wallet: Option<Arc<dyn WalletCapability>>,
    network: NetworkConfig,
    contract: ContractConfig,
}

impl ChainGateway {
    /// `wallet` is `None` when no capability is registered in the environment.
    pub fn new(
        wallet: Option<Arc<dyn WalletCapability>>,
        network: NetworkConfig,
        contract: ContractConfig,
    ) -> Self {
        Self {
            wallet,
            network,
            contract,
        }
    }

    pub fn has_wallet(&self) -> bool {
        self.wallet.is_some()
    }

    pub fn network(&self) -> &NetworkConfig {
        &self.network
    }

    pub fn contract(&self) -> &ContractConfig {
        &self.contract
    }

    fn wallet(&self) -> Result<&Arc<dyn WalletCapability>, FlowError> {
        self.wallet.as_ref().ok_or(FlowError::NoWalletFound)
    }

    /// Requests account access and returns the first account.
    pub async fn connect(&self) -> Result<WalletAddress, FlowError> {
        let wallet = self.wallet()?;

        let accounts = wallet.request_accounts().await.map_err(|err| {
            if err.is_user_rejected() {
                FlowError::UserRejected(message_or(&err, "Wallet connection was rejected."))
            } else {
                FlowError::ConnectionFailed(message_or(&err, "Failed to connect wallet."))
            }
        })?;

        let address = accounts
            .into_iter()
            .next()
            .ok_or_else(|| FlowError::ConnectionFailed("Wallet returned no accounts.".to_string()))?;

        info!(address = %address.short(), "wallet connected");
        Ok(address)
    }

    /// An account the wallet has already authorized, without prompting.
    ///
    /// Any failure reads as "none"; this is a hint, not a connection.
    pub async fn authorized_account(&self) -> Option<WalletAddress> {
        let wallet = self.wallet.as_ref()?;
        match wallet.accounts().await {
            Ok(accounts) => accounts.into_iter().next(),
            Err(err) => {
                debug!(error = %err, "could not read authorized accounts");
                None
            }
        }
    }

    /// Makes the target network the wallet's active one, registering it when
    /// the wallet does not know it yet.
    ///
    /// Succeeds trivially without a wallet.
    pub async fn ensure_network(&self) -> Result<(), FlowError> {
        let Some(wallet) = self.wallet.as_ref() else {
            return Ok(());
        };

        let chain_id = self.network.chain_id_hex();
        let Err(switch_err) = wallet.switch_network(&chain_id).await else {
            debug!(%chain_id, "network active");
            return Ok(());
        };

        if !switch_err.is_unrecognized_chain() {
            warn!(%chain_id, error = %switch_err, "network switch failed");
            return Err(FlowError::NetworkSwitchFailed {
                chain_name: self.network.chain_name.clone(),
            });
        }

        // Adding a chain also activates it.
        info!(%chain_id, chain_name = %self.network.chain_name, "registering network with wallet");
        wallet
            .add_network(&AddChainParameters::from(&self.network))
            .await
            .map_err(|add_err| {
                warn!(%chain_id, error = %add_err, "network registration failed");
                FlowError::NetworkAddFailed {
                    chain_name: self.network.chain_name.clone(),
                }
            })
    }

    /// Submits the zero-value interaction call and returns its hash.
    pub async fn submit_interaction(&self, from: &WalletAddress) -> Result<TxHash, FlowError> {
        let wallet = self.wallet()?;
        let tx = TransactionRequest::interaction(&self.contract, from);
        debug!(to = %tx.to, data = %tx.data, "submitting interaction transaction");

        wallet.send_transaction(&tx).await.map_err(|err| {
            let fallback = format!(
                "Transaction rejected or failed. Make sure you have enough {} to cover gas.",
                self.network.native_currency.symbol
            );
            FlowError::TransactionRejected(message_or(&err, &fallback))
        })
    }
}

fn message_or(err: &WalletRpcError, fallback: &str) -> String {
    if err.message.trim().is_empty() {
        fallback.to_string()
    } else {
        err.message.clone()
    }
}
