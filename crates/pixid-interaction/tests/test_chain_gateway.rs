use async_trait::async_trait;
use pixid_core::config::{ContractConfig, NetworkConfig};
use pixid_core::wallet::{
    AddChainParameters, TransactionRequest, TxHash, WalletAddress, WalletCapability,
    WalletRpcError,
};
use pixid_core::{ErrorKind, FlowError};
use pixid_interaction::ChainGateway;
use std::sync::{Arc, Mutex};

const ADDRESS: &str = "0xABCD000000000000000000000000000000001234";

/// Wallet stub with scripted answers and a call log.
#[derive(Default)]
struct ScriptedWallet {
    accounts: Option<Result<Vec<WalletAddress>, WalletRpcError>>,
    switch: Option<WalletRpcError>,
    add: Option<WalletRpcError>,
    send: Option<Result<TxHash, WalletRpcError>>,
    added: Mutex<Vec<AddChainParameters>>,
    sent: Mutex<Vec<TransactionRequest>>,
    calls: Mutex<Vec<&'static str>>,
}

impl ScriptedWallet {
    fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl WalletCapability for ScriptedWallet {
    async fn request_accounts(&self) -> Result<Vec<WalletAddress>, WalletRpcError> {
        self.calls.lock().unwrap().push("eth_requestAccounts");
        self.accounts
            .clone()
            .unwrap_or_else(|| Ok(vec![WalletAddress::new(ADDRESS)]))
    }

    async fn accounts(&self) -> Result<Vec<WalletAddress>, WalletRpcError> {
        self.calls.lock().unwrap().push("eth_accounts");
        self.accounts.clone().unwrap_or_else(|| Ok(Vec::new()))
    }

    async fn switch_network(&self, chain_id_hex: &str) -> Result<(), WalletRpcError> {
        assert_eq!(chain_id_hex, "0xa4ec");
        self.calls.lock().unwrap().push("wallet_switchEthereumChain");
        match &self.switch {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }

    async fn add_network(&self, params: &AddChainParameters) -> Result<(), WalletRpcError> {
        self.calls.lock().unwrap().push("wallet_addEthereumChain");
        self.added.lock().unwrap().push(params.clone());
        match &self.add {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }

    async fn send_transaction(&self, tx: &TransactionRequest) -> Result<TxHash, WalletRpcError> {
        self.calls.lock().unwrap().push("eth_sendTransaction");
        self.sent.lock().unwrap().push(tx.clone());
        self.send.clone().unwrap_or_else(|| Ok(TxHash::new("0xTX1")))
    }
}

fn gateway(wallet: Arc<ScriptedWallet>) -> ChainGateway {
    ChainGateway::new(
        Some(wallet),
        NetworkConfig::default(),
        ContractConfig::default(),
    )
}

fn no_wallet_gateway() -> ChainGateway {
    ChainGateway::new(None, NetworkConfig::default(), ContractConfig::default())
}

#[tokio::test]
async fn test_connect_returns_first_account() {
    let wallet = Arc::new(ScriptedWallet::default());
    let address = gateway(wallet.clone()).connect().await.unwrap();

    assert_eq!(address.as_str(), ADDRESS);
    assert_eq!(wallet.calls(), vec!["eth_requestAccounts"]);
}

#[tokio::test]
async fn test_connect_without_wallet_fails() {
    let err = no_wallet_gateway().connect().await.unwrap_err();
    assert_eq!(err, FlowError::NoWalletFound);
}

#[tokio::test]
async fn test_connect_rejection_maps_to_user_rejected() {
    let wallet = Arc::new(ScriptedWallet {
        accounts: Some(Err(WalletRpcError::new(
            WalletRpcError::USER_REJECTED,
            "User rejected the request.",
        ))),
        ..Default::default()
    });

    let err = gateway(wallet).connect().await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UserRejected);
    assert_eq!(err.to_string(), "User rejected the request.");
}

#[tokio::test]
async fn test_connect_other_errors_use_fallback_message() {
    let wallet = Arc::new(ScriptedWallet {
        accounts: Some(Err(WalletRpcError::internal(""))),
        ..Default::default()
    });

    let err = gateway(wallet).connect().await.unwrap_err();
    assert_eq!(err, FlowError::ConnectionFailed("Failed to connect wallet.".to_string()));
}

#[tokio::test]
async fn test_connect_with_no_accounts_fails() {
    let wallet = Arc::new(ScriptedWallet {
        accounts: Some(Ok(Vec::new())),
        ..Default::default()
    });

    let err = gateway(wallet).connect().await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ConnectionFailed);
}

#[tokio::test]
async fn test_ensure_network_without_wallet_is_noop() {
    assert!(no_wallet_gateway().ensure_network().await.is_ok());
}

#[tokio::test]
async fn test_ensure_network_switch_success_does_not_add() {
    let wallet = Arc::new(ScriptedWallet::default());
    gateway(wallet.clone()).ensure_network().await.unwrap();

    assert_eq!(wallet.calls(), vec!["wallet_switchEthereumChain"]);
}

#[tokio::test]
async fn test_ensure_network_adds_unrecognized_chain_once() {
    let wallet = Arc::new(ScriptedWallet {
        switch: Some(WalletRpcError::new(
            WalletRpcError::UNRECOGNIZED_CHAIN,
            "Unrecognized chain ID \"0xa4ec\".",
        )),
        ..Default::default()
    });

    gateway(wallet.clone()).ensure_network().await.unwrap();

    let added = wallet.added.lock().unwrap().clone();
    assert_eq!(added.len(), 1);
    assert_eq!(added[0].chain_id, "0xa4ec");
    assert_eq!(added[0].native_currency.symbol, "CELO");
    assert_eq!(added[0].native_currency.decimals, 18);
    assert_eq!(
        wallet.calls(),
        vec!["wallet_switchEthereumChain", "wallet_addEthereumChain"]
    );
}

#[tokio::test]
async fn test_ensure_network_add_failure() {
    let wallet = Arc::new(ScriptedWallet {
        switch: Some(WalletRpcError::new(WalletRpcError::UNRECOGNIZED_CHAIN, "unknown")),
        add: Some(WalletRpcError::new(WalletRpcError::USER_REJECTED, "nope")),
        ..Default::default()
    });

    let err = gateway(wallet).ensure_network().await.unwrap_err();
    assert_eq!(
        err,
        FlowError::NetworkAddFailed {
            chain_name: "Celo Mainnet".to_string()
        }
    );
}

#[tokio::test]
async fn test_ensure_network_other_switch_error() {
    let wallet = Arc::new(ScriptedWallet {
        switch: Some(WalletRpcError::new(WalletRpcError::USER_REJECTED, "User rejected")),
        ..Default::default()
    });

    let err = gateway(wallet.clone()).ensure_network().await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NetworkSwitchFailed);
    assert!(wallet.added.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_submit_interaction_sends_selector_call() {
    let wallet = Arc::new(ScriptedWallet::default());
    let from = WalletAddress::new(ADDRESS);

    let hash = gateway(wallet.clone()).submit_interaction(&from).await.unwrap();

    assert_eq!(hash.as_str(), "0xTX1");
    let sent = wallet.sent.lock().unwrap().clone();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, "0x15548f0a85034a0441D313fC8ceABBb0BFbBA06a");
    assert_eq!(sent[0].from, ADDRESS);
    assert_eq!(sent[0].value, "0x0");
    assert_eq!(sent[0].data, "0x1249c58b");
}

#[tokio::test]
async fn test_submit_interaction_uses_configured_contract() {
    let wallet = Arc::new(ScriptedWallet::default());
    let contract = ContractConfig {
        address: "0x0000000000000000000000000000000000000001".to_string(),
        call_data: "0xd09de08a".to_string(),
    };
    let gateway = ChainGateway::new(Some(wallet.clone()), NetworkConfig::default(), contract);

    gateway
        .submit_interaction(&WalletAddress::new(ADDRESS))
        .await
        .unwrap();

    let sent = wallet.sent.lock().unwrap().clone();
    assert_eq!(sent[0].to, "0x0000000000000000000000000000000000000001");
    assert_eq!(sent[0].data, "0xd09de08a");
}

#[tokio::test]
async fn test_submit_rejection_surfaces_message_verbatim() {
    let wallet = Arc::new(ScriptedWallet {
        send: Some(Err(WalletRpcError::new(
            WalletRpcError::USER_REJECTED,
            "User denied transaction signature.",
        ))),
        ..Default::default()
    });

    let err = gateway(wallet)
        .submit_interaction(&WalletAddress::new(ADDRESS))
        .await
        .unwrap_err();
    assert_eq!(
        err,
        FlowError::TransactionRejected("User denied transaction signature.".to_string())
    );
}

#[tokio::test]
async fn test_submit_failure_without_message_mentions_gas() {
    let wallet = Arc::new(ScriptedWallet {
        send: Some(Err(WalletRpcError::internal(" "))),
        ..Default::default()
    });

    let err = gateway(wallet)
        .submit_interaction(&WalletAddress::new(ADDRESS))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::TransactionRejected);
    assert!(err.to_string().contains("enough CELO to cover gas"));
}

#[tokio::test]
async fn test_submit_without_wallet_fails() {
    let err = no_wallet_gateway()
        .submit_interaction(&WalletAddress::new(ADDRESS))
        .await
        .unwrap_err();
    assert_eq!(err, FlowError::NoWalletFound);
}

#[tokio::test]
async fn test_authorized_account_is_best_effort() {
    let wallet = Arc::new(ScriptedWallet {
        accounts: Some(Err(WalletRpcError::internal("locked"))),
        ..Default::default()
    });
    assert!(gateway(wallet).authorized_account().await.is_none());
    assert!(no_wallet_gateway().authorized_account().await.is_none());
}
