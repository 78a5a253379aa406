//! Composition root: turns configuration and secrets into a ready orchestrator.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Result, anyhow};
use pixid_application::InteractionOrchestrator;
use pixid_core::config::AppConfig;
use pixid_core::secret::SecretService;
use pixid_core::wallet::WalletCapability;
use pixid_infrastructure::{ConfigService, PixidPaths, SecretServiceImpl};
use pixid_interaction::{ChainGateway, ContentGenerator, GeminiImageAgent, HttpWalletProvider};

/// Inputs the binary collects from the command line and environment.
#[derive(Debug, Clone, Default)]
pub struct BootstrapOptions {
    pub config_dir: Option<PathBuf>,
    pub config_file: Option<PathBuf>,
    pub wallet_url: Option<String>,
    /// Value of `GEMINI_API_KEY`, if set.
    pub env_api_key: Option<String>,
}

pub struct AppBootstrap {
    pub orchestrator: InteractionOrchestrator,
    pub config: AppConfig,
    pub paths: PixidPaths,
    pub has_credential: bool,
    /// Set when a blank secret template had to be written.
    pub secret_template: Option<PathBuf>,
}

pub async fn bootstrap(options: BootstrapOptions) -> Result<AppBootstrap> {
    let paths = PixidPaths::new(options.config_dir.as_deref());

    let config_service = match &options.config_file {
        Some(path) => ConfigService::with_path(path),
        None => ConfigService::new(&paths)?,
    };
    let mut config = config_service
        .load()
        .map_err(|e| anyhow!("Failed to load {}: {}", config_service.path().display(), e))?;
    if let Some(url) = options.wallet_url {
        config.wallet.endpoint = Some(url);
    }

    let secret_service = SecretServiceImpl::new(&paths)?.with_env_api_key(options.env_api_key);
    let secrets = secret_service
        .load_secrets()
        .await
        .map_err(|e| anyhow!("Failed to load secrets: {}", e))?;
    let api_key = secrets.gemini_api_key().map(str::to_string);

    let secret_template = if api_key.is_none() && !secret_service.secret_file_exists().await {
        let path = paths.ensure_secret_file()?;
        tracing::warn!(path = %path.display(), "no Gemini key configured, wrote secret template");
        Some(path)
    } else {
        None
    };

    let wallet: Option<Arc<dyn WalletCapability>> = match config.wallet.endpoint.as_deref() {
        Some(endpoint) => {
            tracing::info!(endpoint, "using JSON-RPC wallet capability");
            Some(Arc::new(HttpWalletProvider::new(endpoint)))
        }
        None => {
            tracing::info!("no wallet endpoint configured");
            None
        }
    };

    let agent = GeminiImageAgent::new(&config.gemini, api_key);
    let has_credential = agent.has_credential();
    tracing::info!(model = agent.model(), has_credential, "image model ready");

    let chain = ChainGateway::new(wallet, config.network.clone(), config.contract.clone());
    let generator = ContentGenerator::new(Arc::new(agent));
    let mut orchestrator = InteractionOrchestrator::new(chain, generator);
    orchestrator.restore().await;

    Ok(AppBootstrap {
        orchestrator,
        config,
        paths,
        has_credential,
        secret_template,
    })
}
