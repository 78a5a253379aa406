//! Adapters between the interaction flow and its two external capabilities.

pub mod chain_gateway;
pub mod content_generator;
pub mod gemini_image_agent;
pub mod wallet_rpc;

pub use chain_gateway::ChainGateway;
pub use content_generator::{ContentGenerator, build_prompt};
pub use gemini_image_agent::GeminiImageAgent;
pub use wallet_rpc::HttpWalletProvider;
