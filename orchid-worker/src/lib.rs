//! Orchid - Discord slash-command webhook for the Orchid Hunter community.
//!
//! This library backs two binaries:
//! - `orchid-web`: receives signed interaction webhooks and answers them
//! - `orchid-register`: publishes the slash command table to Discord
//!
//! ## Architecture
//!
//! ```text
//! Discord → /interactions → signature check → Dispatcher → CommandHandler → WAX RPC / AtomicAssets
//! ```

pub mod chain;
pub mod commands;
pub mod config;
pub mod discord;
pub mod interactions;
pub mod util;
pub mod web;

use std::sync::Arc;

// Re-export commonly used types
pub use commands::{CommandContext, CommandRegistry};
pub use config::Config;
pub use interactions::{Dispatcher, InteractionOutcome};
pub use web::AppState;

use chain::{build_http_client, AtomicAssetsClient, ChainError, WaxRpcClient};

/// Wire up the production collaborators and dispatcher from configuration.
pub fn build_state(config: Config) -> Result<AppState, ChainError> {
    let config = Arc::new(config);
    let client = build_http_client(config.request_timeout())?;

    let context = CommandContext::new(
        Arc::clone(&config),
        Arc::new(WaxRpcClient::new(client.clone(), config.wax_rpc_url.clone())),
        Arc::new(AtomicAssetsClient::new(client, config.atomic_api_url.clone())),
    );

    let public_key = config.discord_public_key.as_deref().unwrap_or_default();
    let dispatcher = Dispatcher::new(public_key, CommandRegistry::standard(), context);

    Ok(AppState::new(dispatcher))
}
