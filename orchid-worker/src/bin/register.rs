//! Orchid Register - publishes the slash command table to Discord.
//!
//! Run once per deployment (or whenever a command is added):
//!
//! ```text
//! DISCORD_APPLICATION_ID=... DISCORD_BOT_TOKEN=... orchid-register
//! ```

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use orchid::chain::build_http_client;
use orchid::discord::CommandRegistrar;
use orchid::{CommandRegistry, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize structured JSON logging
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().json().flatten_event(true))
        .init();

    let config = Config::from_env();

    let application_id = config
        .discord_application_id
        .clone()
        .context("DISCORD_APPLICATION_ID is not set")?;
    let bot_token = config
        .discord_bot_token
        .clone()
        .context("DISCORD_BOT_TOKEN is not set")?;

    let definitions = CommandRegistry::standard().definitions();
    info!(
        application_id = %application_id,
        commands = ?definitions.iter().map(|d| d.name).collect::<Vec<_>>(),
        "command_registration_starting"
    );

    let client =
        build_http_client(config.request_timeout()).context("Failed to create HTTP client")?;
    let registrar = CommandRegistrar::new(
        client,
        &config.discord_api_base,
        &application_id,
        bot_token,
    );

    let count = registrar
        .register_all(&definitions)
        .await
        .context("Failed to register commands")?;

    info!(count = count, "command_registration_complete");

    Ok(())
}
