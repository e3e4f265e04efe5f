//! Configuration module for environment variable parsing.
//!
//! Everything is read once at startup; the rest of the crate only ever sees
//! an immutable `Config` (usually behind an `Arc`).

use std::env;
use std::time::Duration;
use tracing::warn;

/// Wallet used by the wallet-taking commands when no `wallet` option is given.
pub const DEFAULT_WALLET: &str = "amfr2.wam";

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Port for the web server to listen on
    pub port: u16,

    /// Hex-encoded Ed25519 public key of the Discord application
    pub discord_public_key: Option<String>,

    /// Base URL of the WAX chain RPC node
    pub wax_rpc_url: String,

    /// Base URL of the AtomicAssets API
    pub atomic_api_url: String,

    /// AtomicHub market page used for purchase links
    pub atomichub_market_url: String,

    /// Fallback wallet for balance and ownership commands
    pub default_wallet: String,

    /// Timeout applied to every outbound HTTP request, in milliseconds
    pub request_timeout_ms: u64,

    // =========================================================================
    // Command registration (orchid-register only)
    // =========================================================================

    /// Discord REST API base URL
    pub discord_api_base: String,

    /// Discord application id that owns the slash commands
    pub discord_application_id: Option<String>,

    /// Bot token used to publish the command table
    pub discord_bot_token: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            port: 8080,
            discord_public_key: None,
            wax_rpc_url: "https://wax.greymass.com".to_string(),
            atomic_api_url: "https://wax.api.atomicassets.io".to_string(),
            atomichub_market_url: "https://wax.atomichub.io/market".to_string(),
            default_wallet: DEFAULT_WALLET.to_string(),
            request_timeout_ms: 10_000,
            discord_api_base: "https://discord.com/api/v10".to_string(),
            discord_application_id: None,
            discord_bot_token: None,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let defaults = Config::default();

        Config {
            port: parse_number("PORT", defaults.port),

            discord_public_key: non_empty("DISCORD_PUBLIC_KEY"),

            wax_rpc_url: base_url("WAX_RPC_URL", defaults.wax_rpc_url),

            atomic_api_url: base_url("ATOMIC_API_URL", defaults.atomic_api_url),

            atomichub_market_url: base_url("ATOMICHUB_MARKET_URL", defaults.atomichub_market_url),

            default_wallet: non_empty("DEFAULT_WALLET").unwrap_or(defaults.default_wallet),

            request_timeout_ms: parse_number("REQUEST_TIMEOUT_MS", defaults.request_timeout_ms),

            discord_api_base: base_url("DISCORD_API_BASE", defaults.discord_api_base),

            discord_application_id: non_empty("DISCORD_APPLICATION_ID"),

            discord_bot_token: non_empty("DISCORD_BOT_TOKEN"),
        }
    }

    /// Outbound request timeout as a `Duration`.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

/// Read a variable, treating blank values as unset.
fn non_empty(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Read a base URL, dropping any trailing slash so paths can be appended.
fn base_url(name: &str, default: String) -> String {
    non_empty(name)
        .map(|v| v.trim_end_matches('/').to_string())
        .unwrap_or(default)
}

/// Parse a numeric variable, falling back to the default on absence or garbage.
fn parse_number<T: std::str::FromStr + Copy>(name: &str, default: T) -> T {
    let raw = match non_empty(name) {
        Some(v) => v,
        None => return default,
    };

    match raw.parse() {
        Ok(v) => v,
        Err(_) => {
            warn!(env_var = name, value = %raw, "Invalid numeric value, using default");
            default
        }
    }
}
