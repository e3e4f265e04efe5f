//! Slash command handler trait and shared context.

use std::sync::Arc;

use async_trait::async_trait;

use crate::chain::{AssetOwnership, BalanceLookup};
use crate::discord::registration::CommandDefinition;
use crate::discord::{CommandData, Reply};
use crate::Config;

/// Name of the option every wallet-taking command accepts.
pub const WALLET_OPTION: &str = "wallet";

/// Everything a handler may need, built once at startup.
#[derive(Clone)]
pub struct CommandContext {
    pub config: Arc<Config>,
    pub balances: Arc<dyn BalanceLookup>,
    pub assets: Arc<dyn AssetOwnership>,
}

impl CommandContext {
    pub fn new(
        config: Arc<Config>,
        balances: Arc<dyn BalanceLookup>,
        assets: Arc<dyn AssetOwnership>,
    ) -> Self {
        Self {
            config,
            balances,
            assets,
        }
    }

    /// The `wallet` option if supplied, otherwise the configured default.
    pub fn wallet_for(&self, command: &CommandData) -> String {
        command
            .option_str(WALLET_OPTION)
            .unwrap_or_else(|| self.config.default_wallet.clone())
    }
}

/// Trait for slash command handlers.
///
/// Handlers are registered with a [`CommandRegistry`](super::CommandRegistry)
/// under the name in their definition. `handle` always produces a reply:
/// upstream failures are reported in-band, never as an error.
#[async_trait]
pub trait CommandHandler: Send + Sync {
    /// Registration metadata; `definition().name` is the dispatch key.
    fn definition(&self) -> CommandDefinition;

    async fn handle(&self, ctx: &CommandContext, command: &CommandData) -> Reply;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::context;
    use crate::discord::CommandOption;

    fn _assert_object_safe(_: &dyn CommandHandler) {}

    #[test]
    fn test_wallet_for_uses_option() {
        let ctx = context();
        let command = CommandData {
            name: "wax".to_string(),
            options: vec![CommandOption {
                name: "wallet".to_string(),
                value: serde_json::json!("bob.wam"),
            }],
        };
        assert_eq!(ctx.wallet_for(&command), "bob.wam");
    }

    #[test]
    fn test_wallet_for_falls_back_to_default() {
        let ctx = context();
        let blank = CommandData {
            name: "wax".to_string(),
            options: vec![CommandOption {
                name: "wallet".to_string(),
                value: serde_json::json!(""),
            }],
        };
        assert_eq!(ctx.wallet_for(&blank), "amfr2.wam");
        assert_eq!(ctx.wallet_for(&CommandData::default()), "amfr2.wam");
    }
}
