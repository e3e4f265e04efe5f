//! Token balance commands (`/wax`, `/keiki`).

use async_trait::async_trait;
use tracing::{info, warn};

use super::handler::{CommandContext, CommandHandler};
use crate::chain::{ChainError, Token, KEIKI, WAXP};
use crate::discord::registration::{CommandDefinition, CommandOptionDefinition};
use crate::discord::{CommandData, Reply};
use crate::util::format_amount;

/// Reports a wallet's balance of one token.
pub struct BalanceCommand {
    name: &'static str,
    description: &'static str,
    token: Token,
    emoji: &'static str,
    title: &'static str,
    failure: &'static str,
}

impl BalanceCommand {
    /// `/wax`: native WAXP balance.
    pub fn wax() -> Self {
        Self {
            name: "wax",
            description: "Get WAX balance for a wallet",
            token: WAXP,
            emoji: "💰",
            title: "WAX",
            failure: "❌ Failed to fetch WAX balance. Please try again later.",
        }
    }

    /// `/keiki`: KEIKI token balance.
    pub fn keiki() -> Self {
        Self {
            name: "keiki",
            description: "Get Keiki token balance",
            token: KEIKI,
            emoji: "🌺",
            title: "Keiki",
            failure: "❌ Failed to fetch Keiki balance. Please try again later.",
        }
    }

    async fn lookup(&self, ctx: &CommandContext, wallet: &str) -> Result<f64, ChainError> {
        let balance = ctx.balances.balance(wallet, &self.token).await?;
        balance.amount_f64()
    }

    fn render(&self, wallet: &str, amount: f64) -> String {
        format!(
            "{} **{} Balance for {}**\n{}: {}",
            self.emoji,
            self.title,
            wallet,
            self.token.symbol,
            format_amount(amount)
        )
    }
}

#[async_trait]
impl CommandHandler for BalanceCommand {
    fn definition(&self) -> CommandDefinition {
        CommandDefinition::new(self.name, self.description)
            .with_option(CommandOptionDefinition::wallet())
    }

    async fn handle(&self, ctx: &CommandContext, command: &CommandData) -> Reply {
        let wallet = ctx.wallet_for(command);

        match self.lookup(ctx, &wallet).await {
            Ok(amount) => {
                info!(command = self.name, wallet = %wallet, amount = amount, "balance_command_complete");
                Reply::message(self.render(&wallet, amount))
            }
            Err(e) => {
                warn!(command = self.name, wallet = %wallet, error = %e, "balance_command_failed");
                Reply::message(self.failure)
            }
        }
    }
}
