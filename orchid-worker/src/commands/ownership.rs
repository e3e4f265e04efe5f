//! Drylands Guide ownership check (`/guide-test`).

use async_trait::async_trait;
use tracing::{info, warn};

use super::handler::{CommandContext, CommandHandler};
use super::market::{market_url, COLLECTION};
use crate::discord::registration::{CommandDefinition, CommandOptionDefinition};
use crate::discord::{CommandData, Reply};

/// Template id of the Drylands Guide NFT.
pub const DRYLANDS_GUIDE_TEMPLATE: u64 = 758752;

const FAILURE: &str = "❌ Failed to check Drylands Guide ownership. Please try again later.";

/// Tells a wallet whether it holds a Drylands Guide, with a market link if not.
pub struct GuideOwnershipCommand;

#[async_trait]
impl CommandHandler for GuideOwnershipCommand {
    fn definition(&self) -> CommandDefinition {
        CommandDefinition::new("guide-test", "Check whether a wallet owns a Drylands Guide")
            .with_option(CommandOptionDefinition::wallet())
    }

    async fn handle(&self, ctx: &CommandContext, command: &CommandData) -> Reply {
        let wallet = ctx.wallet_for(command);

        let owned = match ctx
            .assets
            .owns_template(&wallet, COLLECTION, DRYLANDS_GUIDE_TEMPLATE)
            .await
        {
            Ok(owned) => owned,
            Err(e) => {
                warn!(wallet = %wallet, error = %e, "guide_ownership_command_failed");
                return Reply::message(FAILURE);
            }
        };

        info!(wallet = %wallet, owned = owned, "guide_ownership_command_complete");

        if owned {
            return Reply::message(format!(
                "🌿 Wallet **{}** owns at least one **Drylands Guide** (template `{}`).",
                wallet, DRYLANDS_GUIDE_TEMPLATE
            ));
        }

        let template = DRYLANDS_GUIDE_TEMPLATE.to_string();
        let url = market_url(
            &ctx.config.atomichub_market_url,
            &[("collection_name", COLLECTION), ("template_id", &template)],
        );

        Reply::message(format!(
            "❌ Wallet **{}** does not currently own a **Drylands Guide**.\nYou can look for one on AtomicHub:\n{}",
            wallet, url
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::{context_with, StaticBalances, StaticOwnership};

    #[tokio::test]
    async fn test_owned() {
        let ctx = context_with(StaticBalances::amount("0"), StaticOwnership::owned(true));
        let reply = GuideOwnershipCommand.handle(&ctx, &CommandData::default()).await;
        assert_eq!(
            reply.content(),
            "🌿 Wallet **amfr2.wam** owns at least one **Drylands Guide** (template `758752`)."
        );
    }

    #[tokio::test]
    async fn test_not_owned_links_market() {
        let ctx = context_with(StaticBalances::amount("0"), StaticOwnership::owned(false));
        let reply = GuideOwnershipCommand.handle(&ctx, &CommandData::default()).await;
        assert_eq!(
            reply.content(),
            "❌ Wallet **amfr2.wam** does not currently own a **Drylands Guide**.\n\
             You can look for one on AtomicHub:\n\
             https://wax.atomichub.io/market?collection_name=orchidhunter&template_id=758752#sales"
        );
    }

    #[tokio::test]
    async fn test_lookup_failure() {
        let ctx = context_with(StaticBalances::amount("0"), StaticOwnership::failing());
        let reply = GuideOwnershipCommand.handle(&ctx, &CommandData::default()).await;
        assert_eq!(reply.content(), FAILURE);
    }
}
