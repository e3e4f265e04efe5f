//! AtomicHub market-link commands (`/guides`, `/beasts`, `/vehicles`).

use async_trait::async_trait;
use tracing::info;
use url::Url;

use super::handler::{CommandContext, CommandHandler};
use crate::discord::registration::CommandDefinition;
use crate::discord::{CommandData, Embed, Reply};

/// NFT collection the market links point at.
pub const COLLECTION: &str = "orchidhunter";

/// A schema of the collection with its own purchase command.
#[derive(Debug, Clone, Copy)]
pub struct MarketListing {
    pub command: &'static str,
    pub schema: &'static str,
    pub label: &'static str,
    pub emoji: &'static str,
    pub description: &'static str,
}

/// Every market-link command the bot answers.
pub const MARKET_LISTINGS: &[MarketListing] = &[
    MarketListing {
        command: "guides",
        schema: "guides",
        label: "Guides",
        emoji: "👤",
        description: "Find Guides for sale on AtomicHub",
    },
    MarketListing {
        command: "beasts",
        schema: "beasts",
        label: "Beasts",
        emoji: "🐺",
        description: "Find Beasts for sale on AtomicHub",
    },
    MarketListing {
        command: "vehicles",
        schema: "vehicles",
        label: "Vehicles",
        emoji: "🚣🏾‍♀️",
        description: "Find Vehicles for sale on AtomicHub",
    },
];

/// Replies with a link to the AtomicHub sales of one schema.
pub struct MarketCommand {
    listing: MarketListing,
}

impl MarketCommand {
    pub fn new(listing: MarketListing) -> Self {
        Self { listing }
    }
}

/// Build an AtomicHub market URL filtered by the given query pairs, anchored at `#sales`.
pub fn market_url(base: &str, filters: &[(&str, &str)]) -> String {
    match Url::parse(base) {
        Ok(mut url) => {
            url.query_pairs_mut().extend_pairs(filters);
            url.set_fragment(Some("sales"));
            url.to_string()
        }
        // Not an absolute URL: append the query verbatim.
        Err(_) => {
            let query: Vec<String> = filters.iter().map(|(k, v)| format!("{}={}", k, v)).collect();
            format!("{}?{}#sales", base, query.join("&"))
        }
    }
}

#[async_trait]
impl CommandHandler for MarketCommand {
    fn definition(&self) -> CommandDefinition {
        CommandDefinition::new(self.listing.command, self.listing.description)
    }

    async fn handle(&self, ctx: &CommandContext, _command: &CommandData) -> Reply {
        let MarketListing {
            schema,
            label,
            emoji,
            ..
        } = self.listing;
        let lower = label.to_lowercase();

        let url = market_url(
            &ctx.config.atomichub_market_url,
            &[("collection_name", COLLECTION), ("schema_name", schema)],
        );

        info!(command = self.listing.command, url = %url, "market_command_complete");

        Reply::message(format!(
            "{} You do not have any {} registered. To purchase, use the link below.",
            emoji, lower
        ))
        .with_embed(Embed {
            title: format!("Buy {} on AtomicHub", label),
            description: format!("Click here to view {} on AtomicHub.", lower),
            url,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::context;

    #[test]
    fn test_market_url() {
        assert_eq!(
            market_url(
                "https://wax.atomichub.io/market",
                &[("collection_name", "orchidhunter"), ("schema_name", "beasts")]
            ),
            "https://wax.atomichub.io/market?collection_name=orchidhunter&schema_name=beasts#sales"
        );
    }

    #[test]
    fn test_market_url_unparsable_base() {
        assert_eq!(
            market_url("atomichub", &[("template_id", "1")]),
            "atomichub?template_id=1#sales"
        );
    }

    #[tokio::test]
    async fn test_beasts_reply() {
        let ctx = context();
        let handler = MarketCommand::new(MARKET_LISTINGS[1]);

        let reply = handler.handle(&ctx, &CommandData::default()).await;

        assert_eq!(
            reply.content(),
            "🐺 You do not have any beasts registered. To purchase, use the link below."
        );
        assert_eq!(reply.data.embeds.len(), 1);
        let embed = &reply.data.embeds[0];
        assert_eq!(embed.title, "Buy Beasts on AtomicHub");
        assert_eq!(embed.description, "Click here to view beasts on AtomicHub.");
        assert!(embed.url.ends_with("schema_name=beasts#sales"));
    }

    #[test]
    fn test_listing_names_are_unique() {
        let mut names: Vec<_> = MARKET_LISTINGS.iter().map(|l| l.command).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), MARKET_LISTINGS.len());
    }
}
