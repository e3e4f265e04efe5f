//! Slash command handlers.
//!
//! Each command is a [`CommandHandler`] registered in a [`CommandRegistry`]
//! at startup. Adding a command means adding a handler to
//! [`CommandRegistry::standard`], not touching the dispatcher.

pub mod balance;
pub mod handler;
pub mod market;
pub mod ownership;
pub mod registry;

pub use balance::BalanceCommand;
pub use handler::{CommandContext, CommandHandler, WALLET_OPTION};
pub use market::{MarketCommand, MarketListing, MARKET_LISTINGS};
pub use ownership::GuideOwnershipCommand;
pub use registry::CommandRegistry;

#[cfg(test)]
pub(crate) mod testing {
    //! Canned collaborators for handler tests.

    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;

    use super::CommandContext;
    use crate::chain::{AssetOwnership, Balance, BalanceLookup, ChainError, Token};
    use crate::Config;

    /// Returns a fixed amount for every token, or fails every call.
    #[derive(Clone)]
    pub struct StaticBalances {
        amount: Option<String>,
        seen: Arc<Mutex<Vec<(String, &'static str)>>>,
    }

    impl StaticBalances {
        pub fn amount(amount: &str) -> Self {
            Self {
                amount: Some(amount.to_string()),
                seen: Arc::default(),
            }
        }

        pub fn failing() -> Self {
            Self {
                amount: None,
                seen: Arc::default(),
            }
        }

        /// `(wallet, symbol)` of every lookup so far.
        pub fn seen(&self) -> Vec<(String, &'static str)> {
            self.seen.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl BalanceLookup for StaticBalances {
        async fn balance(&self, wallet: &str, token: &Token) -> Result<Balance, ChainError> {
            self.seen
                .lock()
                .unwrap()
                .push((wallet.to_string(), token.symbol));
            match &self.amount {
                Some(amount) => Ok(Balance {
                    contract: token.contract.to_string(),
                    symbol: token.symbol.to_string(),
                    amount: amount.clone(),
                }),
                None => Err(ChainError::Malformed("upstream unavailable".to_string())),
            }
        }
    }

    /// Answers every ownership check the same way.
    pub struct StaticOwnership(Option<bool>);

    impl StaticOwnership {
        pub fn owned(owned: bool) -> Self {
            Self(Some(owned))
        }

        pub fn failing() -> Self {
            Self(None)
        }
    }

    #[async_trait]
    impl AssetOwnership for StaticOwnership {
        async fn owns_template(
            &self,
            _wallet: &str,
            _collection: &str,
            _template_id: u64,
        ) -> Result<bool, ChainError> {
            self.0
                .ok_or_else(|| ChainError::Malformed("upstream unavailable".to_string()))
        }
    }

    pub fn context_with(
        balances: impl BalanceLookup + 'static,
        assets: impl AssetOwnership + 'static,
    ) -> CommandContext {
        CommandContext::new(
            Arc::new(Config::default()),
            Arc::new(balances),
            Arc::new(assets),
        )
    }

    pub fn context() -> CommandContext {
        context_with(StaticBalances::amount("123.4567"), StaticOwnership::owned(true))
    }
}
