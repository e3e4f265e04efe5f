//! WAX blockchain collaborators.
//!
//! This module provides:
//! - `BalanceLookup`: token balances from a WAX chain RPC node
//! - `AssetOwnership`: NFT ownership checks against the AtomicAssets API
//!
//! Both are traits so command handlers can be exercised without a network.
//! Every call is a single attempt bounded by the shared client's timeout.

pub mod atomic;
pub mod types;
pub mod wax;

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

pub use atomic::AtomicAssetsClient;
pub use types::{Balance, ChainError, LookupMethod, Token, KEIKI, WAXP};
pub use wax::WaxRpcClient;

/// Source of token balances for a wallet.
#[async_trait]
pub trait BalanceLookup: Send + Sync {
    /// Fetch the balance of `token` held by `wallet`.
    ///
    /// A wallet holding none of the token yields a zero balance, not an error.
    async fn balance(&self, wallet: &str, token: &Token) -> Result<Balance, ChainError>;
}

/// Source of NFT ownership facts.
#[async_trait]
pub trait AssetOwnership: Send + Sync {
    /// Whether `wallet` owns at least one asset minted from `template_id`.
    async fn owns_template(
        &self,
        wallet: &str,
        collection: &str,
        template_id: u64,
    ) -> Result<bool, ChainError>;
}

/// Build the HTTP client shared by all collaborators.
pub fn build_http_client(timeout: Duration) -> Result<Client, ChainError> {
    Client::builder()
        .timeout(timeout)
        .pool_max_idle_per_host(16)
        .build()
        .map_err(ChainError::Http)
}
