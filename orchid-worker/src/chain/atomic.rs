//! AtomicAssets API client for NFT ownership checks.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::{error, info};
use url::Url;

use super::types::ChainError;
use super::AssetOwnership;

const ASSETS_PATH: &str = "/atomicassets/v1/assets";

/// Read-only client for an AtomicAssets API mirror.
#[derive(Clone)]
pub struct AtomicAssetsClient {
    client: Client,
    base_url: String,
}

impl AtomicAssetsClient {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// Build the asset search URL for a single owned asset of a template.
    pub fn assets_url(
        &self,
        wallet: &str,
        collection: &str,
        template_id: u64,
    ) -> Result<Url, ChainError> {
        let mut url = Url::parse(&format!("{}{}", self.base_url, ASSETS_PATH))?;
        url.query_pairs_mut()
            .append_pair("collection_name", collection)
            .append_pair("template_id", &template_id.to_string())
            .append_pair("owner", wallet)
            .append_pair("limit", "1");
        Ok(url)
    }

    async fn fetch_ownership(&self, url: Url) -> Result<bool, ChainError> {
        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ChainError::Status {
                endpoint: url.to_string(),
                status: status.as_u16(),
            });
        }
        let body = response.json::<Value>().await?;
        parse_assets_response(&body)
    }
}

#[async_trait]
impl AssetOwnership for AtomicAssetsClient {
    async fn owns_template(
        &self,
        wallet: &str,
        collection: &str,
        template_id: u64,
    ) -> Result<bool, ChainError> {
        let url = self.assets_url(wallet, collection, template_id)?;

        info!(
            wallet = %wallet,
            collection = %collection,
            template_id = template_id,
            "atomic_ownership_check_starting"
        );

        let result = self.fetch_ownership(url).await;

        match &result {
            Ok(owned) => info!(wallet = %wallet, owned = *owned, "atomic_ownership_check_complete"),
            Err(e) => error!(wallet = %wallet, error = %e, "atomic_ownership_check_failed"),
        }

        result
    }
}

/// An assets response `{"success": true, "data": [...]}` proves ownership
/// when `data` holds at least one asset.
pub fn parse_assets_response(body: &Value) -> Result<bool, ChainError> {
    match body.get("data") {
        Some(Value::Array(assets)) => Ok(!assets.is_empty()),
        Some(_) => Err(ChainError::Malformed("data is not an array".to_string())),
        None => Err(ChainError::Malformed("missing data".to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_assets_url_encodes_query() {
        let client = AtomicAssetsClient::new(Client::new(), "https://wax.api.atomicassets.io");
        let url = client.assets_url("odd name&x", "orchidhunter", 758752).unwrap();
        assert_eq!(
            url.as_str(),
            "https://wax.api.atomicassets.io/atomicassets/v1/assets?collection_name=orchidhunter&template_id=758752&owner=odd+name%26x&limit=1"
        );
    }

    #[test]
    fn test_parse_assets_response() {
        assert!(parse_assets_response(&json!({"success": true, "data": [{"asset_id": "1"}]})).unwrap());
        assert!(!parse_assets_response(&json!({"success": true, "data": []})).unwrap());
        assert!(parse_assets_response(&json!({"success": false})).is_err());
        assert!(parse_assets_response(&json!({"data": "nope"})).is_err());
    }
}
