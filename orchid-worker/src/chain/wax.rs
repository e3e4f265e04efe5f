//! WAX chain RPC client for token balances.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{error, info};

use super::types::{parse_asset, Balance, ChainError, LookupMethod, Token};
use super::BalanceLookup;

const CURRENCY_BALANCE_PATH: &str = "/v1/chain/get_currency_balance";
const TABLE_ROWS_PATH: &str = "/v1/chain/get_table_rows";

/// Balance lookups against an EOSIO-compatible RPC node.
#[derive(Clone)]
pub struct WaxRpcClient {
    client: Client,
    base_url: String,
}

#[derive(Debug, Serialize)]
struct CurrencyBalanceRequest<'a> {
    code: &'a str,
    account: &'a str,
    symbol: &'a str,
}

#[derive(Debug, Serialize)]
struct TableRowsRequest<'a> {
    code: &'a str,
    scope: &'a str,
    table: &'a str,
    json: bool,
    limit: u32,
}

#[derive(Debug, Deserialize)]
struct AccountRow {
    #[serde(default)]
    balance: Option<String>,
}

impl WaxRpcClient {
    /// Create a client for the node at `base_url` (no trailing slash).
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    async fn post(&self, path: &str, body: &impl Serialize) -> Result<Value, ChainError> {
        let endpoint = format!("{}{}", self.base_url, path);

        let response = self.client.post(&endpoint).json(body).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ChainError::Status {
                endpoint,
                status: status.as_u16(),
            });
        }

        Ok(response.json::<Value>().await?)
    }

    async fn currency_balance(&self, wallet: &str, token: &Token) -> Result<Balance, ChainError> {
        let request = CurrencyBalanceRequest {
            code: token.contract,
            account: wallet,
            symbol: token.symbol,
        };
        let body = self.post(CURRENCY_BALANCE_PATH, &request).await?;
        parse_currency_balance(&body, token)
    }

    async fn table_balance(&self, wallet: &str, token: &Token) -> Result<Balance, ChainError> {
        let request = TableRowsRequest {
            code: token.contract,
            scope: wallet,
            table: "accounts",
            json: true,
            limit: 100,
        };
        let body = self.post(TABLE_ROWS_PATH, &request).await?;
        parse_table_rows(&body, token)
    }
}

#[async_trait]
impl BalanceLookup for WaxRpcClient {
    async fn balance(&self, wallet: &str, token: &Token) -> Result<Balance, ChainError> {
        info!(
            wallet = %wallet,
            contract = token.contract,
            symbol = token.symbol,
            "wax_balance_fetch_starting"
        );

        let result = match token.method {
            LookupMethod::CurrencyBalance => self.currency_balance(wallet, token).await,
            LookupMethod::AccountsTable => self.table_balance(wallet, token).await,
        };

        match &result {
            Ok(balance) => info!(
                wallet = %wallet,
                symbol = %balance.symbol,
                amount = %balance.amount,
                "wax_balance_fetch_complete"
            ),
            Err(e) => error!(
                wallet = %wallet,
                symbol = token.symbol,
                error = %e,
                "wax_balance_fetch_failed"
            ),
        }

        result
    }
}

/// Parse a `get_currency_balance` response: `["123.4567 WAXP"]`.
///
/// An empty array means the account holds none of the token.
pub fn parse_currency_balance(body: &Value, token: &Token) -> Result<Balance, ChainError> {
    let assets = body
        .as_array()
        .ok_or_else(|| ChainError::Malformed("expected an array of assets".to_string()))?;

    for asset in assets {
        let asset = asset
            .as_str()
            .ok_or_else(|| ChainError::Malformed("asset is not a string".to_string()))?;
        let (amount, symbol) = parse_asset(asset)?;
        if symbol == token.symbol {
            return Ok(Balance {
                contract: token.contract.to_string(),
                symbol,
                amount,
            });
        }
    }

    Ok(Balance::zero(token))
}

/// Parse a `get_table_rows` response on an `accounts` table.
///
/// Nodes answer `{"rows": [...]}`; a JSON-RPC style `{"result": {"rows": [...]}}`
/// envelope is accepted too. Rows without a balance are skipped.
pub fn parse_table_rows(body: &Value, token: &Token) -> Result<Balance, ChainError> {
    let rows = body
        .get("rows")
        .or_else(|| body.get("result").and_then(|r| r.get("rows")))
        .ok_or_else(|| ChainError::Malformed("missing rows".to_string()))?;

    let rows: Vec<AccountRow> = serde_json::from_value(rows.clone())
        .map_err(|e| ChainError::Malformed(e.to_string()))?;

    for row in rows {
        let Some(asset) = row.balance else { continue };
        let (amount, symbol) = parse_asset(&asset)?;
        if symbol == token.symbol {
            return Ok(Balance {
                contract: token.contract.to_string(),
                symbol,
                amount,
            });
        }
    }

    Ok(Balance::zero(token))
}
