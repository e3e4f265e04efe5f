//! Balance and token types shared by the chain collaborators.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from upstream chain and AtomicAssets calls.
#[derive(Debug, Error)]
pub enum ChainError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("upstream returned status {status} from {endpoint}")]
    Status { endpoint: String, status: u16 },

    #[error("malformed upstream response: {0}")]
    Malformed(String),

    #[error("invalid asset amount: {0}")]
    InvalidAmount(String),

    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),
}

/// How a token's balance is read from the chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupMethod {
    /// `/v1/chain/get_currency_balance` with the wallet as `account`
    CurrencyBalance,
    /// `/v1/chain/get_table_rows` on the contract's `accounts` table, scoped by wallet
    AccountsTable,
}

/// A fungible token and where to find it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub contract: &'static str,
    pub symbol: &'static str,
    pub method: LookupMethod,
}

/// Native WAX token.
pub const WAXP: Token = Token {
    contract: "eosio.token",
    symbol: "WAXP",
    method: LookupMethod::CurrencyBalance,
};

/// Orchid Hunter's in-game token.
pub const KEIKI: Token = Token {
    contract: "orchidtokens",
    symbol: "KEIKI",
    method: LookupMethod::AccountsTable,
};

/// A token balance as reported by the chain.
///
/// `amount` is the decimal part of an asset string such as `"123.4567 WAXP"`;
/// it is already expressed in whole tokens and is never rescaled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Balance {
    pub contract: String,
    pub symbol: String,
    pub amount: String,
}

impl Balance {
    /// Zero balance for a token the wallet does not hold.
    pub fn zero(token: &Token) -> Self {
        Self {
            contract: token.contract.to_string(),
            symbol: token.symbol.to_string(),
            amount: "0".to_string(),
        }
    }

    /// Parse the amount for display.
    pub fn amount_f64(&self) -> Result<f64, ChainError> {
        self.amount
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| ChainError::InvalidAmount(self.amount.clone()))
    }
}

/// Split an EOSIO asset string (`"1.2345 KEIKI"`) into amount and symbol.
pub fn parse_asset(asset: &str) -> Result<(String, String), ChainError> {
    let mut parts = asset.split_whitespace();
    match (parts.next(), parts.next(), parts.next()) {
        (Some(amount), Some(symbol), None) => Ok((amount.to_string(), symbol.to_string())),
        _ => Err(ChainError::InvalidAmount(asset.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_asset() {
        assert_eq!(
            parse_asset("123.4567 WAXP").unwrap(),
            ("123.4567".to_string(), "WAXP".to_string())
        );
        assert!(parse_asset("123.4567").is_err());
        assert!(parse_asset("1 WAXP extra").is_err());
        assert!(parse_asset("").is_err());
    }

    #[test]
    fn test_balance_amount_f64() {
        let balance = Balance {
            contract: "orchidtokens".to_string(),
            symbol: "KEIKI".to_string(),
            amount: "12.5000".to_string(),
        };
        assert_eq!(balance.amount_f64().unwrap(), 12.5);

        let bad = Balance {
            amount: "lots".to_string(),
            ..balance
        };
        assert!(matches!(bad.amount_f64(), Err(ChainError::InvalidAmount(_))));
    }

    #[test]
    fn test_zero_balance() {
        let zero = Balance::zero(&KEIKI);
        assert_eq!(zero.symbol, "KEIKI");
        assert_eq!(zero.contract, "orchidtokens");
        assert_eq!(zero.amount_f64().unwrap(), 0.0);
    }
}
