//! Display formatting for token amounts.

/// Number of fractional digits shown for every token amount.
pub const DISPLAY_DECIMALS: usize = 4;

/// Render an amount with exactly four digits after the decimal point.
pub fn format_amount(amount: f64) -> String {
    format!("{:.*}", DISPLAY_DECIMALS, amount)
}
