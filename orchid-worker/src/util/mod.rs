//! Small shared helpers.

pub mod format;

pub use format::format_amount;
