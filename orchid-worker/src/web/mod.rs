//! Web server module for the Discord interaction webhook.
//!
//! This module provides:
//! - Ed25519 request authentication
//! - The `/interactions` and `/health` endpoints

pub mod handlers;
pub mod signature;

pub use handlers::{health, interactions, router, AppState, HealthResponse};
pub use signature::{
    is_signature_verification_configured, verify_discord_signature, SIGNATURE_HEADER,
    TIMESTAMP_HEADER,
};
