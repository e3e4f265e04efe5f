//! Discord interaction signature verification.
//!
//! Discord signs every interaction webhook with the application's Ed25519 key.
//! The signed message is the `X-Signature-Timestamp` header value followed
//! directly by the raw request body.
//! Reference: https://discord.com/developers/docs/interactions/overview#setting-up-an-endpoint-validating-security-request-headers

use ed25519_dalek::{Signature, VerifyingKey, PUBLIC_KEY_LENGTH, SIGNATURE_LENGTH};
use tracing::warn;

/// Header carrying the hex-encoded detached signature.
pub const SIGNATURE_HEADER: &str = "x-signature-ed25519";

/// Header carrying the timestamp that prefixes the signed message.
pub const TIMESTAMP_HEADER: &str = "x-signature-timestamp";

/// Verify a Discord interaction signature.
///
/// # Arguments
///
/// * `raw_body` - The request body exactly as received
/// * `signature` - The `X-Signature-Ed25519` header (hex)
/// * `timestamp` - The `X-Signature-Timestamp` header
/// * `public_key` - The application's public key (hex)
///
/// # Returns
///
/// `true` only if the signature verifies. Missing fields, bad hex, wrong
/// lengths and invalid keys all yield `false`.
pub fn verify_discord_signature(
    raw_body: &str,
    signature: &str,
    timestamp: &str,
    public_key: &str,
) -> bool {
    if public_key.is_empty() || signature.is_empty() || timestamp.is_empty() {
        warn!(
            has_public_key = !public_key.is_empty(),
            has_signature = !signature.is_empty(),
            has_timestamp = !timestamp.is_empty(),
            "discord_signature_missing_fields"
        );
        return false;
    }

    let key_bytes: [u8; PUBLIC_KEY_LENGTH] = match decode_fixed(public_key) {
        Some(bytes) => bytes,
        None => {
            warn!(key_length = public_key.len(), "discord_signature_invalid_key_hex");
            return false;
        }
    };

    let sig_bytes: [u8; SIGNATURE_LENGTH] = match decode_fixed(signature) {
        Some(bytes) => bytes,
        None => {
            warn!(signature_length = signature.len(), "discord_signature_invalid_hex");
            return false;
        }
    };

    let verifying_key = match VerifyingKey::from_bytes(&key_bytes) {
        Ok(key) => key,
        Err(e) => {
            warn!(error = %e, "discord_signature_invalid_key");
            return false;
        }
    };

    let signature = Signature::from_bytes(&sig_bytes);

    let mut message = Vec::with_capacity(timestamp.len() + raw_body.len());
    message.extend_from_slice(timestamp.as_bytes());
    message.extend_from_slice(raw_body.as_bytes());

    match verifying_key.verify_strict(&message, &signature) {
        Ok(()) => true,
        Err(e) => {
            warn!(
                timestamp = %timestamp,
                body_length = raw_body.len(),
                error = %e,
                "discord_signature_mismatch"
            );
            false
        }
    }
}

/// Hex-decode into an exactly sized array.
fn decode_fixed<const N: usize>(value: &str) -> Option<[u8; N]> {
    let bytes = hex::decode(value.trim()).ok()?;
    bytes.try_into().ok()
}

/// Check if a public key has been configured at all.
pub fn is_signature_verification_configured(public_key: &Option<String>) -> bool {
    public_key
        .as_ref()
        .map(|k| !k.trim().is_empty())
        .unwrap_or(false)
}
