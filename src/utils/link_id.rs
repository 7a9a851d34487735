//! Tracking id generation and validation utilities.
//!
//! Provides cryptographically secure random id generation for tracked links
//! and the syntactic gate applied to ids arriving on the redirect endpoint.

use crate::error::AppError;
use base64::Engine as _;
use serde_json::json;

/// Length of random bytes before base64 encoding.
const ID_LENGTH_BYTES: usize = 9;

/// Upper bound on accepted id length; generated ids are 12 characters, but the
/// redirect endpoint tolerates longer ids from older deployments.
const MAX_ID_LENGTH: usize = 64;

/// Generates a cryptographically secure random tracking id.
///
/// Uses `getrandom` for entropy and encodes the result as URL-safe base64
/// without padding, producing a 12-character id.
///
/// # Panics
///
/// Panics if the system random number generator fails (extremely rare).
pub fn generate_link_id() -> String {
    let mut buffer = [0u8; ID_LENGTH_BYTES];

    getrandom::fill(&mut buffer).expect("Failed to generate random bytes");

    base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(buffer)
}

/// Validates a tracking id taken from a redirect request path.
///
/// # Rules
///
/// - Non-empty, at most 64 characters
/// - Allowed characters: the URL-safe base64 alphabet (letters, digits, `-`, `_`)
///
/// Ids failing this gate are rejected before any store lookup.
///
/// # Errors
///
/// Returns [`AppError::Validation`] if any rule is violated.
pub fn validate_link_id(id: &str) -> Result<(), AppError> {
    if id.is_empty() {
        return Err(AppError::bad_request(
            "Tracking id must not be empty",
            json!({}),
        ));
    }

    if id.len() > MAX_ID_LENGTH {
        return Err(AppError::bad_request(
            "Tracking id is too long",
            json!({ "provided_length": id.len() }),
        ));
    }

    if !id
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(AppError::bad_request(
            "Tracking id contains invalid characters",
            json!({ "id": id }),
        ));
    }

    Ok(())
}
