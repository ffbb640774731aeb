//! Error types for update creation

use thiserror::Error;

/// Errors that can occur while creating a signed update
///
/// Verification has no error type: a malformed or forged message is simply
/// "not verified", reported as `false`.
#[derive(Error, Debug)]
pub enum SigningError {
    /// Payload serialization failed
    #[error("Failed to serialize scores payload: {0}")]
    Serialize(String),

    /// The scores payload did not serialize to a JSON object
    #[error("Scores payload must serialize to a JSON object")]
    PayloadNotObject,
}

impl From<serde_json::Error> for SigningError {
    fn from(e: serde_json::Error) -> Self {
        SigningError::Serialize(e.to_string())
    }
}
