//! Call identifiers for sidecar updates

use serde::{Deserialize, Serialize};
use std::fmt;

/// Prefix carried by every generated call identifier
pub const CALL_ID_PREFIX: &str = "call_";

/// Unique identifier for a single sidecar update
///
/// Generated fresh per invocation as `call_` followed by 32 lowercase hex
/// characters from a random UUIDv4. Uniqueness is advisory: collision odds
/// are negligible within an operational window, and no registry is kept.
///
/// Deserialization accepts any string so that envelopes from untrusted
/// parties still parse; a forged or malformed id simply fails signature
/// verification downstream.
///
/// # Examples
///
/// ```
/// use byline_domain::CallId;
///
/// let id = CallId::new();
/// assert!(id.as_str().starts_with("call_"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CallId(String);

impl CallId {
    /// Generate a new random CallId
    pub fn new() -> Self {
        Self(format!("{}{}", CALL_ID_PREFIX, uuid::Uuid::new_v4().simple()))
    }

    /// Get the identifier as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for CallId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<String> for CallId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for CallId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for CallId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
