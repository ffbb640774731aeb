//! Attribution metadata for sidecar updates

use crate::call_id::CallId;
use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Reserved payload key under which attribution metadata is merged
///
/// If a caller's scores payload already contains this key, the generated
/// metadata replaces the caller's value.
pub const ATTRIBUTION_KEY: &str = "attribution";

/// Non-secret provenance record attached to every signed update
///
/// All fields are client-readable. The timestamp and call id are captured
/// once at issue time and thereafter carried by value: the signature covers
/// the rendered timestamp string, so both signing and verification must use
/// it verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attribution {
    /// Identifier of the producing subsystem (e.g., "sidecar_groq")
    pub source: String,

    /// Identifier of the underlying model used for inference
    pub model: String,

    /// Producer's self-reported confidence in [0, 1], passed through unchanged
    pub confidence: f64,

    /// Creation time, RFC 3339 UTC with microsecond precision
    pub timestamp: String,

    /// Unique identifier for this update
    pub call_id: CallId,

    /// Optional free-text justification; omitted entirely when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reasoning: Option<String>,
}

impl Attribution {
    /// Issue a new attribution record with a fresh call id and the current
    /// timestamp
    ///
    /// Confidence is not clamped or validated; the producer's self-report is
    /// passed through as given.
    ///
    /// # Examples
    ///
    /// ```
    /// use byline_domain::Attribution;
    ///
    /// let attribution = Attribution::issue("sidecar_groq", "llama-3.1-8b-instant", 0.82);
    /// assert_eq!(attribution.source, "sidecar_groq");
    /// assert!(attribution.reasoning.is_none());
    /// ```
    pub fn issue(source: impl Into<String>, model: impl Into<String>, confidence: f64) -> Self {
        Self {
            source: source.into(),
            model: model.into(),
            confidence,
            timestamp: current_timestamp(),
            call_id: CallId::new(),
            reasoning: None,
        }
    }

    /// Attach a reasoning string to this attribution
    pub fn with_reasoning(mut self, reasoning: impl Into<String>) -> Self {
        self.reasoning = Some(reasoning.into());
        self
    }
}

/// Render the current UTC time in the fixed form covered by signatures
pub(crate) fn current_timestamp() -> String {
    Utc::now().format("%Y-%m-%dT%H:%M:%S%.6fZ").to_string()
}
