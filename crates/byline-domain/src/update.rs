//! Signed update envelope exchanged with clients

use crate::call_id::CallId;
use serde::{Deserialize, Serialize};

/// Event type tag carried by every signed update
pub const UPDATE_EVENT_TYPE: &str = "response.function_call_arguments.done";

/// Action name for sidecar dimension updates
pub const DIMENSION_UPDATE_ACTION: &str = "sidecar_dimension_update";

/// The unit exchanged with the client
///
/// The envelope carries the serialized payload string and its signature.
/// Only the derived triple (call id, payload string, timestamp) is signed,
/// so transport layers may add routing fields around this envelope without
/// invalidating the signature.
///
/// A `SignedUpdate` is a value object: it holds no reference to the signing
/// key, and any field changed after signing leaves an unsigned object that
/// fails verification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignedUpdate {
    /// Event type tag (always [`UPDATE_EVENT_TYPE`] for updates this crate
    /// produces)
    #[serde(rename = "type")]
    pub event_type: String,

    /// Unique identifier for this update
    pub call_id: CallId,

    /// Domain action name
    pub name: String,

    /// Canonical JSON string of the scores payload merged with attribution
    /// metadata
    pub arguments: String,

    /// Hex-encoded authentication code over the canonical form
    ///
    /// Optional so that an envelope missing the field still deserializes;
    /// such an envelope is never trusted and simply fails verification.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signature: Option<String>,
}

impl SignedUpdate {
    /// Assemble a dimension update envelope
    pub fn dimension_update(call_id: CallId, arguments: String, signature: String) -> Self {
        Self {
            event_type: UPDATE_EVENT_TYPE.to_string(),
            call_id,
            name: DIMENSION_UPDATE_ACTION.to_string(),
            arguments,
            signature: Some(signature),
        }
    }
}
