//! Byline Domain Layer
//!
//! This crate contains the value objects shared by the Byline attribution
//! pipeline: the provenance metadata stamped onto every sidecar update, the
//! call identifiers that make updates traceable, the signed-update envelope
//! exchanged with clients, and the dimension score model the sidecar reports
//! against.
//!
//! ## Key Concepts
//!
//! - **Attribution**: Non-secret provenance (source, model, confidence,
//!   timestamp, call id) attached to every signed update
//! - **CallId**: A unique, per-invocation identifier for deduplication
//! - **SignedUpdate**: The wire envelope carrying a serialized payload and
//!   its signature
//! - **Dimensions**: The five assessment dimensions scored by the sidecar
//!
//! ## Architecture
//!
//! This crate holds pure data types only. Key management, canonicalization,
//! and signature computation live in `byline-signing`.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod attribution;
pub mod call_id;
pub mod dimension;
pub mod update;

// Re-exports for convenience
pub use attribution::{Attribution, ATTRIBUTION_KEY};
pub use call_id::CallId;
pub use dimension::{Dimension, Evidence, EvidenceKind, ScoreUpdate};
pub use update::{SignedUpdate, DIMENSION_UPDATE_ACTION, UPDATE_EVENT_TYPE};
