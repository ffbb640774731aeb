//! Byline Signing
//!
//! Attribution signing and verification for sidecar updates.
//!
//! # Overview
//!
//! A sidecar model emits assessment updates out-of-band; those updates are
//! merged into a primary conversation stream before reaching the client.
//! This crate stamps each update with provenance metadata and a keyed
//! authentication code so that any holder of the shared secret can tell
//! which subsystem produced an update and whether it was altered in transit.
//!
//! # Architecture
//!
//! ```text
//! Scores → Signer → canonical JSON → HMAC-SHA256 → SignedUpdate → transport
//!                                                        │
//! Client/merge layer ← verify_signature ────────────────┘
//! ```
//!
//! # Key Features
//!
//! - **Key resolution**: A configured secret is used verbatim; when none is
//!   configured an ephemeral key is generated, with a warning that trust
//!   does not survive process restarts
//! - **Canonical JSON**: Deterministic serialization with sorted keys, so
//!   logically identical payloads sign identically
//! - **Constant-time verification**: Signature comparison never
//!   short-circuits; wrong key, tampering, and malformed input are all just
//!   "not verified"
//!
//! # Example Usage
//!
//! ```
//! use byline_signing::{Signer, SignerConfig};
//! use serde_json::json;
//!
//! let config = SignerConfig::default_test_config();
//! let signer = Signer::from_config(&config);
//!
//! let scores = json!({"scores": {"HL": 3.5}});
//! let update = signer
//!     .create_signed_update(&scores, "sidecar_groq", "llama-3.1-8b-instant", 0.82, None)
//!     .unwrap();
//!
//! assert!(signer.verify_signature(&update));
//! ```

#![warn(missing_docs)]

mod canonical;
mod config;
mod error;
mod key;
mod signer;

pub use canonical::canonical_string;
pub use config::{ConfigError, SignerConfig, SIGNING_SECRET_ENV};
pub use error::SigningError;
pub use key::{KeySource, SigningKey, EPHEMERAL_KEY_LEN};
pub use signer::Signer;
