//! Process signing key resolution.
//!
//! The key is resolved once and injected into the [`Signer`](crate::Signer)
//! at construction. It is immutable afterwards, so any number of concurrent
//! callers can sign and verify without coordination.

use rand::RngCore;
use std::fmt;
use tracing::warn;

/// Length in bytes of a generated ephemeral key (256 bits)
pub const EPHEMERAL_KEY_LEN: usize = 32;

/// Provenance of the process signing key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeySource {
    /// Loaded from external configuration; stable across restarts
    Configured,

    /// Generated at resolution time; valid only for this process lifetime
    Ephemeral,
}

/// The shared secret used to sign and verify updates
///
/// A configured secret is used verbatim as opaque bytes, never re-derived.
/// When no non-empty secret is configured, a fresh 256-bit value is drawn
/// from a CSPRNG instead; updates signed with such a key will not verify in
/// another process or after a restart.
///
/// The secret bytes are never logged or serialized. `Debug` output is
/// redacted, and the buffer is zeroed on drop.
#[derive(Clone)]
pub struct SigningKey {
    bytes: Vec<u8>,
    source: KeySource,
}

impl SigningKey {
    /// Resolve the process signing key from an optional configured secret
    ///
    /// Infallible: the absence of configuration is an expected case, handled
    /// by falling back to an ephemeral key. The fallback logs a warning,
    /// since cross-restart verification is not possible without a configured
    /// secret.
    pub fn resolve(secret: Option<&str>) -> Self {
        match secret {
            Some(s) if !s.is_empty() => Self {
                bytes: s.as_bytes().to_vec(),
                source: KeySource::Configured,
            },
            _ => {
                warn!(
                    "No signing secret configured; using an ephemeral key. \
                     Updates signed by this process will not verify across \
                     process restarts."
                );
                let mut bytes = vec![0u8; EPHEMERAL_KEY_LEN];
                rand::rng().fill_bytes(&mut bytes);
                Self {
                    bytes,
                    source: KeySource::Ephemeral,
                }
            }
        }
    }

    /// Get the raw key bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Get the provenance of this key
    pub fn source(&self) -> KeySource {
        self.source
    }
}

impl fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Never expose key material in debug output
        write!(f, "SigningKey({:?}, REDACTED)", self.source)
    }
}

impl Drop for SigningKey {
    fn drop(&mut self) {
        // Zero out the secret on drop to shrink the exposure window
        for byte in &mut self.bytes {
            *byte = 0;
        }
    }
}
