//! Attribution signing and verification

use crate::canonical::canonical_string;
use crate::config::SignerConfig;
use crate::error::SigningError;
use crate::key::{KeySource, SigningKey};
use byline_domain::{Attribution, SignedUpdate, ATTRIBUTION_KEY};
use hmac::{Hmac, Mac};
use serde::Serialize;
use serde_json::{json, Value};
use sha2::Sha256;
use subtle::ConstantTimeEq;
use tracing::{debug, warn};

type HmacSha256 = Hmac<Sha256>;

/// Signs sidecar updates with attribution metadata and verifies them
///
/// The signer owns the process signing key, resolved once at construction
/// and immutable afterwards. Signing and verification are pure CPU-bound
/// computations taking `&self`, so a single instance can be shared across
/// any number of threads without coordination.
pub struct Signer {
    key: SigningKey,
}

impl Signer {
    /// Create a signer from an already-resolved key
    ///
    /// Tests can construct signers with distinct keys this way without any
    /// shared process state.
    pub fn new(key: SigningKey) -> Self {
        Self { key }
    }

    /// Create a signer from configuration, resolving the key
    pub fn from_config(config: &SignerConfig) -> Self {
        Self::new(SigningKey::resolve(config.signing_secret.as_deref()))
    }

    /// Get the provenance of the signing key
    pub fn key_source(&self) -> KeySource {
        self.key.source()
    }

    /// Create a signed update event for a sidecar assessment
    ///
    /// The scores payload must serialize to a JSON object; it is merged with
    /// freshly issued attribution metadata under the reserved
    /// [`ATTRIBUTION_KEY`] field, canonicalized, and signed. Confidence and
    /// reasoning pass through unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`SigningError::Serialize`] when the scores fail to
    /// serialize, and [`SigningError::PayloadNotObject`] when they serialize
    /// to something other than an object. There is no partial signing.
    pub fn create_signed_update<S: Serialize>(
        &self,
        scores: &S,
        source: &str,
        model: &str,
        confidence: f64,
        reasoning: Option<&str>,
    ) -> Result<SignedUpdate, SigningError> {
        // Metadata is fixed here, before canonicalization, and not
        // recomputed afterwards
        let mut attribution = Attribution::issue(source, model, confidence);
        if let Some(reasoning) = reasoning {
            attribution = attribution.with_reasoning(reasoning);
        }

        let mut payload = match serde_json::to_value(scores)? {
            Value::Object(map) => map,
            _ => return Err(SigningError::PayloadNotObject),
        };

        let displaced = payload.insert(
            ATTRIBUTION_KEY.to_string(),
            serde_json::to_value(&attribution)?,
        );
        if displaced.is_some() {
            warn!(
                "Scores payload already contained '{}'; caller value replaced by generated metadata",
                ATTRIBUTION_KEY
            );
        }

        let arguments = canonical_string(&Value::Object(payload));
        let input = signing_input(
            attribution.call_id.as_str(),
            &arguments,
            &attribution.timestamp,
        );
        let signature = hex::encode(self.compute_mac(&input));

        debug!(
            "Created signed update {} from source '{}'",
            attribution.call_id, source
        );

        Ok(SignedUpdate::dimension_update(
            attribution.call_id,
            arguments,
            signature,
        ))
    }

    /// Verify the signature on an update
    ///
    /// The claimed signature is compared against the recomputed code in its
    /// rendered lowercase hex form, so any character difference fails, hex
    /// case included. Returns `false` for a missing signature, an unparseable
    /// payload, a missing or malformed timestamp, or a code mismatch; the
    /// reasons are deliberately indistinguishable in the result. Never panics
    /// on malformed input.
    pub fn verify_signature(&self, update: &SignedUpdate) -> bool {
        let Some(claimed) = update.signature.as_deref() else {
            return false;
        };

        // The timestamp lives inside the signed payload; it must be present
        // and parseable to reconstruct the canonical form
        let Ok(payload) = serde_json::from_str::<Value>(&update.arguments) else {
            return false;
        };
        let Some(timestamp) = payload
            .get(ATTRIBUTION_KEY)
            .and_then(|a| a.get("timestamp"))
            .and_then(Value::as_str)
        else {
            return false;
        };
        if chrono::DateTime::parse_from_rfc3339(timestamp).is_err() {
            return false;
        }

        let input = signing_input(update.call_id.as_str(), &update.arguments, timestamp);
        let expected = hex::encode(self.compute_mac(&input));

        // Constant-time comparison over the rendered hex; a length mismatch
        // is public information, hex case is significant
        claimed.as_bytes().ct_eq(expected.as_bytes()).into()
    }

    fn compute_mac(&self, input: &str) -> Vec<u8> {
        let mut mac = HmacSha256::new_from_slice(self.key.as_bytes())
            .expect("HMAC accepts keys of any length");
        mac.update(input.as_bytes());
        mac.finalize().into_bytes().to_vec()
    }
}

/// Canonical form covered by the signature: the derived triple of call id,
/// serialized payload string, and timestamp
///
/// Signing this triple rather than the full envelope keeps fields added
/// later by transport layers outside the signed content.
fn signing_input(call_id: &str, arguments: &str, timestamp: &str) -> String {
    canonical_string(&json!({
        "call_id": call_id,
        "payload": arguments,
        "timestamp": timestamp,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_signer() -> Signer {
        Signer::from_config(&SignerConfig::default_test_config())
    }

    #[test]
    fn test_sign_and_verify_roundtrip() {
        let signer = test_signer();
        let update = signer
            .create_signed_update(&json!({"tone": 0.7}), "sidecar_a", "m1", 0.9, None)
            .unwrap();

        assert!(signer.verify_signature(&update));
    }

    #[test]
    fn test_signature_is_hmac_sha256_hex() {
        let signer = test_signer();
        let update = signer
            .create_signed_update(&json!({"tone": 0.7}), "sidecar_a", "m1", 0.9, None)
            .unwrap();

        let signature = update.signature.unwrap();
        assert_eq!(signature.len(), 64);
        assert!(signature.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_missing_signature_is_not_verified() {
        let signer = test_signer();
        let mut update = signer
            .create_signed_update(&json!({"tone": 0.7}), "sidecar_a", "m1", 0.9, None)
            .unwrap();

        update.signature = None;
        assert!(!signer.verify_signature(&update));
    }

    #[test]
    fn test_non_hex_signature_is_not_verified() {
        let signer = test_signer();
        let mut update = signer
            .create_signed_update(&json!({"tone": 0.7}), "sidecar_a", "m1", 0.9, None)
            .unwrap();

        update.signature = Some("not hex at all".to_string());
        assert!(!signer.verify_signature(&update));
    }

    #[test]
    fn test_uppercase_signature_is_not_verified() {
        // The code is its lowercase hex rendering; a case-changed copy is a
        // different signature
        let signer = test_signer();
        let mut update = signer
            .create_signed_update(&json!({"tone": 0.7}), "sidecar_a", "m1", 0.9, None)
            .unwrap();

        update.signature = update.signature.map(|s| s.to_ascii_uppercase());
        assert!(!signer.verify_signature(&update));
    }

    #[test]
    fn test_truncated_signature_is_not_verified() {
        let signer = test_signer();
        let mut update = signer
            .create_signed_update(&json!({"tone": 0.7}), "sidecar_a", "m1", 0.9, None)
            .unwrap();

        let truncated = update.signature.unwrap()[..32].to_string();
        update.signature = Some(truncated);
        assert!(!signer.verify_signature(&update));
    }

    #[test]
    fn test_tampered_arguments_not_verified() {
        let signer = test_signer();
        let mut update = signer
            .create_signed_update(&json!({"tone": 0.7}), "sidecar_a", "m1", 0.9, None)
            .unwrap();

        update.arguments = update.arguments.replace("0.7", "0.9");
        assert!(!signer.verify_signature(&update));
    }

    #[test]
    fn test_tampered_call_id_not_verified() {
        let signer = test_signer();
        let mut update = signer
            .create_signed_update(&json!({"tone": 0.7}), "sidecar_a", "m1", 0.9, None)
            .unwrap();

        update.call_id = byline_domain::CallId::from("call_ffffffffffffffffffffffffffffffff");
        assert!(!signer.verify_signature(&update));
    }

    #[test]
    fn test_wrong_key_not_verified() {
        let signer1 = Signer::new(SigningKey::resolve(Some("secret1")));
        let signer2 = Signer::new(SigningKey::resolve(Some("secret2")));

        let update = signer1
            .create_signed_update(&json!({"tone": 0.7}), "sidecar_a", "m1", 0.9, None)
            .unwrap();

        assert!(!signer2.verify_signature(&update));
    }

    #[test]
    fn test_same_secret_verifies_across_instances() {
        let signer1 = Signer::new(SigningKey::resolve(Some("shared")));
        let signer2 = Signer::new(SigningKey::resolve(Some("shared")));

        let update = signer1
            .create_signed_update(&json!({"tone": 0.7}), "sidecar_a", "m1", 0.9, None)
            .unwrap();

        assert!(signer2.verify_signature(&update));
    }

    #[test]
    fn test_scores_must_be_an_object() {
        let signer = test_signer();

        let result = signer.create_signed_update(&json!([1, 2, 3]), "sidecar_a", "m1", 0.9, None);
        assert!(matches!(result, Err(SigningError::PayloadNotObject)));

        let result = signer.create_signed_update(&json!("scores"), "sidecar_a", "m1", 0.9, None);
        assert!(matches!(result, Err(SigningError::PayloadNotObject)));
    }

    #[test]
    fn test_reserved_key_is_overwritten() {
        let signer = test_signer();
        let update = signer
            .create_signed_update(
                &json!({"tone": 0.7, "attribution": "spoofed"}),
                "sidecar_a",
                "m1",
                0.9,
                None,
            )
            .unwrap();

        let decoded: Value = serde_json::from_str(&update.arguments).unwrap();
        assert_eq!(decoded[ATTRIBUTION_KEY]["source"], "sidecar_a");
        assert!(signer.verify_signature(&update));
    }

    #[test]
    fn test_metadata_embedded_in_arguments() {
        let signer = test_signer();
        let update = signer
            .create_signed_update(
                &json!({"tone": 0.7}),
                "sidecar_a",
                "m1",
                0.9,
                Some("clear tone shift"),
            )
            .unwrap();

        let decoded: Value = serde_json::from_str(&update.arguments).unwrap();
        let attribution = &decoded[ATTRIBUTION_KEY];

        assert_eq!(decoded["tone"], 0.7);
        assert_eq!(attribution["source"], "sidecar_a");
        assert_eq!(attribution["model"], "m1");
        assert_eq!(attribution["confidence"], 0.9);
        assert_eq!(attribution["reasoning"], "clear tone shift");
        assert_eq!(attribution["call_id"], update.call_id.as_str());
    }

    #[test]
    fn test_reasoning_key_absent_when_not_supplied() {
        let signer = test_signer();
        let update = signer
            .create_signed_update(&json!({"tone": 0.7}), "sidecar_a", "m1", 0.9, None)
            .unwrap();

        let decoded: Value = serde_json::from_str(&update.arguments).unwrap();
        assert!(decoded[ATTRIBUTION_KEY].get("reasoning").is_none());
    }

    #[test]
    fn test_unparseable_arguments_not_verified() {
        let signer = test_signer();
        let mut update = signer
            .create_signed_update(&json!({"tone": 0.7}), "sidecar_a", "m1", 0.9, None)
            .unwrap();

        update.arguments = "not json".to_string();
        assert!(!signer.verify_signature(&update));
    }

    #[test]
    fn test_missing_timestamp_not_verified() {
        let signer = test_signer();
        let mut update = signer
            .create_signed_update(&json!({"tone": 0.7}), "sidecar_a", "m1", 0.9, None)
            .unwrap();

        update.arguments = r#"{"attribution":{"source":"sidecar_a"}}"#.to_string();
        assert!(!signer.verify_signature(&update));
    }

    #[test]
    fn test_unparseable_timestamp_not_verified() {
        // Even a correctly MAC'd message fails when its timestamp does not
        // parse: the canonical form cannot be trusted without it
        let signer = test_signer();
        let payload = json!({
            "tone": 0.7,
            "attribution": {"timestamp": "not-a-time"}
        });
        let arguments = canonical_string(&payload);
        let input = signing_input("call_0af1", &arguments, "not-a-time");
        let signature = hex::encode(signer.compute_mac(&input));

        let update = SignedUpdate::dimension_update(
            byline_domain::CallId::from("call_0af1"),
            arguments,
            signature,
        );
        assert!(!signer.verify_signature(&update));
    }

    #[test]
    fn test_key_source_is_exposed() {
        assert_eq!(test_signer().key_source(), KeySource::Configured);
        assert_eq!(
            Signer::new(SigningKey::resolve(None)).key_source(),
            KeySource::Ephemeral
        );
    }
}
