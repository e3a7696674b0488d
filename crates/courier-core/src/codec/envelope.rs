//! Envelope codec (signed pipeline): tamper-evident message bodies.
//!
//! Wire layout, outside in:
//! 1. base64 text armor (the transport rejects some byte values, so the
//!    final bytes always go through a reversible text-safe layer).
//! 2. JSON `Envelope { payload, signature }`.
//! 3. `payload`: the serialized `TaskInvocation` bytes, signed as-is.
//!
//! The signature is HMAC-SHA256 over the exact payload bytes, hex-encoded.
//! Signer and verifier must recompute it identically from the same secret
//! and payload; any mismatch is a hard authenticity failure.

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;

use crate::domain::TaskInvocation;

use super::CodecError;

type HmacSha256 = Hmac<Sha256>;

/// Holds the shared secret and produces deterministic keyed digests.
///
/// An empty secret is accepted: signing then degrades to a fixed, guessable
/// digest with no real authentication. That is documented behavior for
/// local development, not a special case in code; it only gets a warning.
#[derive(Clone)]
pub struct Signer {
    secret: Vec<u8>,
}

impl Signer {
    pub fn new(secret: impl Into<Vec<u8>>) -> Self {
        let secret = secret.into();
        if secret.is_empty() {
            tracing::warn!("signing secret is empty; envelopes carry no real authenticity");
        }
        Self { secret }
    }

    /// Hex HMAC-SHA256 over the payload bytes. Same inputs, same output.
    pub fn sign(&self, payload: &[u8]) -> String {
        let mut mac = HmacSha256::new_from_slice(&self.secret)
            .expect("HMAC accepts keys of any length");
        mac.update(payload);
        hex::encode(mac.finalize().into_bytes())
    }
}

/// Signed wrapper around a serialized invocation.
#[derive(Debug, Serialize, Deserialize)]
struct Envelope {
    /// Opaque serialized `TaskInvocation` bytes.
    #[serde(with = "base64_bytes")]
    payload: Vec<u8>,

    /// Hex keyed digest over `payload`.
    signature: String,
}

/// Serde helper: byte vectors as base64 strings inside the envelope JSON.
mod base64_bytes {
    use base64::Engine;
    use base64::engine::general_purpose::STANDARD;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S>(bytes: &Vec<u8>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        STANDARD.encode(bytes).serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<u8>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        STANDARD.decode(&s).map_err(serde::de::Error::custom)
    }
}

/// Serialize, sign, and armor one invocation for transport.
pub fn build(invocation: &TaskInvocation, signer: &Signer) -> Result<String, CodecError> {
    let payload =
        serde_json::to_vec(invocation).map_err(|e| CodecError::Encode(e.to_string()))?;
    let envelope = Envelope {
        signature: signer.sign(&payload),
        payload,
    };
    let bytes = serde_json::to_vec(&envelope).map_err(|e| CodecError::Encode(e.to_string()))?;
    Ok(BASE64.encode(bytes))
}

/// Reverse `build`: un-armor, verify, and reconstruct the invocation.
///
/// The payload is decoded before the signature check so a mismatch can be
/// reported with the message's own identity; the invocation inside the
/// mismatch error has been verified by nobody and must never be dispatched.
pub fn open(raw: &str, signer: &Signer) -> Result<TaskInvocation, CodecError> {
    let bytes = BASE64
        .decode(raw.trim())
        .map_err(|e| CodecError::Transport(e.to_string()))?;
    let envelope: Envelope =
        serde_json::from_slice(&bytes).map_err(|e| CodecError::Malformed(e.to_string()))?;
    let invocation: TaskInvocation = serde_json::from_slice(&envelope.payload)
        .map_err(|e| CodecError::Malformed(e.to_string()))?;

    // exact equality; no partial trust
    if signer.sign(&envelope.payload) != envelope.signature {
        return Err(CodecError::SignatureMismatch {
            invocation: Box::new(invocation),
        });
    }
    Ok(invocation)
}
