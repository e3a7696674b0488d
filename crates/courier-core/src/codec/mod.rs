//! Codec layer: invocation <-> transport-safe text.
//!
//! Two wire formats exist side by side:
//! - `message`: plain JSON, no authenticity guarantee.
//! - `envelope`: JSON payload wrapped with an HMAC signature and
//!   base64-armored for transports that reject arbitrary bytes.
//!
//! `Pipeline` is the seam that picks one of them per deployment.

pub mod envelope;
pub mod message;

use thiserror::Error;

use crate::domain::TaskInvocation;
use self::envelope::Signer;

#[derive(Debug, Error)]
pub enum CodecError {
    #[error("encode failed: {0}")]
    Encode(String),

    /// The text-safe transport layer could not be reversed.
    #[error("transport decode failed: {0}")]
    Transport(String),

    #[error("malformed payload: {0}")]
    Malformed(String),

    /// The recomputed signature did not match the one in the envelope.
    ///
    /// The decoded invocation rides along so the receive path can report
    /// the failure with full context before surfacing it.
    #[error("signature mismatch")]
    SignatureMismatch { invocation: Box<TaskInvocation> },
}

/// Wire-format selector for one sender/receiver pair.
///
/// Both ends of a queue must be constructed with the same variant (and,
/// for `Signed`, the same secret).
pub enum Pipeline {
    /// Plain JSON bodies; no authenticity check.
    Plain,
    /// Signed envelopes; bodies failing verification are never dispatched.
    Signed(Signer),
}

impl Pipeline {
    pub fn encode(&self, invocation: &TaskInvocation) -> Result<String, CodecError> {
        match self {
            Pipeline::Plain => message::encode(invocation),
            Pipeline::Signed(signer) => envelope::build(invocation, signer),
        }
    }

    pub fn decode(&self, raw: &str) -> Result<TaskInvocation, CodecError> {
        match self {
            Pipeline::Plain => message::decode(raw),
            Pipeline::Signed(signer) => envelope::open(raw, signer),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Kwargs, TaskInvocation, WorkerKey};
    use rstest::rstest;
    use serde_json::json;

    fn sample() -> TaskInvocation {
        let mut kwargs = Kwargs::new();
        kwargs.insert("x".to_string(), json!(3));
        TaskInvocation::new(
            WorkerKey::new("billing.charge"),
            vec![json!(1), json!(2)],
            kwargs,
        )
    }

    #[rstest]
    #[case::plain(Pipeline::Plain)]
    #[case::signed(Pipeline::Signed(Signer::new(b"secret".to_vec())))]
    fn both_pipelines_roundtrip(#[case] pipeline: Pipeline) {
        let invocation = sample();
        let body = pipeline.encode(&invocation).unwrap();
        let back = pipeline.decode(&body).unwrap();
        assert_eq!(back, invocation);
    }
}
