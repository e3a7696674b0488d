//! Message codec (unsigned pipeline): plain JSON text.
//!
//! No authenticity guarantee. Malformed input is fatal for that message;
//! the caller does not retry here.

use crate::domain::TaskInvocation;

use super::CodecError;

pub fn encode(invocation: &TaskInvocation) -> Result<String, CodecError> {
    serde_json::to_string(invocation).map_err(|e| CodecError::Encode(e.to_string()))
}

pub fn decode(raw: &str) -> Result<TaskInvocation, CodecError> {
    serde_json::from_str(raw).map_err(|e| CodecError::Malformed(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Kwargs, WorkerKey};
    use serde_json::json;

    #[test]
    fn roundtrip() {
        let mut kwargs = Kwargs::new();
        kwargs.insert("to".to_string(), json!("ops@example.com"));
        let invocation = TaskInvocation::new(
            WorkerKey::new("mail.send"),
            vec![json!("hello")],
            kwargs,
        )
        .with_delay(30);

        let body = encode(&invocation).unwrap();
        assert_eq!(decode(&body).unwrap(), invocation);
    }

    #[test]
    fn malformed_input_is_a_decode_error() {
        let err = decode("{not json").unwrap_err();
        assert!(matches!(err, CodecError::Malformed(_)));

        // valid JSON, wrong shape
        let err = decode("{\"msg_id\": 42}").unwrap_err();
        assert!(matches!(err, CodecError::Malformed(_)));
    }
}
