//! Queue port - the durable, delay-capable message transport.
//!
//! Receive is push-based: an external trigger hands the raw body to the
//! receiver entry point, so this port only covers submission.

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum QueueError {
    #[error("queue submit failed: {0}")]
    SubmitFailed(String),
}

/// Queue port (interface).
///
/// Design:
/// - at-least-once delivery and delay handling live behind this seam;
///   the core imposes no ordering or exactly-once expectations on it.
/// - `submit` blocks until the transport has accepted the body; there are
///   no internal timeouts or retries; callers needing resilience add it
///   outside this crate.
#[async_trait]
pub trait Queue: Send + Sync {
    /// Submit one message body with a requested minimum delivery delay.
    /// Returns the transport's receipt identifier.
    async fn submit(&self, body: &str, delay_seconds: u32) -> Result<String, QueueError>;
}
