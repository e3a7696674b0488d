use thiserror::Error;

use crate::domain::ids::MessageId;
use crate::domain::invocation::WorkerKey;
use crate::ports::queue::QueueError;

/// Failure taxonomy of the pipeline.
///
/// Everything here is raised to the immediate caller; nothing is retried
/// internally. The single deliberate exception is notifier publishing,
/// which is swallowed inside the status reporter so an audit failure can
/// never abort a send, receive, or dispatch.
#[derive(Debug, Error)]
pub enum CourierError {
    /// Operation requires the receiver role; treat as a permanent rejection.
    #[error("operation requires the receiver role")]
    NotReceiver,

    /// Authenticity check failed. Reported to the notifier before this is
    /// raised; never retried (possible tamper or stale secret).
    #[error("envelope signature mismatch for {msg_id}")]
    SignatureMismatch { msg_id: MessageId },

    #[error("no worker registered for key={0}")]
    WorkerNotFound(WorkerKey),

    #[error("duplicate worker registration for key={0}")]
    DuplicateWorker(WorkerKey),

    /// Malformed transport payload; fatal for that message.
    #[error("malformed message body: {0}")]
    Decode(String),

    /// Could not serialize an invocation for transport.
    #[error("encode failed: {0}")]
    Encode(String),

    /// Queue submission failed; propagated unmodified to the deferring caller.
    #[error(transparent)]
    Queue(#[from] QueueError),

    /// A worker reported failure; propagates unchanged through the receive
    /// entry point.
    #[error("worker failed: {0}")]
    Worker(String),
}
