//! Domain model (ids, invocations, statuses, errors).

pub mod errors;
pub mod ids;
pub mod invocation;

pub use self::errors::CourierError;
pub use self::ids::{CorrelationId, MessageId};
pub use self::invocation::{Kwargs, Status, TaskInvocation, WorkerKey};
