//! Task invocation: the unit of deferred work.
//!
//! A `TaskInvocation` is a serializable record of one function call deferred
//! for out-of-process execution. It is created at the sending call site,
//! mutated by the status reporter at each transition, and discarded once the
//! final status is out; there is no storage beyond the in-flight message.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::ids::MessageId;

/// Keyword arguments: name -> value, keys unique.
pub type Kwargs = serde_json::Map<String, Value>;

/// Dotted-path key identifying the target worker ("billing.charge").
///
/// Stable across processes: the sender and the receiver only have to agree
/// on the string, not on any code layout.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WorkerKey(String);

impl WorkerKey {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WorkerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Lifecycle status of an invocation, as reported to the notifier.
///
/// The wire/subject strings are fixed; operators alert on them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    #[serde(rename = "Sent")]
    Sent,
    #[serde(rename = "Received")]
    Received,
    #[serde(rename = "Complete")]
    Complete,
    #[serde(rename = "Signature Mismatch")]
    SignatureMismatch,
    #[serde(rename = "Failed")]
    Failed,
    #[serde(rename = "Launch Cron")]
    LaunchCron,
    #[serde(rename = "Complete Cron")]
    CompleteCron,
}

impl Status {
    pub fn as_str(self) -> &'static str {
        match self {
            Status::Sent => "Sent",
            Status::Received => "Received",
            Status::Complete => "Complete",
            Status::SignatureMismatch => "Signature Mismatch",
            Status::Failed => "Failed",
            Status::LaunchCron => "Launch Cron",
            Status::CompleteCron => "Complete Cron",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One deferred call: worker key plus the arguments to replay it with.
///
/// Design:
/// - `args`/`kwargs` are kept as JSON values so the sender and the worker
///   can agree on any serializable shape without this crate knowing it.
/// - `delay_seconds` and `status` only appear on the wire when set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskInvocation {
    pub msg_id: MessageId,
    pub worker_key: WorkerKey,
    pub args: Vec<Value>,
    pub kwargs: Kwargs,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delay_seconds: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
}

impl TaskInvocation {
    /// Create a fresh invocation with a newly generated message id.
    pub fn new(worker_key: WorkerKey, args: Vec<Value>, kwargs: Kwargs) -> Self {
        Self {
            msg_id: MessageId::generate(),
            worker_key,
            args,
            kwargs,
            delay_seconds: None,
            status: None,
        }
    }

    pub fn with_delay(mut self, delay_seconds: u32) -> Self {
        if delay_seconds > 0 {
            self.delay_seconds = Some(delay_seconds);
        }
        self
    }
}
