//! Sender publish path: direct call or deferred queue submission.
//!
//! The same worker key serves two modes. `call` runs the worker in-process,
//! right now. `defer` hands the invocation to the queue for some receiver
//! to execute later, unless the process is configured local-only or has no
//! queue, in which case it quietly degrades to a direct call.

use std::sync::Arc;

use serde_json::Value;

use crate::codec::Pipeline;
use crate::config::Config;
use crate::dispatch::Dispatcher;
use crate::domain::{CourierError, Kwargs, MessageId, Status, TaskInvocation, WorkerKey};
use crate::ports::Queue;
use crate::report::StatusReporter;

/// What happened to a deferred call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Deferred {
    /// Executed synchronously in-process (local mode, or no queue wired).
    Ran,
    /// Submitted to the queue; some receiver will execute it.
    Queued { msg_id: MessageId, receipt: String },
}

/// Sender-side entry point.
pub struct Sender {
    config: Config,
    pipeline: Pipeline,
    queue: Option<Arc<dyn Queue>>,
    reporter: StatusReporter,
    dispatcher: Dispatcher,
}

impl Sender {
    pub fn new(
        config: Config,
        pipeline: Pipeline,
        queue: Option<Arc<dyn Queue>>,
        reporter: StatusReporter,
        dispatcher: Dispatcher,
    ) -> Self {
        Self {
            config,
            pipeline,
            queue,
            reporter,
            dispatcher,
        }
    }

    /// Direct call: invoke the worker synchronously in this process.
    pub async fn call(
        &self,
        key: WorkerKey,
        args: Vec<Value>,
        kwargs: Kwargs,
    ) -> Result<(), CourierError> {
        let invocation = TaskInvocation::new(key, args, kwargs);
        self.dispatcher.dispatch(&invocation).await
    }

    /// Deferred call with no delivery delay.
    pub async fn defer(
        &self,
        key: WorkerKey,
        args: Vec<Value>,
        kwargs: Kwargs,
    ) -> Result<Deferred, CourierError> {
        self.defer_with_delay(key, args, kwargs, 0).await
    }

    /// Deferred call. The only synchronous outcome in queued mode is the
    /// submission itself: the caller never blocks on worker completion, and
    /// a submission error propagates unmodified.
    pub async fn defer_with_delay(
        &self,
        key: WorkerKey,
        args: Vec<Value>,
        kwargs: Kwargs,
        delay_seconds: u32,
    ) -> Result<Deferred, CourierError> {
        let queue = match &self.queue {
            Some(queue) if self.config.queue_enabled() => queue,
            // ローカル実行にフォールバック（run_local または queue 未設定）
            _ => {
                self.call(key, args, kwargs).await?;
                return Ok(Deferred::Ran);
            }
        };

        let mut invocation =
            TaskInvocation::new(key, args, kwargs).with_delay(delay_seconds);
        let body = self
            .pipeline
            .encode(&invocation)
            .map_err(|e| CourierError::Encode(e.to_string()))?;

        let receipt = queue.submit(&body, delay_seconds).await?;
        tracing::debug!(msg_id = %invocation.msg_id, %receipt, "submitted to queue");

        self.reporter.report(&mut invocation, Status::Sent).await;
        Ok(Deferred::Queued {
            msg_id: invocation.msg_id,
            receipt,
        })
    }
}
