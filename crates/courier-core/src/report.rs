//! Status reporter: best-effort lifecycle events.
//!
//! Every pipeline transition is announced through the notifier so operators
//! can follow a message without any storage on this side. Publication is
//! fire-and-forget: a notifier failure is logged and swallowed, never
//! allowed to abort a send, receive, or dispatch.

use std::sync::Arc;

use serde::Serialize;

use crate::config::Config;
use crate::domain::{CorrelationId, Status, TaskInvocation};
use crate::ports::Notifier;

/// Audit event for one scheduled invocation transition.
///
/// Launch and complete events of the same invocation carry the same
/// correlation id.
#[derive(Debug, Clone, Serialize)]
pub struct CronEvent {
    pub status: Status,
    pub cron: String,
    pub correlation_id: CorrelationId,
}

/// Publishes lifecycle events; never blocks or fails the pipeline.
#[derive(Clone)]
pub struct StatusReporter {
    config: Config,
    notifier: Option<Arc<dyn Notifier>>,
}

impl StatusReporter {
    pub fn new(config: Config, notifier: Option<Arc<dyn Notifier>>) -> Self {
        Self { config, notifier }
    }

    /// Record a transition on the invocation and announce it.
    ///
    /// The status is set in place first, so the published body always shows
    /// the state the message just reached.
    pub async fn report(&self, invocation: &mut TaskInvocation, status: Status) {
        invocation.status = Some(status);
        self.publish(status.as_str(), invocation).await;
    }

    /// Announce a scheduled-invocation transition.
    ///
    /// The subject carries the cron name in parentheses so per-job alerting
    /// works on the subject alone.
    pub async fn report_cron(&self, event: &CronEvent) {
        let subject = format!("{} ({})", event.status, event.cron);
        self.publish(&subject, event).await;
    }

    async fn publish<T: Serialize>(&self, subject: &str, body: &T) {
        if !self.config.notify_enabled() {
            return;
        }
        let Some(notifier) = &self.notifier else {
            return;
        };
        let body = match serde_json::to_string(body) {
            Ok(body) => body,
            Err(err) => {
                tracing::warn!(subject, error = %err, "status event serialize failed; dropping");
                return;
            }
        };
        if let Err(err) = notifier.publish(subject, &body).await {
            tracing::warn!(subject, error = %err, "status publish failed; continuing");
        }
    }
}
