//! Scheduled invocation guard.
//!
//! Wraps a cron job behind the same role check as queued messages and
//! brackets each run with launch/complete audit events. A process that is
//! not a receiver answers with the caller-declared fallback instead of
//! running the job. Cron triggers routinely hit every instance of a
//! deployment, and only the receiver may act.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Value, json};

use crate::config::Config;
use crate::domain::{CorrelationId, CourierError, Status};
use crate::report::{CronEvent, StatusReporter};

/// A recurring job body, invoked with the trigger's request context.
#[async_trait]
pub trait CronJob: Send + Sync {
    async fn run(&self, request: &Value) -> Result<(), CourierError>;
}

/// What to answer when invoked outside the receiver role.
#[derive(Debug, Clone)]
pub enum OnUnauthorized {
    /// Surface `CourierError::NotReceiver` (default).
    Raise,
    /// Return this value instead of an error (e.g. an HTTP-404 body).
    Respond(Value),
}

/// Recognized options of one guarded cron job.
#[derive(Debug, Clone)]
pub struct CronOptions {
    pub on_unauthorized: OnUnauthorized,
    /// Returned after a successful run, regardless of what the job did.
    pub success_response: Value,
}

impl Default for CronOptions {
    fn default() -> Self {
        Self {
            on_unauthorized: OnUnauthorized::Raise,
            success_response: json!(true),
        }
    }
}

/// Role-guarded, audited wrapper around one cron job.
pub struct CronGuard {
    name: String,
    job: Arc<dyn CronJob>,
    options: CronOptions,
    config: Config,
    reporter: StatusReporter,
}

impl CronGuard {
    pub fn new(
        name: impl Into<String>,
        job: Arc<dyn CronJob>,
        config: Config,
        reporter: StatusReporter,
    ) -> Self {
        Self {
            name: name.into(),
            job,
            options: CronOptions::default(),
            config,
            reporter,
        }
    }

    pub fn with_options(mut self, options: CronOptions) -> Self {
        self.options = options;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Run the guarded job once.
    ///
    /// A job error propagates before the complete event is reported; the
    /// audit trail then shows a launch with no matching completion.
    pub async fn invoke(&self, request: &Value) -> Result<Value, CourierError> {
        if !self.config.is_receiver {
            return match &self.options.on_unauthorized {
                OnUnauthorized::Respond(value) => Ok(value.clone()),
                OnUnauthorized::Raise => Err(CourierError::NotReceiver),
            };
        }

        // launch and complete share one correlation id
        let correlation_id = CorrelationId::generate();
        self.reporter
            .report_cron(&CronEvent {
                status: Status::LaunchCron,
                cron: self.name.clone(),
                correlation_id,
            })
            .await;

        self.job.run(request).await?;

        self.reporter
            .report_cron(&CronEvent {
                status: Status::CompleteCron,
                cron: self.name.clone(),
                correlation_id,
            })
            .await;

        Ok(self.options.success_response.clone())
    }
}
