//! Notifier port - fan-out channel for status/audit events.

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("notifier publish failed: {0}")]
    PublishFailed(String),
}

/// Notifier port (interface).
///
/// Publication is fire-and-forget from the pipeline's perspective: the
/// status reporter logs and swallows any error coming out of here.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn publish(&self, subject: &str, body: &str) -> Result<(), NotifyError>;
}
