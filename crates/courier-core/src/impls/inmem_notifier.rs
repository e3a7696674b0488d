//! In-memory notifier implementation (dev/tests).

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::ports::{Notifier, NotifyError};

/// One published event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishedEvent {
    pub subject: String,
    pub body: String,
}

/// In-memory `Notifier` recording every published event in order.
#[derive(Default)]
pub struct InMemoryNotifier {
    events: Mutex<Vec<PublishedEvent>>,
}

impl InMemoryNotifier {
    pub fn new() -> Self {
        Self {
            events: Mutex::new(Vec::new()),
        }
    }

    /// Snapshot of everything published so far.
    pub async fn published(&self) -> Vec<PublishedEvent> {
        self.events.lock().await.clone()
    }

    /// Subjects only, in publish order. Handy for asserting audit trails.
    pub async fn subjects(&self) -> Vec<String> {
        self.events
            .lock()
            .await
            .iter()
            .map(|e| e.subject.clone())
            .collect()
    }
}

#[async_trait]
impl Notifier for InMemoryNotifier {
    async fn publish(&self, subject: &str, body: &str) -> Result<(), NotifyError> {
        self.events.lock().await.push(PublishedEvent {
            subject: subject.to_string(),
            body: body.to_string(),
        });
        Ok(())
    }
}
