//! In-memory queue implementation (dev/tests).

use std::collections::VecDeque;

use async_trait::async_trait;
use tokio::sync::Mutex;
use ulid::Ulid;

use crate::ports::{Queue, QueueError};

/// One accepted submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueuedMessage {
    pub body: String,
    pub delay_seconds: u32,
    pub receipt: String,
}

/// In-memory `Queue` recording every submission in order.
///
/// The delay is recorded, not simulated: tests and the demo binary drain
/// messages themselves, so there is nothing to sleep for here.
#[derive(Default)]
pub struct InMemoryQueue {
    messages: Mutex<VecDeque<QueuedMessage>>,
}

impl InMemoryQueue {
    pub fn new() -> Self {
        Self {
            messages: Mutex::new(VecDeque::new()),
        }
    }

    /// Take the oldest submitted message, if any.
    pub async fn pop(&self) -> Option<QueuedMessage> {
        self.messages.lock().await.pop_front()
    }

    pub async fn len(&self) -> usize {
        self.messages.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.messages.lock().await.is_empty()
    }
}

#[async_trait]
impl Queue for InMemoryQueue {
    async fn submit(&self, body: &str, delay_seconds: u32) -> Result<String, QueueError> {
        let receipt = Ulid::new().to_string();
        self.messages.lock().await.push_back(QueuedMessage {
            body: body.to_string(),
            delay_seconds,
            receipt: receipt.clone(),
        });
        Ok(receipt)
    }
}
