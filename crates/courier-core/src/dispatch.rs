//! Worker resolution and dispatch.
//!
//! Workers are registered up front in an explicit table instead of being
//! resolved by dynamic lookup at dispatch time: a `WorkerKey` either maps
//! to a registered worker or dispatch fails with a typed error.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::{CourierError, Kwargs, TaskInvocation, WorkerKey};

/// A worker: the function ultimately executed to fulfill an invocation.
///
/// Whatever error a worker returns propagates unchanged to the caller of
/// the receive entry point; the core takes no recovery action.
#[async_trait]
pub trait Worker: Send + Sync {
    async fn call(&self, args: &[Value], kwargs: &Kwargs) -> Result<(), CourierError>;
}

/// Registry of workers (worker_key -> worker).
///
/// Design:
/// - Built during initialization (mutable).
/// - Used during dispatch (immutable, behind `Arc`).
/// This avoids locks and keeps resolution a plain map lookup.
#[derive(Default)]
pub struct WorkerRegistry {
    workers: HashMap<WorkerKey, Arc<dyn Worker>>,
}

impl WorkerRegistry {
    pub fn new() -> Self {
        Self {
            workers: HashMap::new(),
        }
    }

    /// Register a worker under its stable dotted-path key.
    pub fn register(
        &mut self,
        key: WorkerKey,
        worker: Arc<dyn Worker>,
    ) -> Result<(), CourierError> {
        if self.workers.contains_key(&key) {
            return Err(CourierError::DuplicateWorker(key));
        }
        self.workers.insert(key, worker);
        Ok(())
    }

    /// Resolve a key to its worker.
    pub fn resolve(&self, key: &WorkerKey) -> Result<Arc<dyn Worker>, CourierError> {
        self.workers
            .get(key)
            .cloned()
            .ok_or_else(|| CourierError::WorkerNotFound(key.clone()))
    }

    pub fn len(&self) -> usize {
        self.workers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.workers.is_empty()
    }
}

/// Dispatcher: resolves an invocation's worker and invokes it with the
/// stored arguments, exactly as they came off the wire.
pub struct Dispatcher {
    registry: Arc<WorkerRegistry>,
}

impl Dispatcher {
    pub fn new(registry: Arc<WorkerRegistry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &WorkerRegistry {
        &self.registry
    }

    pub async fn dispatch(&self, invocation: &TaskInvocation) -> Result<(), CourierError> {
        let worker = self.registry.resolve(&invocation.worker_key)?;
        worker.call(&invocation.args, &invocation.kwargs).await
    }
}
