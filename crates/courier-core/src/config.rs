//! Process configuration.
//!
//! One explicit value passed into each component at construction. There is
//! no global settings singleton, so the core stays testable without
//! touching the process environment.

/// Settings for one sender/receiver process. Everything defaults to
/// disabled/empty.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// May this process decode and dispatch incoming messages?
    pub is_receiver: bool,

    /// Queue address. `None` makes deferred calls run in-process.
    pub queue_url: Option<String>,

    /// Notification topic address. `None` disables status reporting.
    pub topic: Option<String>,

    /// Region identifier, carried opaquely for cloud port implementations.
    pub region: Option<String>,

    /// Shared signing secret for the signed pipeline.
    pub secret: Vec<u8>,

    /// Force synchronous direct execution and suppress all external calls.
    pub run_local: bool,
}

impl Config {
    /// Read settings from `COURIER_*` environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as `from_env`, but with an injectable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            is_receiver: lookup("COURIER_IS_RECEIVER").is_some_and(|v| truthy(&v)),
            queue_url: lookup("COURIER_QUEUE_URL").filter(|v| !v.is_empty()),
            topic: lookup("COURIER_TOPIC").filter(|v| !v.is_empty()),
            region: lookup("COURIER_REGION").filter(|v| !v.is_empty()),
            secret: lookup("COURIER_SECRET").map(String::into_bytes).unwrap_or_default(),
            run_local: lookup("COURIER_RUN_LOCAL").is_some_and(|v| truthy(&v)),
        }
    }

    /// Should a deferred call actually go through the queue?
    pub fn queue_enabled(&self) -> bool {
        !self.run_local && self.queue_url.is_some()
    }

    /// Should status events actually be published?
    pub fn notify_enabled(&self) -> bool {
        !self.run_local && self.topic.is_some()
    }
}

fn truthy(v: &str) -> bool {
    matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes")
}
