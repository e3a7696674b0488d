//! Receiver dispatch path.
//!
//! Entry point for raw transport input pushed at the receiver process.
//! State machine per message: `Received` -> dispatch -> `Complete`, with
//! `Signature Mismatch` (signed pipeline) and `Failed` (worker error) as
//! terminal states. The role guard comes first: a non-receiver process
//! rejects the call before any decode, dispatch, or notify side effect.

use crate::codec::{CodecError, Pipeline};
use crate::config::Config;
use crate::dispatch::Dispatcher;
use crate::domain::{CourierError, Status};
use crate::report::StatusReporter;

/// Receiver-side entry point.
pub struct Receiver {
    config: Config,
    pipeline: Pipeline,
    reporter: StatusReporter,
    dispatcher: Dispatcher,
}

impl Receiver {
    pub fn new(
        config: Config,
        pipeline: Pipeline,
        reporter: StatusReporter,
        dispatcher: Dispatcher,
    ) -> Self {
        Self {
            config,
            pipeline,
            reporter,
            dispatcher,
        }
    }

    /// Handle one raw queue message.
    ///
    /// Worker errors propagate to the caller after a `Failed` report; retry
    /// and dead-letter policy stay with the queue around this core.
    pub async fn receive(&self, raw: &str) -> Result<(), CourierError> {
        if !self.config.is_receiver {
            return Err(CourierError::NotReceiver);
        }

        let mut invocation = match self.pipeline.decode(raw) {
            Ok(invocation) => invocation,
            Err(CodecError::SignatureMismatch { invocation }) => {
                // observable even though the message is never dispatched
                let mut invocation = *invocation;
                self.reporter
                    .report(&mut invocation, Status::SignatureMismatch)
                    .await;
                return Err(CourierError::SignatureMismatch {
                    msg_id: invocation.msg_id,
                });
            }
            Err(err) => return Err(CourierError::Decode(err.to_string())),
        };

        self.reporter.report(&mut invocation, Status::Received).await;

        match self.dispatcher.dispatch(&invocation).await {
            Ok(()) => {
                self.reporter.report(&mut invocation, Status::Complete).await;
                Ok(())
            }
            Err(err) => {
                self.reporter.report(&mut invocation, Status::Failed).await;
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::envelope::{self, Signer};
    use crate::dispatch::{Worker, WorkerRegistry};
    use crate::domain::{Kwargs, TaskInvocation, WorkerKey};
    use crate::impls::InMemoryNotifier;
    use async_trait::async_trait;
    use serde_json::{Value, json};
    use std::sync::Arc;
    use tokio::sync::Mutex;

    struct RecordingWorker {
        calls: Mutex<Vec<(Vec<Value>, Kwargs)>>,
    }

    impl RecordingWorker {
        fn new() -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl Worker for RecordingWorker {
        async fn call(&self, args: &[Value], kwargs: &Kwargs) -> Result<(), CourierError> {
            self.calls.lock().await.push((args.to_vec(), kwargs.clone()));
            Ok(())
        }
    }

    fn receiver_config() -> Config {
        Config {
            is_receiver: true,
            topic: Some("arn:notify:topic".to_string()),
            ..Config::default()
        }
    }

    fn sample_kwargs() -> Kwargs {
        let mut kwargs = Kwargs::new();
        kwargs.insert("x".to_string(), json!(3));
        kwargs
    }

    fn receiver_with(
        config: Config,
        pipeline: Pipeline,
        worker: Arc<dyn Worker>,
        notifier: Arc<InMemoryNotifier>,
    ) -> Receiver {
        let mut registry = WorkerRegistry::new();
        registry
            .register(WorkerKey::new("billing.charge"), worker)
            .unwrap();
        Receiver::new(
            config.clone(),
            pipeline,
            StatusReporter::new(config, Some(notifier)),
            Dispatcher::new(Arc::new(registry)),
        )
    }

    #[tokio::test]
    async fn signed_body_dispatches_and_reports_received_then_complete() {
        let signer = Signer::new(b"secret".to_vec());
        let invocation = TaskInvocation::new(
            WorkerKey::new("billing.charge"),
            vec![json!(1), json!(2)],
            sample_kwargs(),
        );
        let body = envelope::build(&invocation, &signer).unwrap();

        let worker = Arc::new(RecordingWorker::new());
        let notifier = Arc::new(InMemoryNotifier::new());
        let receiver = receiver_with(
            receiver_config(),
            Pipeline::Signed(signer),
            worker.clone(),
            notifier.clone(),
        );

        receiver.receive(&body).await.unwrap();

        let calls = worker.calls.lock().await;
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, vec![json!(1), json!(2)]);
        assert_eq!(calls[0].1, sample_kwargs());

        assert_eq!(notifier.subjects().await, vec!["Received", "Complete"]);
    }

    #[tokio::test]
    async fn tampered_body_reports_mismatch_and_never_dispatches() {
        let signer = Signer::new(b"secret".to_vec());
        let invocation = TaskInvocation::new(
            WorkerKey::new("billing.charge"),
            vec![json!(1)],
            Kwargs::new(),
        );
        // signed by someone with a different secret
        let body = envelope::build(&invocation, &Signer::new(b"other".to_vec())).unwrap();

        let worker = Arc::new(RecordingWorker::new());
        let notifier = Arc::new(InMemoryNotifier::new());
        let receiver = receiver_with(
            receiver_config(),
            Pipeline::Signed(signer),
            worker.clone(),
            notifier.clone(),
        );

        let err = receiver.receive(&body).await.unwrap_err();
        assert!(matches!(err, CourierError::SignatureMismatch { .. }));

        assert!(worker.calls.lock().await.is_empty());
        assert_eq!(notifier.subjects().await, vec!["Signature Mismatch"]);
        let events = notifier.published().await;
        let body: serde_json::Value = serde_json::from_str(&events[0].body).unwrap();
        assert_eq!(body["status"], "Signature Mismatch");
    }

    #[tokio::test]
    async fn role_guard_rejects_before_any_side_effect() {
        let signer = Signer::new(b"secret".to_vec());
        let invocation =
            TaskInvocation::new(WorkerKey::new("billing.charge"), vec![], Kwargs::new());
        let body = envelope::build(&invocation, &signer).unwrap();

        let worker = Arc::new(RecordingWorker::new());
        let notifier = Arc::new(InMemoryNotifier::new());
        let config = Config {
            is_receiver: false,
            ..receiver_config()
        };
        let receiver = receiver_with(config, Pipeline::Signed(signer), worker.clone(), notifier.clone());

        let err = receiver.receive(&body).await.unwrap_err();
        assert!(matches!(err, CourierError::NotReceiver));

        assert!(worker.calls.lock().await.is_empty());
        assert!(notifier.published().await.is_empty());
    }

    #[tokio::test]
    async fn worker_failure_reports_failed_and_propagates() {
        struct FailingWorker;

        #[async_trait]
        impl Worker for FailingWorker {
            async fn call(&self, _args: &[Value], _kwargs: &Kwargs) -> Result<(), CourierError> {
                Err(CourierError::Worker("card declined".to_string()))
            }
        }

        let invocation =
            TaskInvocation::new(WorkerKey::new("billing.charge"), vec![], Kwargs::new());
        let body = crate::codec::message::encode(&invocation).unwrap();

        let notifier = Arc::new(InMemoryNotifier::new());
        let receiver = receiver_with(
            receiver_config(),
            Pipeline::Plain,
            Arc::new(FailingWorker),
            notifier.clone(),
        );

        let err = receiver.receive(&body).await.unwrap_err();
        assert!(matches!(err, CourierError::Worker(_)));

        // audit trail ends in Failed, not silence
        assert_eq!(notifier.subjects().await, vec!["Received", "Failed"]);
    }

    #[tokio::test]
    async fn unresolvable_worker_reports_failed_and_errors() {
        let invocation = TaskInvocation::new(WorkerKey::new("no.such"), vec![], Kwargs::new());
        let body = crate::codec::message::encode(&invocation).unwrap();

        let notifier = Arc::new(InMemoryNotifier::new());
        let receiver = receiver_with(
            receiver_config(),
            Pipeline::Plain,
            Arc::new(RecordingWorker::new()),
            notifier.clone(),
        );

        let err = receiver.receive(&body).await.unwrap_err();
        assert!(matches!(err, CourierError::WorkerNotFound(_)));
        assert_eq!(notifier.subjects().await, vec!["Received", "Failed"]);
    }

    #[tokio::test]
    async fn malformed_body_is_fatal_with_no_report() {
        let notifier = Arc::new(InMemoryNotifier::new());
        let receiver = receiver_with(
            receiver_config(),
            Pipeline::Plain,
            Arc::new(RecordingWorker::new()),
            notifier.clone(),
        );

        let err = receiver.receive("{broken").await.unwrap_err();
        assert!(matches!(err, CourierError::Decode(_)));
        assert!(notifier.published().await.is_empty());
    }
}
