use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Value, json};

use courier_core::{
    Config, CourierError, Dispatcher, Kwargs, Pipeline, Receiver, Sender, Signer, StatusReporter,
    Worker, WorkerKey, WorkerRegistry,
};
use courier_core::impls::{InMemoryNotifier, InMemoryQueue};

#[derive(Debug, Deserialize)]
struct GreetKwargs {
    name: String,
}

struct GreetWorker;

#[async_trait]
impl Worker for GreetWorker {
    async fn call(&self, args: &[Value], kwargs: &Kwargs) -> Result<(), CourierError> {
        let parsed: GreetKwargs = serde_json::from_value(Value::Object(kwargs.clone()))
            .map_err(|e| CourierError::Worker(format!("kwargs decode: {e}")))?;
        println!("Hello, {}! (args: {:?})", parsed.name, args);
        Ok(())
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    // (A) 設定と in-memory ポートを用意（本番は SQS/SNS 相当を差す）
    let config = Config {
        is_receiver: true,
        queue_url: Some("inmem://demo".to_string()),
        topic: Some("inmem://audit".to_string()),
        secret: b"demo-secret".to_vec(),
        ..Config::default()
    };
    let queue = Arc::new(InMemoryQueue::new());
    let notifier = Arc::new(InMemoryNotifier::new());

    // (B) worker を登録（key は送る側と受ける側の唯一の約束事）
    let mut registry = WorkerRegistry::new();
    registry
        .register(WorkerKey::new("demo.greet"), Arc::new(GreetWorker))
        .expect("fresh registry");
    let registry = Arc::new(registry);

    let sender = Sender::new(
        config.clone(),
        Pipeline::Signed(Signer::new(config.secret.clone())),
        Some(queue.clone()),
        StatusReporter::new(config.clone(), Some(notifier.clone())),
        Dispatcher::new(registry.clone()),
    );
    let receiver = Receiver::new(
        config.clone(),
        Pipeline::Signed(Signer::new(config.secret.clone())),
        StatusReporter::new(config.clone(), Some(notifier.clone())),
        Dispatcher::new(registry.clone()),
    );

    // (C) タスク投入（signed pipeline 経由）
    let mut kwargs = Kwargs::new();
    kwargs.insert("name".to_string(), json!("courier"));
    let deferred = sender
        .defer(WorkerKey::new("demo.greet"), vec![json!(1), json!(2)], kwargs)
        .await
        .expect("submit");
    println!("deferred: {deferred:?}");

    // (D) 受信側がキューを処理する（本番では外部トリガーが raw body を渡す）
    while let Some(message) = queue.pop().await {
        receiver.receive(&message.body).await.expect("receive");
    }

    // (E) audit trail
    println!("--- audit trail ---");
    for event in notifier.published().await {
        println!("{}: {}", event.subject, event.body);
    }
}
