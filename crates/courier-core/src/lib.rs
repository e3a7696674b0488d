//! courier-core
//!
//! Deferred-task envelope protocol: enqueue a unit of work on one side,
//! authenticate, dispatch, and report on it on the other.
//!
//! # モジュール構成
//! - **domain**: ドメインモデル（ids, invocation, status, errors）
//! - **config**: explicit process settings (no global singleton)
//! - **codec**: wire formats (plain JSON and the signed envelope)
//! - **ports**: 抽象化レイヤー（Queue, Notifier）
//! - **impls**: in-memory port implementations（開発・テスト用）
//! - **dispatch**: worker registry + dispatcher
//! - **report**: best-effort status reporter
//! - **sender**: direct call / deferred publish path
//! - **receiver**: role guard + decode/verify + dispatch path
//! - **cron**: scheduled invocation guard
//!
//! Two pipelines share everything but the wire format: `Pipeline::Plain`
//! moves unauthenticated JSON, `Pipeline::Signed` wraps the same payload in
//! an HMAC envelope and refuses to dispatch anything that fails
//! verification. Parallelism, retries, and delivery guarantees live in the
//! queue around this crate, never inside it.

pub mod codec;
pub mod config;
pub mod cron;
pub mod dispatch;
pub mod domain;
pub mod impls;
pub mod ports;
pub mod receiver;
pub mod report;
pub mod sender;

pub use self::codec::{CodecError, Pipeline, envelope::Signer};
pub use self::config::Config;
pub use self::cron::{CronGuard, CronJob, CronOptions, OnUnauthorized};
pub use self::dispatch::{Dispatcher, Worker, WorkerRegistry};
pub use self::domain::{
    CorrelationId, CourierError, Kwargs, MessageId, Status, TaskInvocation, WorkerKey,
};
pub use self::ports::{Notifier, NotifyError, Queue, QueueError};
pub use self::receiver::Receiver;
pub use self::report::{CronEvent, StatusReporter};
pub use self::sender::{Deferred, Sender};
