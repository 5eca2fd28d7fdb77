//! Job execution engine.
//!
//! [`executor::JobExecutor`] runs the analysis pipeline for each job on a
//! bounded worker pool and reports outcomes back to the store.
//! [`service::JobService`] is the single entry point callers use: it
//! composes the store and the executor and defines the externally visible
//! submit / status / result / cancel semantics.

pub mod executor;
pub mod service;

pub use executor::{ExecutorConfig, JobExecutor};
pub use service::{JobService, JobStatusView};
