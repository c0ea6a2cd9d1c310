//! Quarry Job Client
//!
//! Client-side handles for jobs executed on the Quarry service: submission,
//! identity binding, state polling with bounded wait, and termination.
//!
//! Job creation is dual-mode. With a remote [`Dispatcher`] the job is
//! enqueued on the service through a [`JobGateway`]; with a local dispatcher
//! the function runs synchronously in-process and is recorded in a
//! [`LocalJobRegistry`] under a synthetic identity, which is how job logic
//! is exercised outside an execution environment.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use std::time::Duration;
//! use quarry_client::{CallOptions, Dispatcher, HttpGateway, JobHandle, WaitOptions};
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let gateway = Arc::new(HttpGateway::new("http://localhost:8080"));
//!     let dispatcher = Dispatcher::remote(gateway);
//!
//!     let options = CallOptions::default();
//!     let job = JobHandle::new(
//!         dispatcher,
//!         "align_reads",
//!         json!({"sample": "s-41"}),
//!         &options,
//!     )
//!     .await?;
//!
//!     let wait = WaitOptions::default()
//!         .poll_interval(Duration::from_secs(2))
//!         .timeout(Duration::from_secs(600));
//!     job.wait_on_done(wait, &options).await?;
//!     Ok(())
//! }
//! ```

pub mod error;
mod gateway;
mod handle;
mod local;

// Re-export commonly used types
pub use error::{ClientError, Result};
pub use gateway::{HttpGateway, JobGateway};
pub use handle::{Dispatcher, JOB_ID_ENV, JobHandle, WaitOptions, current_job_id, new_job};
pub use local::{LocalExecutor, LocalJobRegistry};

pub use quarry_core::domain::job::{JobDescription, JobId, JobState};
pub use quarry_core::dto::job::{CallOptions, JobPriority};
