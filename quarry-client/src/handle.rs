//! Job handle and dispatch logic
//!
//! A [`JobHandle`] binds a job identity and drives the client side of the
//! job lifecycle: creation, description, polling wait and termination. The
//! execution backend is an explicit [`Dispatcher`] chosen at construction,
//! either the remote service or an in-process executor for detached mode.

use std::env;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use tracing::{debug, trace};

use quarry_core::domain::job::{JobDescription, JobId, JobState};
use quarry_core::dto::job::{CallOptions, CreateJobRequest};

use crate::error::{ClientError, Result};
use crate::gateway::JobGateway;
use crate::local::{LocalExecutor, LocalJobRegistry};

/// Environment variable the execution environment injects into job
/// processes. Its presence marks the process as running under the service.
pub const JOB_ID_ENV: &str = "QUARRY_JOB_ID";

/// Identity of the job this process is running as, if any.
///
/// Absence means the process is detached: jobs created here run in-process
/// instead of being dispatched to the service.
pub fn current_job_id() -> Option<JobId> {
    env::var(JOB_ID_ENV).ok().map(JobId::new)
}

/// Execution backend for job handles.
#[derive(Clone)]
pub enum Dispatcher {
    /// Jobs are created and queried through the remote service.
    Remote(Arc<dyn JobGateway>),
    /// Jobs run synchronously in-process. Used when no execution
    /// environment is present (tests, debugging).
    Local {
        executor: Arc<dyn LocalExecutor>,
        registry: Arc<LocalJobRegistry>,
    },
}

impl Dispatcher {
    pub fn remote(gateway: Arc<dyn JobGateway>) -> Self {
        Self::Remote(gateway)
    }

    pub fn local(executor: Arc<dyn LocalExecutor>, registry: Arc<LocalJobRegistry>) -> Self {
        Self::Local { executor, registry }
    }

    /// Pick the backend from the process environment: remote when a job
    /// identity marker is injected, local otherwise.
    pub fn detect(
        gateway: Arc<dyn JobGateway>,
        executor: Arc<dyn LocalExecutor>,
        registry: Arc<LocalJobRegistry>,
    ) -> Self {
        Self::select(current_job_id(), gateway, executor, registry)
    }

    fn select(
        marker: Option<JobId>,
        gateway: Arc<dyn JobGateway>,
        executor: Arc<dyn LocalExecutor>,
        registry: Arc<LocalJobRegistry>,
    ) -> Self {
        match marker {
            Some(_) => Self::remote(gateway),
            None => Self::local(executor, registry),
        }
    }
}

impl fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Remote(_) => f.write_str("Dispatcher::Remote"),
            Self::Local { .. } => f.write_str("Dispatcher::Local"),
        }
    }
}

/// Polling parameters for [`JobHandle::wait_on_done`].
#[derive(Debug, Clone)]
pub struct WaitOptions {
    /// Delay between state queries.
    pub poll_interval: Duration,
    /// Give up after this much accumulated waiting; `None` waits
    /// indefinitely.
    pub timeout: Option<Duration>,
}

impl Default for WaitOptions {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(2),
            timeout: None,
        }
    }
}

impl WaitOptions {
    pub fn poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// Handle to a job, remote or locally executed.
///
/// A handle holds exactly one identity once bound. Dropping a handle does
/// not affect the job: a remote job keeps running on the service.
#[derive(Debug)]
pub struct JobHandle {
    dispatcher: Dispatcher,
    id: Option<JobId>,
    local_result: Option<Value>,
}

/// Create and dispatch a new job in one call.
///
/// Shorthand for [`JobHandle::new`].
pub async fn new_job(
    dispatcher: Dispatcher,
    function: &str,
    input: Value,
    options: &CallOptions,
) -> Result<JobHandle> {
    JobHandle::new(dispatcher, function, input, options).await
}

impl JobHandle {
    /// Create and dispatch a new job executing `function` with `input`.
    ///
    /// With a remote dispatcher the job is enqueued on the service and the
    /// handle is bound to the server-issued identity. With a local
    /// dispatcher the function runs synchronously in-process; the handle is
    /// bound to a synthetic identity and keeps the result. In local mode
    /// `options` are accepted but ignored.
    pub async fn new(
        dispatcher: Dispatcher,
        function: &str,
        input: Value,
        options: &CallOptions,
    ) -> Result<Self> {
        let mut handle = Self::unbound(dispatcher);
        handle.dispatch(function, input, options).await?;
        Ok(handle)
    }

    /// Handle not yet associated with any job.
    ///
    /// Remote operations on an unbound handle fail with
    /// [`ClientError::UnboundHandle`] until [`JobHandle::set_id`] is called.
    pub fn unbound(dispatcher: Dispatcher) -> Self {
        Self {
            dispatcher,
            id: None,
            local_result: None,
        }
    }

    /// Handle bound to an already existing job.
    pub fn from_id(dispatcher: Dispatcher, id: JobId) -> Self {
        Self {
            dispatcher,
            id: Some(id),
            local_result: None,
        }
    }

    async fn dispatch(&mut self, function: &str, input: Value, options: &CallOptions) -> Result<()> {
        let (id, local_result) = match &self.dispatcher {
            Dispatcher::Remote(gateway) => {
                let request = CreateJobRequest::new(function, input);
                let response = gateway.create_job(request, options).await?;
                debug!(id = %response.id, function, "created remote job");
                (response.id, None)
            }
            Dispatcher::Local { executor, registry } => {
                let result = executor.run(function, &input)?;
                let id = registry.register(result.clone());
                debug!(id = %id, function, "ran job in-process");
                (id, Some(result))
            }
        };

        self.id = Some(id);
        self.local_result = local_result;
        Ok(())
    }

    /// Identity of the associated job, if bound.
    pub fn id(&self) -> Option<&JobId> {
        self.id.as_ref()
    }

    /// Discard the current identity and associate the handle with `id`.
    ///
    /// No format validation is performed. A rebound handle is assumed to
    /// refer to a remote job from here on; any stored local result is
    /// dropped.
    pub fn set_id(&mut self, id: JobId) {
        self.id = Some(id);
        self.local_result = None;
    }

    /// Result of in-process execution, for handles created in local mode.
    pub fn local_result(&self) -> Option<&Value> {
        self.local_result.as_ref()
    }

    fn bound_id(&self) -> Result<&JobId> {
        self.id.as_ref().ok_or(ClientError::UnboundHandle)
    }

    /// Description of the job, including its current state.
    ///
    /// With `io` set, input and output payloads are included. The state is
    /// always fetched fresh from the service; nothing is cached on the
    /// handle. Local-mode handles resolve immediately to a synthesized
    /// `done` description carrying the stored result.
    pub async fn describe(&self, io: bool, options: &CallOptions) -> Result<JobDescription> {
        let id = self.bound_id()?;
        match &self.dispatcher {
            Dispatcher::Remote(gateway) => gateway.describe_job(id, io, options).await,
            Dispatcher::Local { registry, .. } => {
                let result = registry
                    .lookup(id)
                    .ok_or_else(|| ClientError::LocalJobNotFound(id.clone()))?;
                Ok(JobDescription {
                    id: id.clone(),
                    state: JobState::Done,
                    function: None,
                    created: None,
                    modified: None,
                    input: None,
                    output: io.then_some(result),
                    extra: Default::default(),
                })
            }
        }
    }

    /// Current state of the job.
    ///
    /// Shorthand for a describe without I/O payloads.
    pub async fn state(&self, options: &CallOptions) -> Result<JobState> {
        Ok(self.describe(false, options).await?.state)
    }

    /// Poll until the job reaches `done`.
    ///
    /// Fails with [`ClientError::JobFailed`] or [`ClientError::JobTerminated`]
    /// on the other terminal states, and with [`ClientError::WaitTimeout`]
    /// once the wait budget is exhausted. Terminal states are checked before
    /// the timeout, so a job that finishes exactly at the boundary is still
    /// reported by its final state. Every non-terminal state keeps polling.
    pub async fn wait_on_done(&self, wait: WaitOptions, options: &CallOptions) -> Result<()> {
        let mut elapsed = Duration::ZERO;
        loop {
            let state = self.state(options).await?;
            trace!(id = %self.bound_id()?, %state, ?elapsed, "polled job state");

            match state {
                JobState::Done => return Ok(()),
                JobState::Failed => return Err(ClientError::JobFailed(self.bound_id()?.clone())),
                JobState::Terminated => {
                    return Err(ClientError::JobTerminated(self.bound_id()?.clone()));
                }
                _ => {}
            }

            if let Some(timeout) = wait.timeout {
                if elapsed >= timeout {
                    return Err(ClientError::WaitTimeout(self.bound_id()?.clone()));
                }
            }

            tokio::time::sleep(wait.poll_interval).await;
            elapsed = elapsed.saturating_add(wait.poll_interval);
        }
    }

    /// Ask the service to terminate the job.
    ///
    /// Fire-and-forget: returns as soon as the request is accepted, without
    /// waiting for the job to reach `terminated`. Not meaningful for
    /// local-mode handles, where it is a no-op.
    pub async fn terminate(&self, options: &CallOptions) -> Result<()> {
        let id = self.bound_id()?;
        match &self.dispatcher {
            Dispatcher::Remote(gateway) => {
                debug!(id = %id, "terminating job");
                gateway.terminate_job(id, options).await
            }
            Dispatcher::Local { .. } => {
                debug!(id = %id, "terminate is a no-op for local jobs");
                Ok(())
            }
        }
    }
}
