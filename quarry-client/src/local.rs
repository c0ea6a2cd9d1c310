//! Local (detached-mode) execution
//!
//! When a process runs outside an execution environment there is no remote
//! service to dispatch to. Jobs are instead run synchronously in-process
//! through a [`LocalExecutor`] and recorded in a [`LocalJobRegistry`], which
//! hands out synthetic identities and keeps the results addressable.

use std::sync::Mutex;

use serde_json::Value;

use quarry_core::domain::job::JobId;

/// Runs a named function in-process, standing in for the remote service.
///
/// Implementations are consumer-defined; the result type is whatever JSON
/// value the function produces. Failures surface directly from job creation,
/// so there is no local `failed` state to discover later.
pub trait LocalExecutor: Send + Sync {
    fn run(&self, function: &str, input: &Value) -> anyhow::Result<Value>;
}

/// Registry of jobs executed in-process.
///
/// Identities are synthesized as `job-<N>` where N counts entries so far.
/// Identity assignment and insertion happen under one lock, so concurrent
/// registrations cannot observe the same size and collide. Entries are never
/// removed, so identities are never reused.
#[derive(Debug, Default)]
pub struct LocalJobRegistry {
    entries: Mutex<Vec<(JobId, Value)>>,
}

impl LocalJobRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `result` under a freshly synthesized identity and return it.
    pub fn register(&self, result: Value) -> JobId {
        let mut entries = self.entries.lock().unwrap();
        let id = JobId::new(format!("job-{}", entries.len() + 1));
        entries.push((id.clone(), result));
        id
    }

    /// The result stored for `id`, if this registry ran it.
    pub fn lookup(&self, id: &JobId) -> Option<Value> {
        let entries = self.entries.lock().unwrap();
        entries
            .iter()
            .find(|(entry_id, _)| entry_id == id)
            .map(|(_, result)| result.clone())
    }

    /// Number of jobs registered so far.
    pub fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
