//! Job domain types

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Identity of a job.
///
/// Opaque to the client: server-issued for jobs dispatched remotely,
/// synthesized as `job-<N>` for jobs executed through the local registry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(String);

impl JobId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for JobId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for JobId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// Job execution state as reported by the service
///
/// Only `done`, `failed` and `terminated` are terminal; every other state
/// means the job may still make progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobState {
    Idle,
    WaitingOnInput,
    Runnable,
    Running,
    Done,
    Failed,
    Terminated,
}

impl JobState {
    /// Whether no further state transitions can occur.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Done | Self::Failed | Self::Terminated)
    }
}

impl fmt::Display for JobState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Idle => "idle",
            Self::WaitingOnInput => "waiting_on_input",
            Self::Runnable => "runnable",
            Self::Running => "running",
            Self::Done => "done",
            Self::Failed => "failed",
            Self::Terminated => "terminated",
        };
        f.write_str(s)
    }
}

/// Description of a job as returned by the describe endpoint
///
/// `input` and `output` are present only when the describe call requested
/// I/O payloads. Fields this client does not model are preserved in `extra`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobDescription {
    pub id: JobId,
    pub state: JobState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub function: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<chrono::DateTime<chrono::Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified: Option<chrono::DateTime<chrono::Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<serde_json::Value>,
    #[serde(flatten, default, skip_serializing_if = "HashMap::is_empty")]
    pub extra: HashMap<String, serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_wire_names() {
        let state: JobState = serde_json::from_str("\"waiting_on_input\"").unwrap();
        assert_eq!(state, JobState::WaitingOnInput);
        assert_eq!(serde_json::to_string(&JobState::Done).unwrap(), "\"done\"");
    }

    #[test]
    fn test_terminal_states() {
        assert!(JobState::Done.is_terminal());
        assert!(JobState::Failed.is_terminal());
        assert!(JobState::Terminated.is_terminal());
        assert!(!JobState::Running.is_terminal());
        assert!(!JobState::Idle.is_terminal());
        assert!(!JobState::WaitingOnInput.is_terminal());
    }

    #[test]
    fn test_description_keeps_unmodeled_fields() {
        let desc: JobDescription = serde_json::from_value(serde_json::json!({
            "id": "job-XYZ",
            "state": "running",
            "billedTo": "org-demo",
        }))
        .unwrap();
        assert_eq!(desc.id, JobId::new("job-XYZ"));
        assert_eq!(desc.extra["billedTo"], "org-demo");
        assert!(desc.output.is_none());
    }
}
