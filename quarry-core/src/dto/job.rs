//! Job DTOs for communication with the job service

use serde::{Deserialize, Serialize};

use crate::domain::job::JobId;

/// Request to create and enqueue a new job
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateJobRequest {
    /// Name of the function the job will execute.
    pub function: String,
    /// Input passed to the function.
    pub input: serde_json::Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<JobPriority>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,
}

impl CreateJobRequest {
    pub fn new(function: impl Into<String>, input: serde_json::Value) -> Self {
        Self {
            function: function.into(),
            input,
            priority: None,
            project: None,
        }
    }
}

/// Response from job creation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateJobResponse {
    pub id: JobId,
}

/// Qualifier sent with a describe call
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DescribeJobRequest {
    /// Include input and output payloads in the description.
    pub io: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,
}

/// Body sent with a terminate call
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TerminateJobRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,
}

/// Scheduling priority accepted at job creation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobPriority {
    Low,
    Normal,
    High,
}

/// Options forwarded with remote API calls.
///
/// Each field is meaningful to a specific subset of operations:
/// - `priority` is honored only when creating a job
/// - `project` scopes create, describe and terminate
/// - `extra_headers` are applied at the HTTP transport on every call
///
/// Local-mode dispatch accepts these options but ignores them; there is no
/// remote service to forward them to.
#[derive(Debug, Clone, Default)]
pub struct CallOptions {
    pub priority: Option<JobPriority>,
    pub project: Option<String>,
    pub extra_headers: Vec<(String, String)>,
}
