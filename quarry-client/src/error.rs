//! Error types for the Quarry client

use quarry_core::domain::job::JobId;
use thiserror::Error;

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur when using the Quarry client
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// API returned an error status code
    #[error("API error (status {status}): {message}")]
    ApiError {
        /// HTTP status code
        status: u16,
        /// Error message from the API
        message: String,
    },

    /// Failed to parse response
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Operation requiring a bound job identity was invoked on an unbound handle
    #[error("Operation requires a handle bound to a job identity")]
    UnboundHandle,

    /// The job reached the `failed` state
    #[error("Job {0} has failed")]
    JobFailed(JobId),

    /// The job reached the `terminated` state
    #[error("Job {0} was terminated")]
    JobTerminated(JobId),

    /// Polling budget exhausted before the job finished
    #[error("Reached timeout while waiting for job {0} to finish")]
    WaitTimeout(JobId),

    /// In-process execution of a local job failed
    #[error("Local execution failed: {0:#}")]
    LocalExecution(anyhow::Error),

    /// A local-mode identity is not present in the registry
    #[error("Job {0} is not registered as a local job")]
    LocalJobNotFound(JobId),
}

impl ClientError {
    /// Create an API error from status code and message
    pub fn api_error(status: u16, message: impl Into<String>) -> Self {
        Self::ApiError {
            status,
            message: message.into(),
        }
    }

    /// Check if this error is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::ApiError { status: 404, .. })
    }

    /// Check if this error is a client error (4xx status)
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::ApiError { status, .. } if *status >= 400 && *status < 500)
    }

    /// Check if this error is a server error (5xx status)
    pub fn is_server_error(&self) -> bool {
        matches!(self, Self::ApiError { status, .. } if *status >= 500)
    }
}

impl From<anyhow::Error> for ClientError {
    fn from(err: anyhow::Error) -> Self {
        Self::LocalExecution(err)
    }
}
