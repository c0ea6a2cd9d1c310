//! Remote job service gateway
//!
//! The [`JobGateway`] trait captures the three remote operations a job
//! handle performs: create, describe and terminate. [`HttpGateway`] is the
//! production implementation speaking JSON over HTTP.

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;

use quarry_core::domain::job::{JobDescription, JobId};
use quarry_core::dto::job::{
    CallOptions, CreateJobRequest, CreateJobResponse, DescribeJobRequest, TerminateJobRequest,
};

use crate::error::{ClientError, Result};

/// Remote operations a job handle needs from the service.
///
/// Errors from an implementation are propagated to the caller unchanged;
/// the handle never retries a gateway call.
#[async_trait]
pub trait JobGateway: Send + Sync {
    /// Create and enqueue a new job.
    async fn create_job(
        &self,
        req: CreateJobRequest,
        options: &CallOptions,
    ) -> Result<CreateJobResponse>;

    /// Describe a job; `io` controls whether input/output payloads are
    /// included in the description.
    async fn describe_job(
        &self,
        id: &JobId,
        io: bool,
        options: &CallOptions,
    ) -> Result<JobDescription>;

    /// Ask the service to terminate a job. Returns once the request is
    /// accepted, not once termination takes effect.
    async fn terminate_job(&self, id: &JobId, options: &CallOptions) -> Result<()>;
}

/// HTTP client for the Quarry job service API
#[derive(Debug, Clone)]
pub struct HttpGateway {
    /// Base URL of the job service (e.g., "http://localhost:8080")
    base_url: String,
    /// HTTP client instance
    client: Client,
}

impl HttpGateway {
    /// Create a new gateway
    ///
    /// # Arguments
    /// * `base_url` - The base URL of the job service API
    ///
    /// # Example
    /// ```
    /// use quarry_client::HttpGateway;
    ///
    /// let gateway = HttpGateway::new("http://localhost:8080");
    /// ```
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: Client::new(),
        }
    }

    /// Create a new gateway with a custom HTTP client
    ///
    /// This allows you to configure timeouts, proxies, TLS settings, etc.
    ///
    /// # Example
    /// ```
    /// use quarry_client::HttpGateway;
    /// use reqwest::Client;
    /// use std::time::Duration;
    ///
    /// let http_client = Client::builder()
    ///     .timeout(Duration::from_secs(30))
    ///     .build()
    ///     .unwrap();
    ///
    /// let gateway = HttpGateway::with_client("http://localhost:8080", http_client);
    /// ```
    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    /// Get the base URL of the job service
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Apply per-call extra headers to a request
    fn apply_options(
        &self,
        mut request: reqwest::RequestBuilder,
        options: &CallOptions,
    ) -> reqwest::RequestBuilder {
        for (name, value) in &options.extra_headers {
            request = request.header(name, value);
        }
        request
    }

    /// Handle an API response and deserialize JSON
    ///
    /// Checks the status code and returns an appropriate error if the
    /// request failed, or deserializes the response body if successful.
    async fn handle_response<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ClientError::api_error(status.as_u16(), error_text));
        }

        response
            .json()
            .await
            .map_err(|e| ClientError::ParseError(format!("Failed to parse JSON response: {}", e)))
    }

    /// Handle an API response that returns no content
    async fn handle_empty_response(&self, response: reqwest::Response) -> Result<()> {
        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ClientError::api_error(status.as_u16(), error_text));
        }

        Ok(())
    }
}

#[async_trait]
impl JobGateway for HttpGateway {
    async fn create_job(
        &self,
        mut req: CreateJobRequest,
        options: &CallOptions,
    ) -> Result<CreateJobResponse> {
        req.priority = options.priority;
        req.project = options.project.clone();

        let url = format!("{}/api/jobs", self.base_url);
        let request = self.apply_options(self.client.post(&url).json(&req), options);
        let response = request.send().await?;

        self.handle_response(response).await
    }

    async fn describe_job(
        &self,
        id: &JobId,
        io: bool,
        options: &CallOptions,
    ) -> Result<JobDescription> {
        let url = format!("{}/api/jobs/{}/describe", self.base_url, id);
        let body = DescribeJobRequest {
            io,
            project: options.project.clone(),
        };
        let request = self.apply_options(self.client.post(&url).json(&body), options);
        let response = request.send().await?;

        self.handle_response(response).await
    }

    async fn terminate_job(&self, id: &JobId, options: &CallOptions) -> Result<()> {
        let url = format!("{}/api/jobs/{}/terminate", self.base_url, id);
        let body = TerminateJobRequest {
            project: options.project.clone(),
        };
        let request = self.apply_options(self.client.post(&url).json(&body), options);
        let response = request.send().await?;

        self.handle_empty_response(response).await
    }
}
