//! Shared HTTP plumbing for the collaborator clients.

use anyhow::{Context, Result};
use reqwest::blocking::{Client, Response};
use std::time::Duration;

use super::ClientError;

/// Maximum time to establish a TCP connection.
pub(crate) const HTTP_CONNECT_TIMEOUT_SECS: u64 = 10;
/// Maximum time for an entire request (connection + transfer). Prevents one
/// slow collaborator from hanging a whole evaluation.
pub(crate) const HTTP_REQUEST_TIMEOUT_SECS: u64 = 60;

/// Create a blocking HTTP client with timeout configuration.
pub(crate) fn build_client() -> Result<Client> {
    Client::builder()
        .connect_timeout(Duration::from_secs(HTTP_CONNECT_TIMEOUT_SECS))
        .timeout(Duration::from_secs(HTTP_REQUEST_TIMEOUT_SECS))
        .user_agent("rubric-harness")
        .build()
        .context("Failed to create HTTP client")
}

/// Map a non-success status to a descriptive error.
pub(crate) fn validate_status(response: &Response, context: &str) -> Result<()> {
    if !response.status().is_success() {
        return Err(ClientError::Status {
            context: context.to_string(),
            status: response.status().as_u16(),
        }
        .into());
    }
    Ok(())
}

/// Join a base URL and a path without doubling slashes.
pub(crate) fn join_url(base: &str, path: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'))
}
