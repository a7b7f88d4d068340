//! Plane-style project tracker client (API-key auth).
//!
//! Responses are surfaced as raw `serde_json::Value` documents: checkpoint
//! probes assert on a handful of fields and the tracker's schema is not
//! worth modeling here.

use anyhow::{Context, Result};
use reqwest::blocking::Client;
use serde_json::Value;

use super::http::{build_client, join_url, validate_status};
use super::{ClientError, Tracker};
use crate::config::TrackerConfig;

pub struct HttpTracker {
    client: Client,
    config: TrackerConfig,
}

impl HttpTracker {
    pub fn new(config: TrackerConfig) -> Result<Self> {
        Ok(Self {
            client: build_client()?,
            config,
        })
    }

    fn get(&self, endpoint: &str) -> Result<Value> {
        let url = join_url(
            &self.config.url,
            &format!("api/v1/workspaces/{}/{endpoint}", self.config.workspace),
        );
        let response = self
            .client
            .get(&url)
            .header("x-api-key", &self.config.api_key)
            .send()
            .with_context(|| format!("Failed to reach tracker: {endpoint}"))?;
        validate_status(&response, endpoint)?;
        response
            .json()
            .map_err(|e| ClientError::Shape(format!("tracker response for {endpoint}: {e}")).into())
    }

    fn get_list(&self, endpoint: &str) -> Result<Vec<Value>> {
        unwrap_list(self.get(endpoint)?, endpoint)
    }
}

/// The tracker returns either a bare array or a paginated
/// `{"results": [...]}` envelope depending on the endpoint.
fn unwrap_list(value: Value, endpoint: &str) -> Result<Vec<Value>> {
    match value {
        Value::Array(items) => Ok(items),
        Value::Object(mut map) => match map.remove("results") {
            Some(Value::Array(items)) => Ok(items),
            _ => Err(ClientError::Shape(format!("expected a list from {endpoint}")).into()),
        },
        _ => Err(ClientError::Shape(format!("expected a list from {endpoint}")).into()),
    }
}

impl Tracker for HttpTracker {
    fn projects(&self) -> Result<Vec<Value>> {
        self.get_list("projects/")
    }

    fn issues(&self, project_id: &str) -> Result<Vec<Value>> {
        self.get_list(&format!("projects/{project_id}/issues/"))
    }

    fn cycles(&self, project_id: &str) -> Result<Vec<Value>> {
        self.get_list(&format!("projects/{project_id}/cycles/"))
    }
}
