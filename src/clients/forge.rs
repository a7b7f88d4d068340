//! GitLab-style source-forge client (private-token auth).

use anyhow::{Context, Result};
use reqwest::blocking::Client;
use serde_json::Value;

use super::http::{build_client, join_url, validate_status};
use super::{ClientError, Forge};
use crate::config::ForgeConfig;

pub struct HttpForge {
    client: Client,
    config: ForgeConfig,
}

impl HttpForge {
    pub fn new(config: ForgeConfig) -> Result<Self> {
        Ok(Self {
            client: build_client()?,
            config,
        })
    }

    fn get(&self, endpoint: &str, query: &[(&str, &str)]) -> Result<Value> {
        let url = join_url(&self.config.url, &format!("api/v4/{endpoint}"));
        let response = self
            .client
            .get(&url)
            .header("PRIVATE-TOKEN", &self.config.token)
            .query(query)
            .send()
            .with_context(|| format!("Failed to reach forge: {endpoint}"))?;
        validate_status(&response, endpoint)?;
        response
            .json()
            .map_err(|e| ClientError::Shape(format!("forge response for {endpoint}: {e}")).into())
    }

    fn get_list(&self, endpoint: &str, query: &[(&str, &str)]) -> Result<Vec<Value>> {
        match self.get(endpoint, query)? {
            Value::Array(items) => Ok(items),
            _ => Err(ClientError::Shape(format!("expected a list from {endpoint}")).into()),
        }
    }
}

/// Project path as a URL path component (`group/repo` -> `group%2Frepo`).
fn encode_project(project: &str) -> String {
    project.replace('/', "%2F")
}

impl Forge for HttpForge {
    fn issues(&self, project: &str) -> Result<Vec<Value>> {
        self.get_list(
            &format!("projects/{}/issues", encode_project(project)),
            &[("per_page", "100")],
        )
    }

    fn milestones(&self, project: &str) -> Result<Vec<Value>> {
        self.get_list(
            &format!("projects/{}/milestones", encode_project(project)),
            &[("per_page", "100")],
        )
    }

    fn wiki_page(&self, project: &str, slug: &str) -> Result<String> {
        let page = self.get(
            &format!("projects/{}/wikis/{slug}", encode_project(project)),
            &[],
        )?;
        page.get("content")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| ClientError::Shape(format!("wiki page {slug} has no content")).into())
    }

    fn pipelines(&self, project: &str, git_ref: Option<&str>) -> Result<Vec<Value>> {
        let endpoint = format!("projects/{}/pipelines", encode_project(project));
        match git_ref {
            Some(git_ref) => self.get_list(&endpoint, &[("ref", git_ref), ("per_page", "50")]),
            None => self.get_list(&endpoint, &[("per_page", "50")]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_path_encoding() {
        assert_eq!(encode_project("office/intranet"), "office%2Fintranet");
        assert_eq!(encode_project("solo"), "solo");
    }
}
