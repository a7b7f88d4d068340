//! In-memory collaborator mocks for evaluator tests.
//!
//! Each mock can be seeded with fixture state and optionally switched into
//! a failing mode that errors on every call, for exercising the grading
//! wrapper's fault isolation.

use anyhow::{bail, Result};
use chrono::Utc;
use serde_json::Value;
use std::collections::HashMap;

use super::{Chat, FileStore, Forge, Judge, Message, Tracker};

pub(crate) fn msg(username: &str, text: &str) -> Message {
    Message {
        username: username.to_string(),
        text: text.to_string(),
        ts: Utc::now(),
    }
}

#[derive(Default)]
pub(crate) struct MockChat {
    channels: HashMap<String, Vec<Message>>,
    dms: HashMap<String, Vec<Message>>,
    fail: bool,
}

impl MockChat {
    pub(crate) fn with_channel(mut self, channel: &str, messages: Vec<Message>) -> Self {
        self.channels.insert(channel.to_string(), messages);
        self
    }

    pub(crate) fn with_dm(mut self, username: &str, messages: Vec<Message>) -> Self {
        self.dms.insert(username.to_string(), messages);
        self
    }

    pub(crate) fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }
}

impl Chat for MockChat {
    fn channel_history(&self, channel: &str) -> Result<Vec<Message>> {
        if self.fail {
            bail!("chat server unreachable");
        }
        Ok(self.channels.get(channel).cloned().unwrap_or_default())
    }

    fn dm_history(&self, username: &str) -> Result<Vec<Message>> {
        if self.fail {
            bail!("chat server unreachable");
        }
        Ok(self.dms.get(username).cloned().unwrap_or_default())
    }
}

#[derive(Default)]
pub(crate) struct MockFileStore {
    files: HashMap<String, String>,
    fail: bool,
}

impl MockFileStore {
    pub(crate) fn with_file(mut self, path: &str, content: &str) -> Self {
        self.files
            .insert(path.trim_matches('/').to_string(), content.to_string());
        self
    }

    pub(crate) fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }
}

impl FileStore for MockFileStore {
    fn fetch(&self, path: &str) -> Result<Vec<u8>> {
        if self.fail {
            bail!("file server unreachable");
        }
        match self.files.get(path.trim_matches('/')) {
            Some(content) => Ok(content.clone().into_bytes()),
            None => bail!("no such file: {path}"),
        }
    }

    fn exists(&self, path: &str) -> Result<bool> {
        if self.fail {
            bail!("file server unreachable");
        }
        let path = path.trim_matches('/');
        Ok(self.files.contains_key(path)
            || self
                .files
                .keys()
                .any(|key| key.starts_with(&format!("{path}/"))))
    }

    fn list_dir(&self, path: &str) -> Result<Vec<String>> {
        if self.fail {
            bail!("file server unreachable");
        }
        let prefix = format!("{}/", path.trim_matches('/'));
        let mut entries: Vec<String> = self
            .files
            .keys()
            .filter_map(|key| key.strip_prefix(&prefix))
            .map(|rest| rest.split('/').next().unwrap_or(rest).to_string())
            .collect();
        entries.sort();
        entries.dedup();
        Ok(entries)
    }
}

#[derive(Default)]
pub(crate) struct MockTracker {
    projects: Vec<Value>,
    issues: HashMap<String, Vec<Value>>,
    cycles: HashMap<String, Vec<Value>>,
    fail: bool,
}

impl MockTracker {
    pub(crate) fn with_project(mut self, project: Value) -> Self {
        self.projects.push(project);
        self
    }

    pub(crate) fn with_issues(mut self, project_id: &str, issues: Vec<Value>) -> Self {
        self.issues.insert(project_id.to_string(), issues);
        self
    }

    pub(crate) fn with_cycles(mut self, project_id: &str, cycles: Vec<Value>) -> Self {
        self.cycles.insert(project_id.to_string(), cycles);
        self
    }

    pub(crate) fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }
}

impl Tracker for MockTracker {
    fn projects(&self) -> Result<Vec<Value>> {
        if self.fail {
            bail!("tracker unreachable");
        }
        Ok(self.projects.clone())
    }

    fn issues(&self, project_id: &str) -> Result<Vec<Value>> {
        if self.fail {
            bail!("tracker unreachable");
        }
        Ok(self.issues.get(project_id).cloned().unwrap_or_default())
    }

    fn cycles(&self, project_id: &str) -> Result<Vec<Value>> {
        if self.fail {
            bail!("tracker unreachable");
        }
        Ok(self.cycles.get(project_id).cloned().unwrap_or_default())
    }
}

#[derive(Default)]
pub(crate) struct MockForge {
    issues: HashMap<String, Vec<Value>>,
    milestones: HashMap<String, Vec<Value>>,
    wikis: HashMap<String, String>,
    pipelines: HashMap<String, Vec<Value>>,
    fail: bool,
}

impl MockForge {
    pub(crate) fn with_issues(mut self, project: &str, issues: Vec<Value>) -> Self {
        self.issues.insert(project.to_string(), issues);
        self
    }

    pub(crate) fn with_milestones(mut self, project: &str, milestones: Vec<Value>) -> Self {
        self.milestones.insert(project.to_string(), milestones);
        self
    }

    pub(crate) fn with_wiki_page(mut self, project: &str, slug: &str, content: &str) -> Self {
        self.wikis
            .insert(format!("{project}#{slug}"), content.to_string());
        self
    }

    pub(crate) fn with_pipelines(mut self, project: &str, pipelines: Vec<Value>) -> Self {
        self.pipelines.insert(project.to_string(), pipelines);
        self
    }

    pub(crate) fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }
}

impl Forge for MockForge {
    fn issues(&self, project: &str) -> Result<Vec<Value>> {
        if self.fail {
            bail!("forge unreachable");
        }
        Ok(self.issues.get(project).cloned().unwrap_or_default())
    }

    fn milestones(&self, project: &str) -> Result<Vec<Value>> {
        if self.fail {
            bail!("forge unreachable");
        }
        Ok(self.milestones.get(project).cloned().unwrap_or_default())
    }

    fn wiki_page(&self, project: &str, slug: &str) -> Result<String> {
        if self.fail {
            bail!("forge unreachable");
        }
        match self.wikis.get(&format!("{project}#{slug}")) {
            Some(content) => Ok(content.clone()),
            None => bail!("no such wiki page: {slug}"),
        }
    }

    fn pipelines(&self, project: &str, _git_ref: Option<&str>) -> Result<Vec<Value>> {
        if self.fail {
            bail!("forge unreachable");
        }
        Ok(self.pipelines.get(project).cloned().unwrap_or_default())
    }
}

/// Judge mock: answers yes when the content contains any seeded marker.
#[derive(Default)]
pub(crate) struct MockJudge {
    yes_markers: Vec<String>,
    fail: bool,
}

impl MockJudge {
    pub(crate) fn yes_when(mut self, marker: &str) -> Self {
        self.yes_markers.push(marker.to_string());
        self
    }

    pub(crate) fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }
}

impl Judge for MockJudge {
    fn verdict(&self, content: &str, _predicate: &str) -> Result<bool> {
        if self.fail {
            bail!("judge unreachable");
        }
        Ok(self.yes_markers.iter().any(|m| content.contains(m.as_str())))
    }
}
