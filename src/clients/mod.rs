//! Thin collaborator-service clients.
//!
//! Each external service consumed by checkpoints — chat, file-sync, project
//! tracker, source forge, LLM judge — is wrapped in a small trait with one
//! blocking HTTP implementation. Evaluators only see the traits, so tests
//! substitute in-memory mocks and never touch the network.
//!
//! These wrappers are read-only request/response glue. No retry policy
//! lives here; timeouts are set on the underlying HTTP client and any
//! failure surfaces as an error for the grading wrapper to absorb.

mod chat;
mod files;
mod forge;
mod http;
mod judge;
mod tracker;

#[cfg(test)]
pub(crate) mod mock;

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde_json::Value;
use thiserror::Error;

pub use chat::HttpChat;
pub use files::HttpFileStore;
pub use forge::HttpForge;
pub use judge::HttpJudge;
pub use tracker::HttpTracker;

/// Errors produced by the HTTP client layer.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("{context}: HTTP {status}")]
    Status { context: String, status: u16 },

    #[error("authentication with {service} failed")]
    Auth { service: String },

    #[error("unexpected response shape: {0}")]
    Shape(String),
}

/// One chat message as returned by history queries.
#[derive(Debug, Clone)]
pub struct Message {
    pub username: String,
    pub text: String,
    pub ts: DateTime<Utc>,
}

/// Chat server: channel and direct-message history.
pub trait Chat {
    /// Messages in a public channel, newest first.
    fn channel_history(&self, channel: &str) -> Result<Vec<Message>>;

    /// Direct messages exchanged with the given user, newest first.
    fn dm_history(&self, username: &str) -> Result<Vec<Message>>;
}

/// File-sync server: content fetch and shallow listing.
pub trait FileStore {
    /// Download a file's raw content by path.
    fn fetch(&self, path: &str) -> Result<Vec<u8>>;

    /// Download a file and decode it as UTF-8.
    fn fetch_text(&self, path: &str) -> Result<String> {
        let bytes = self.fetch(path)?;
        String::from_utf8(bytes).map_err(|_| ClientError::Shape("file is not UTF-8".into()).into())
    }

    /// Whether a file or directory exists at the given path.
    fn exists(&self, path: &str) -> Result<bool>;

    /// Names of the entries directly under a directory.
    fn list_dir(&self, path: &str) -> Result<Vec<String>>;
}

/// Project tracker REST API (API-key auth).
pub trait Tracker {
    fn projects(&self) -> Result<Vec<Value>>;

    fn issues(&self, project_id: &str) -> Result<Vec<Value>>;

    fn cycles(&self, project_id: &str) -> Result<Vec<Value>>;
}

/// Source-forge REST API (private-token auth).
pub trait Forge {
    fn issues(&self, project: &str) -> Result<Vec<Value>>;

    fn milestones(&self, project: &str) -> Result<Vec<Value>>;

    /// Raw content of a wiki page by slug.
    fn wiki_page(&self, project: &str, slug: &str) -> Result<String>;

    /// Pipelines for a project, optionally filtered to one ref.
    fn pipelines(&self, project: &str, git_ref: Option<&str>) -> Result<Vec<Value>>;
}

/// LLM judge: black-box boolean verdict on content against a
/// natural-language predicate.
pub trait Judge {
    fn verdict(&self, content: &str, predicate: &str) -> Result<bool>;
}
