//! Collaborator service endpoints and credentials.
//!
//! Configuration is loaded from `rubric.toml` when present, otherwise from
//! `RUBRIC_*` environment variables, falling back to the local service
//! defaults used by the docker-compose development setup.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::Path;

/// Default config file name, looked up in the working directory.
pub const CONFIG_FILE: &str = "rubric.toml";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    /// Base URL of the chat server.
    pub url: String,
    /// Admin account used for read-only history queries.
    pub username: String,
    pub password: String,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            url: env_or("RUBRIC_CHAT_URL", "http://localhost:3000"),
            username: env_or("RUBRIC_CHAT_USER", "admin"),
            password: env_or("RUBRIC_CHAT_PASSWORD", "admin"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileStoreConfig {
    /// Base URL of the file-sync server (WebDAV endpoint lives under it).
    pub url: String,
    pub username: String,
    pub password: String,
}

impl Default for FileStoreConfig {
    fn default() -> Self {
        Self {
            url: env_or("RUBRIC_FILES_URL", "http://localhost:8092"),
            username: env_or("RUBRIC_FILES_USER", "admin"),
            password: env_or("RUBRIC_FILES_PASSWORD", "admin"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// Base URL of the project tracker REST API.
    pub url: String,
    pub api_key: String,
    /// Workspace slug all projects live under.
    pub workspace: String,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            url: env_or("RUBRIC_TRACKER_URL", "http://localhost:8091"),
            api_key: env_or("RUBRIC_TRACKER_API_KEY", ""),
            workspace: env_or("RUBRIC_TRACKER_WORKSPACE", "office"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ForgeConfig {
    /// Base URL of the source-forge server.
    pub url: String,
    /// Private token for the REST API.
    pub token: String,
}

impl Default for ForgeConfig {
    fn default() -> Self {
        Self {
            url: env_or("RUBRIC_FORGE_URL", "http://localhost:8929"),
            token: env_or("RUBRIC_FORGE_TOKEN", ""),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct JudgeConfig {
    /// Base URL of an OpenAI-compatible chat completion endpoint.
    pub url: String,
    pub api_key: String,
    pub model: String,
}

impl Default for JudgeConfig {
    fn default() -> Self {
        Self {
            url: env_or("RUBRIC_JUDGE_URL", "http://localhost:4000"),
            api_key: env_or("RUBRIC_JUDGE_API_KEY", ""),
            model: env_or("RUBRIC_JUDGE_MODEL", "gpt-4o"),
        }
    }
}

/// Top-level harness configuration: one section per collaborator service.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HarnessConfig {
    pub chat: ChatConfig,
    pub files: FileStoreConfig,
    pub tracker: TrackerConfig,
    pub forge: ForgeConfig,
    pub judge: JudgeConfig,
}

impl HarnessConfig {
    /// Load configuration.
    ///
    /// With an explicit path, the file must exist and parse. Without one,
    /// `rubric.toml` is used if present; otherwise everything comes from
    /// environment variables and defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                let default = Path::new(CONFIG_FILE);
                if default.exists() {
                    Self::from_file(default)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}
