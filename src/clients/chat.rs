//! Rocket.Chat-style chat client.
//!
//! Authentication is lazy: the login round-trip happens on the first
//! history query, not at construction. An evaluation must always produce a
//! score, so an unreachable chat server has to fail inside graded probes,
//! not while the evaluation context is being assembled.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use reqwest::blocking::Client;
use serde::Deserialize;
use serde_json::json;
use std::cell::RefCell;

use super::http::{build_client, join_url, validate_status};
use super::{Chat, ClientError, Message};
use crate::config::ChatConfig;

pub struct HttpChat {
    client: Client,
    config: ChatConfig,
    session: RefCell<Option<Session>>,
}

#[derive(Clone)]
struct Session {
    auth_token: String,
    user_id: String,
}

#[derive(Deserialize)]
struct LoginResponse {
    data: LoginData,
}

#[derive(Deserialize)]
struct LoginData {
    #[serde(rename = "authToken")]
    auth_token: String,
    #[serde(rename = "userId")]
    user_id: String,
}

#[derive(Deserialize)]
struct HistoryResponse {
    #[serde(default)]
    messages: Vec<RawMessage>,
}

#[derive(Deserialize)]
struct RawMessage {
    #[serde(default)]
    msg: String,
    u: RawUser,
    ts: DateTime<Utc>,
}

#[derive(Deserialize)]
struct RawUser {
    username: String,
}

impl HttpChat {
    pub fn new(config: ChatConfig) -> Result<Self> {
        Ok(Self {
            client: build_client()?,
            config,
            session: RefCell::new(None),
        })
    }

    /// Return the cached session, logging in on first use.
    fn session(&self) -> Result<Session> {
        if let Some(session) = self.session.borrow().as_ref() {
            return Ok(session.clone());
        }

        let response = self
            .client
            .post(join_url(&self.config.url, "api/v1/login"))
            .json(&json!({
                "user": self.config.username,
                "password": self.config.password,
            }))
            .send()
            .context("Failed to reach chat server for login")?;

        if !response.status().is_success() {
            return Err(ClientError::Auth {
                service: "chat".to_string(),
            }
            .into());
        }

        let login: LoginResponse = response
            .json()
            .map_err(|e| ClientError::Shape(format!("chat login response: {e}")))?;

        let session = Session {
            auth_token: login.data.auth_token,
            user_id: login.data.user_id,
        };
        *self.session.borrow_mut() = Some(session.clone());
        Ok(session)
    }

    fn history(&self, endpoint: &str, query: &[(&str, &str)]) -> Result<Vec<Message>> {
        let session = self.session()?;
        let response = self
            .client
            .get(join_url(&self.config.url, endpoint))
            .header("X-Auth-Token", &session.auth_token)
            .header("X-User-Id", &session.user_id)
            .query(query)
            .send()
            .with_context(|| format!("Failed to fetch {endpoint}"))?;
        validate_status(&response, endpoint)?;

        let history: HistoryResponse = response
            .json()
            .map_err(|e| ClientError::Shape(format!("chat history response: {e}")))?;

        Ok(history
            .messages
            .into_iter()
            .map(|raw| Message {
                username: raw.u.username,
                text: raw.msg,
                ts: raw.ts,
            })
            .collect())
    }
}

impl Chat for HttpChat {
    fn channel_history(&self, channel: &str) -> Result<Vec<Message>> {
        self.history(
            "api/v1/channels.history",
            &[("roomName", channel), ("count", "200")],
        )
    }

    fn dm_history(&self, username: &str) -> Result<Vec<Message>> {
        self.history(
            "api/v1/im.history",
            &[("username", username), ("count", "200")],
        )
    }
}
