//! LLM judge: boolean verdicts from an OpenAI-compatible chat endpoint.
//!
//! The judge is a black-box classifier. It is asked to answer a single
//! natural-language predicate about a piece of content with exactly "yes"
//! or "no"; anything that does not start with "yes" counts as "no".

use anyhow::{Context, Result};
use reqwest::blocking::Client;
use serde_json::{json, Value};

use super::http::{build_client, join_url, validate_status};
use super::{ClientError, Judge};
use crate::config::JudgeConfig;

const SYSTEM_PROMPT: &str = "You are grading the outcome of an office task. \
You will be given a predicate and some content. Answer with exactly 'yes' \
if the content satisfies the predicate, or 'no' if it does not. Do not \
explain.";

pub struct HttpJudge {
    client: Client,
    config: JudgeConfig,
}

impl HttpJudge {
    pub fn new(config: JudgeConfig) -> Result<Self> {
        Ok(Self {
            client: build_client()?,
            config,
        })
    }
}

impl Judge for HttpJudge {
    fn verdict(&self, content: &str, predicate: &str) -> Result<bool> {
        let body = json!({
            "model": self.config.model,
            "temperature": 0,
            "messages": [
                { "role": "system", "content": SYSTEM_PROMPT },
                {
                    "role": "user",
                    "content": format!("Predicate: {predicate}\n\nContent:\n{content}"),
                },
            ],
        });

        let response = self
            .client
            .post(join_url(&self.config.url, "v1/chat/completions"))
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .context("Failed to reach judge endpoint")?;
        validate_status(&response, "chat/completions")?;

        let completion: Value = response
            .json()
            .map_err(|e| ClientError::Shape(format!("judge response: {e}")))?;
        let answer = completion["choices"][0]["message"]["content"]
            .as_str()
            .ok_or_else(|| ClientError::Shape("judge response has no message content".into()))?;

        Ok(parse_verdict(answer))
    }
}

fn parse_verdict(answer: &str) -> bool {
    answer.trim().to_lowercase().starts_with("yes")
}
