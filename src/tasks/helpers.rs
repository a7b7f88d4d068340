//! Probe helpers shared by the task evaluators.

use anyhow::{Context, Result};
use regex::Regex;
use serde_json::Value;

use crate::context::EvalContext;

/// Whether any direct message with `username` contains `needle`
/// (case-insensitive).
pub(crate) fn dm_contains(ctx: &EvalContext, username: &str, needle: &str) -> Result<bool> {
    let needle = needle.to_lowercase();
    Ok(ctx
        .chat
        .dm_history(username)?
        .iter()
        .any(|m| m.text.to_lowercase().contains(&needle)))
}

/// Whether any message in `channel` contains every needle
/// (case-insensitive).
pub(crate) fn channel_contains(ctx: &EvalContext, channel: &str, needles: &[&str]) -> Result<bool> {
    let needles: Vec<String> = needles.iter().map(|n| n.to_lowercase()).collect();
    Ok(ctx.chat.channel_history(channel)?.iter().any(|m| {
        let text = m.text.to_lowercase();
        needles.iter().all(|n| text.contains(n.as_str()))
    }))
}

/// All direct messages with `username`, joined into one document for the
/// judge.
pub(crate) fn dm_text(ctx: &EvalContext, username: &str) -> Result<String> {
    let messages = ctx.chat.dm_history(username)?;
    Ok(messages
        .iter()
        .map(|m| format!("{}: {}", m.username, m.text))
        .collect::<Vec<_>>()
        .join("\n"))
}

/// Whether the file on the sync server matches a regex pattern.
pub(crate) fn file_matches(ctx: &EvalContext, path: &str, pattern: &str) -> Result<bool> {
    let content = ctx.files.fetch_text(path)?;
    let regex = Regex::new(pattern).context("invalid verification pattern")?;
    Ok(regex.is_match(&content))
}

/// Tracker project id for the project with the given name, if any.
pub(crate) fn tracker_project_id(ctx: &EvalContext, name: &str) -> Result<Option<String>> {
    let projects = ctx.tracker.projects()?;
    Ok(projects
        .iter()
        .find(|p| value_str(p, "name") == Some(name))
        .and_then(|p| value_str(p, "id").map(str::to_string)))
}

/// Borrow a string field from a JSON document.
pub(crate) fn value_str<'a>(value: &'a Value, field: &str) -> Option<&'a str> {
    value.get(field).and_then(Value::as_str)
}
