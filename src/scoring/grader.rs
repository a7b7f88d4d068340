//! Fault isolation for checkpoint probes.
//!
//! A probe talks to collaborator services, reads files, or inspects the
//! trajectory, and any of that can fail: unreachable host, missing file,
//! unexpected response shape. One probe's failure must never abort the
//! evaluation of the remaining checkpoints or the aggregation step, so
//! every probe runs through `graded`, which converts errors to zero credit
//! and logs them with context.

use anyhow::Result;
use tracing::warn;

use super::checkpoint::Credit;

/// Run a credit-returning probe, converting any error to zero credit.
///
/// On `Ok` the credit passes through unchanged. On `Err` the failure is
/// logged at warn severity with the task and checkpoint it belongs to, and
/// `Credit::None` is returned. Never propagates.
pub fn graded<F>(task_id: &str, checkpoint: &str, probe: F) -> Credit
where
    F: FnOnce() -> Result<Credit>,
{
    match probe() {
        Ok(credit) => credit,
        Err(err) => {
            warn!(
                task = task_id,
                checkpoint, "checkpoint probe failed, scoring zero credit: {err:#}"
            );
            Credit::None
        }
    }
}

/// Boolean convenience over [`graded`]: errors become `false`.
pub fn graded_bool<F>(task_id: &str, checkpoint: &str, probe: F) -> bool
where
    F: FnOnce() -> Result<bool>,
{
    matches!(
        graded(task_id, checkpoint, || probe().map(Credit::from_bool)),
        Credit::Full
    )
}
