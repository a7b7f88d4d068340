//! Substring predicates over the recorded trajectory.
//!
//! The trajectory is the full textual log of the agent's actions and
//! observations. Checkpoints that need evidence of a step (a URL visited,
//! an action taken) check for a required substring. This is deliberately a
//! crude containment check, not a structured parse; the harness's precision
//! requirements are low and a parser would overfit to one driver's log
//! format.

/// Whether the trajectory contains the given evidence substring.
///
/// An empty trajectory (driver could not capture one) matches nothing, so
/// trajectory-dependent checkpoints degrade to zero credit rather than
/// failing.
pub fn contains(trajectory: &str, needle: &str) -> bool {
    !needle.is_empty() && trajectory.contains(needle)
}

/// Case-insensitive variant of [`contains`].
pub fn contains_ci(trajectory: &str, needle: &str) -> bool {
    !needle.is_empty() && trajectory.to_lowercase().contains(&needle.to_lowercase())
}

/// Whether the trajectory contains every one of the given substrings.
pub fn contains_all(trajectory: &str, needles: &[&str]) -> bool {
    needles.iter().all(|needle| contains(trajectory, needle))
}

/// Whether the trajectory contains at least one of the given substrings.
pub fn contains_any(trajectory: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| contains(trajectory, needle))
}
