//! The checkpoint scoring and aggregation protocol.
//!
//! This module provides:
//! - Checkpoint and credit types
//! - TaskResult aggregation with bonus rules
//! - The fault-isolating grading wrapper for checkpoint probes

mod bonus;
mod checkpoint;
mod grader;
mod result;

pub use bonus::{BonusRule, IncompletePolicy};
pub use checkpoint::{Checkpoint, Credit};
pub use grader::{graded, graded_bool};
pub use result::{FinalScore, TaskResult};
