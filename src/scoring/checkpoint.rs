//! Checkpoint: one weighted pass/fail or partial-credit test unit.
//!
//! A checkpoint is constructed once, immediately after its probe has run,
//! and is immutable afterward. Boolean outcomes are mapped to points at
//! this boundary so the aggregator never coerces types.

use serde::{Deserialize, Serialize};

/// Outcome of a single checkpoint probe.
///
/// `Partial` carries an explicit point count; it must not exceed the
/// checkpoint's `total` when the checkpoint is constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Credit {
    /// Full credit: the checkpoint earns its entire weight.
    Full,
    /// Partial credit: an explicit number of points.
    Partial(u32),
    /// No credit.
    None,
}

impl Credit {
    /// Map a boolean probe outcome to credit: `true` is full, `false` is none.
    pub fn from_bool(passed: bool) -> Self {
        if passed {
            Credit::Full
        } else {
            Credit::None
        }
    }

    /// Resolve this credit against a checkpoint weight.
    fn points(self, total: u32) -> u32 {
        match self {
            Credit::Full => total,
            Credit::Partial(points) => points,
            Credit::None => 0,
        }
    }
}

/// A single named-by-position, weighted test outcome.
///
/// Invariant: `0 <= result <= total` and `total > 0`. Both are enforced at
/// construction; this is an internal scoring utility, so violations are
/// caller bugs and assert rather than clamp.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Checkpoint {
    /// Maximum achievable points for this check.
    pub total: u32,
    /// Points actually earned, in `[0, total]`.
    pub result: u32,
}

impl Checkpoint {
    /// Create a checkpoint worth `total` points with the given credit.
    pub fn new(total: u32, credit: Credit) -> Self {
        assert!(total > 0, "checkpoint weight must be positive");
        let result = credit.points(total);
        assert!(
            result <= total,
            "checkpoint result {result} exceeds weight {total}"
        );
        Self { total, result }
    }

    /// Create a checkpoint from a boolean probe: `true` earns `total`,
    /// `false` earns 0.
    pub fn from_bool(total: u32, passed: bool) -> Self {
        Self::new(total, Credit::from_bool(passed))
    }

    /// Whether this checkpoint achieved full credit.
    pub fn is_full(&self) -> bool {
        self.result == self.total
    }
}
