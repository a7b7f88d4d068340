//! Bonus rules: named policies applied after the raw checkpoint sum.

use super::checkpoint::Checkpoint;

/// What happens to the aggregate when the final checkpoint is not at full
/// credit under [`BonusRule::ForFinalCheckpoint`].
///
/// The default is `KeepSum` (the raw sum stands, nothing extra is awarded);
/// `ZeroOut` is the strict variant where an incomplete final checkpoint
/// zeroes the whole task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IncompletePolicy {
    /// Report the raw sum unchanged.
    #[default]
    KeepSum,
    /// Report zero for the whole task.
    ZeroOut,
}

/// A policy adjusting the raw checkpoint sum based on specific outcomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BonusRule {
    /// The full raw sum is awarded only if the last checkpoint in insertion
    /// order achieved full credit; otherwise `on_incomplete` applies.
    ForFinalCheckpoint { on_incomplete: IncompletePolicy },
    /// A flat `bonus` is added to the raw sum if any checkpoint achieved
    /// full credit. The adjusted score is capped at the checkpoint total
    /// plus `bonus` (the bonus amount is the ceiling).
    ForAnyCheckpoint { bonus: u32 },
}

impl BonusRule {
    /// Adjust `raw_sum` according to this rule.
    ///
    /// `total` is the sum of all checkpoint weights; on an empty checkpoint
    /// list every rule leaves the (zero) raw sum unchanged.
    pub(crate) fn apply(&self, checkpoints: &[Checkpoint], raw_sum: u32, total: u32) -> u32 {
        match self {
            BonusRule::ForFinalCheckpoint { on_incomplete } => match checkpoints.last() {
                Some(last) if last.is_full() => raw_sum,
                Some(_) => match on_incomplete {
                    IncompletePolicy::KeepSum => raw_sum,
                    IncompletePolicy::ZeroOut => 0,
                },
                None => raw_sum,
            },
            BonusRule::ForAnyCheckpoint { bonus } => {
                if checkpoints.iter().any(Checkpoint::is_full) {
                    (raw_sum + bonus).min(total + bonus)
                } else {
                    raw_sum
                }
            }
        }
    }
}
