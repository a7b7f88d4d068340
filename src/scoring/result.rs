//! TaskResult: an ordered collection of checkpoints plus an optional bonus
//! rule, aggregated into one reportable, bounded score.

use serde_json::{json, Value};

use super::bonus::BonusRule;
use super::checkpoint::Checkpoint;

/// The aggregate score of one task evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FinalScore {
    /// Sum of all checkpoint weights.
    pub total: u32,
    /// Earned points after bonus adjustment.
    pub result: u32,
}

impl FinalScore {
    /// Normalized score in `[0, 1]` for downstream aggregation.
    /// Defined as 0 when the total is 0, never a division error.
    pub fn ratio(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            f64::from(self.result) / f64::from(self.total)
        }
    }
}

/// Ordered checkpoints for one task evaluation run.
///
/// Insertion order is preserved for reporting; it only affects scoring
/// through [`BonusRule::ForFinalCheckpoint`], which addresses the last
/// checkpoint by position.
#[derive(Debug, Clone, Default)]
pub struct TaskResult {
    checkpoints: Vec<Checkpoint>,
    bonus: Option<BonusRule>,
}

impl TaskResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a bonus rule. Without one the raw sum is reported.
    pub fn with_bonus(bonus: BonusRule) -> Self {
        Self {
            checkpoints: Vec::new(),
            bonus: Some(bonus),
        }
    }

    /// Append a checkpoint, extending the total capacity.
    pub fn add(&mut self, checkpoint: Checkpoint) {
        self.checkpoints.push(checkpoint);
    }

    pub fn checkpoints(&self) -> &[Checkpoint] {
        &self.checkpoints
    }

    /// Aggregate the current checkpoint list.
    ///
    /// Pure and idempotent: two calls with no intervening `add` return
    /// identical scores. An empty list computes to 0/0 without error; an
    /// evaluator producing zero checkpoints is a broken task definition,
    /// but the aggregator must survive it.
    pub fn compute(&self) -> FinalScore {
        let total: u32 = self.checkpoints.iter().map(|cp| cp.total).sum();
        let raw_sum: u32 = self.checkpoints.iter().map(|cp| cp.result).sum();
        let result = match &self.bonus {
            Some(rule) => rule.apply(&self.checkpoints, raw_sum, total),
            None => raw_sum,
        };
        FinalScore { total, result }
    }

    /// Serialize to the JSON document consumed by the report tooling.
    ///
    /// The nested `final_score` object is the part downstream aggregation
    /// reads; the flat `total`/`result` and per-checkpoint entries are kept
    /// for human inspection.
    pub fn to_json(&self) -> Value {
        let score = self.compute();
        json!({
            "checkpoints": self
                .checkpoints
                .iter()
                .map(|cp| json!({ "total": cp.total, "result": cp.result }))
                .collect::<Vec<_>>(),
            "total": score.total,
            "result": score.result,
            "final_score": {
                "total": score.total,
                "result": score.result,
            },
        })
    }
}
