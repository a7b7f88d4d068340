//! Finance task evaluators.

use crate::context::EvalContext;
use crate::scoring::{
    graded, graded_bool, BonusRule, Checkpoint, Credit, IncompletePolicy, TaskResult,
};
use crate::tasks::{dm_contains, tracker_project_id, value_str, Category, Task};
use crate::trajectory;

/// Reconcile vendor invoices against the payment ledger.
///
/// Flagging the duplicate invoice is the point of the exercise, so this
/// task uses the strict final-checkpoint policy: missing it zeroes the
/// task.
pub struct InvoiceReconciliation;

impl Task for InvoiceReconciliation {
    fn id(&self) -> &'static str {
        "finance-invoice-reconciliation"
    }

    fn category(&self) -> Category {
        Category::Finance
    }

    fn description(&self) -> &'static str {
        "Reconcile Q3 vendor invoices and flag the duplicate from Initech"
    }

    fn grade_checkpoints(&self, ctx: &EvalContext, trajectory_log: &str) -> TaskResult {
        let id = self.id();
        let mut result = TaskResult::with_bonus(BonusRule::ForFinalCheckpoint {
            on_incomplete: IncompletePolicy::ZeroOut,
        });

        result.add(Checkpoint::from_bool(
            1,
            trajectory::contains(trajectory_log, "Documents/Finance/invoices"),
        ));

        let reconciliation = ctx
            .files
            .fetch_text("Documents/Finance/reconciliation.csv")
            .ok();

        result.add(Checkpoint::new(
            2,
            graded(id, "invoices-matched", || match &reconciliation {
                Some(sheet) => {
                    let matched = ["acme,1450.00,matched", "globex,980.50,matched"]
                        .iter()
                        .filter(|row| sheet.contains(**row))
                        .count() as u32;
                    Ok(Credit::Partial(matched))
                }
                None => Ok(Credit::None),
            }),
        ));

        result.add(Checkpoint::from_bool(
            1,
            graded_bool(id, "duplicate-flagged", || match &reconciliation {
                Some(sheet) => ctx
                    .judge
                    .verdict(sheet, "flags the duplicate invoice from Initech"),
                None => Ok(false),
            }),
        ));

        result
    }
}

/// Write the quarterly budget-variance report and brief the CFO.
pub struct BudgetVariance;

impl Task for BudgetVariance {
    fn id(&self) -> &'static str {
        "finance-budget-variance"
    }

    fn category(&self) -> Category {
        Category::Finance
    }

    fn description(&self) -> &'static str {
        "Write the Q3 budget-variance report and brief the CFO by DM"
    }

    fn grade_checkpoints(&self, ctx: &EvalContext, _trajectory_log: &str) -> TaskResult {
        let id = self.id();
        let mut result = TaskResult::new();

        let report = ctx
            .files
            .fetch_text("Documents/Finance/budget-variance-q3.md")
            .ok();

        result.add(Checkpoint::from_bool(1, report.is_some()));

        result.add(Checkpoint::from_bool(
            1,
            graded_bool(id, "variance-explained", || match &report {
                Some(text) => ctx
                    .judge
                    .verdict(text, "explains the variance in travel spend"),
                None => Ok(false),
            }),
        ));

        result.add(Checkpoint::from_bool(
            1,
            graded_bool(id, "cfo-briefed", || dm_contains(ctx, "cfo", "variance")),
        ));

        result
    }
}

/// Upload the monthly statements for the quarter.
pub struct QuarterlyStatements;

const STATEMENTS: [&str; 3] = ["july.pdf", "august.pdf", "september.pdf"];

impl Task for QuarterlyStatements {
    fn id(&self) -> &'static str {
        "finance-quarterly-statements"
    }

    fn category(&self) -> Category {
        Category::Finance
    }

    fn description(&self) -> &'static str {
        "Upload the three monthly statements for Q3 to the statements folder"
    }

    fn grade_checkpoints(&self, ctx: &EvalContext, _trajectory_log: &str) -> TaskResult {
        let id = self.id();
        let mut result = TaskResult::new();

        result.add(Checkpoint::new(
            3,
            graded(id, "statements-uploaded", || {
                let entries = ctx.files.list_dir("Documents/Finance/Statements/Q3")?;
                let uploaded = STATEMENTS
                    .iter()
                    .filter(|name| entries.iter().any(|e| e == *name))
                    .count() as u32;
                Ok(Credit::Partial(uploaded))
            }),
        ));

        result
    }
}

/// Chase the overdue vendor payment and close the follow-up issue.
pub struct VendorPaymentFollowup;

impl Task for VendorPaymentFollowup {
    fn id(&self) -> &'static str {
        "finance-vendor-followup"
    }

    fn category(&self) -> Category {
        Category::Finance
    }

    fn description(&self) -> &'static str {
        "Follow up on Acme invoice 2214 and close the tracker issue"
    }

    fn grade_checkpoints(&self, ctx: &EvalContext, trajectory_log: &str) -> TaskResult {
        let id = self.id();
        let mut result = TaskResult::new();

        result.add(Checkpoint::from_bool(
            1,
            trajectory::contains(trajectory_log, "payments.example.com"),
        ));

        result.add(Checkpoint::from_bool(
            1,
            graded_bool(id, "vendor-contacted", || {
                dm_contains(ctx, "acme-billing", "2214")
            }),
        ));

        result.add(Checkpoint::from_bool(
            1,
            graded_bool(id, "issue-closed", || {
                let Some(project_id) = tracker_project_id(ctx, "Finance Ops")? else {
                    return Ok(false);
                };
                let issues = ctx.tracker.issues(&project_id)?;
                Ok(issues.iter().any(|issue| {
                    value_str(issue, "name").is_some_and(|n| n.contains("Acme"))
                        && value_str(issue, "state").is_some_and(|s| s == "Done")
                }))
            }),
        ));

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::mock::{msg, MockChat, MockFileStore, MockJudge, MockTracker};
    use crate::context::testing::{empty_context, outage_context};
    use serde_json::json;

    const RECONCILIATION: &str = "vendor,amount,status\n\
        acme,1450.00,matched\n\
        globex,980.50,matched\n\
        initech,300.00,duplicate of INV-0087\n";

    #[test]
    fn test_reconciliation_full_credit() {
        let mut ctx = empty_context();
        ctx.files = Box::new(
            MockFileStore::default()
                .with_file("Documents/Finance/reconciliation.csv", RECONCILIATION),
        );
        ctx.judge = Box::new(MockJudge::default().yes_when("duplicate"));

        let trajectory = "listed Documents/Finance/invoices and compared totals";
        let score = InvoiceReconciliation
            .grade_checkpoints(&ctx, trajectory)
            .compute();
        assert_eq!(score.total, 4);
        assert_eq!(score.result, 4);
    }

    #[test]
    fn test_reconciliation_missed_duplicate_zeroes_task() {
        let mut ctx = empty_context();
        ctx.files = Box::new(MockFileStore::default().with_file(
            "Documents/Finance/reconciliation.csv",
            "vendor,amount,status\nacme,1450.00,matched\nglobex,980.50,matched\n",
        ));
        // Judge says no: the duplicate was not flagged.

        let trajectory = "listed Documents/Finance/invoices";
        let score = InvoiceReconciliation
            .grade_checkpoints(&ctx, trajectory)
            .compute();
        assert_eq!(score.total, 4);
        assert_eq!(score.result, 0);
    }

    #[test]
    fn test_quarterly_statements_partial() {
        let mut ctx = empty_context();
        ctx.files = Box::new(
            MockFileStore::default()
                .with_file("Documents/Finance/Statements/Q3/july.pdf", "pdf")
                .with_file("Documents/Finance/Statements/Q3/september.pdf", "pdf"),
        );

        let score = QuarterlyStatements.grade_checkpoints(&ctx, "").compute();
        assert_eq!(score.total, 3);
        assert_eq!(score.result, 2);
    }

    #[test]
    fn test_vendor_followup_full_credit() {
        let mut ctx = empty_context();
        ctx.chat = Box::new(MockChat::default().with_dm(
            "acme-billing",
            vec![msg("finance", "Following up on invoice 2214, now overdue")],
        ));
        ctx.tracker = Box::new(
            MockTracker::default()
                .with_project(json!({"id": "p-fin", "name": "Finance Ops"}))
                .with_issues(
                    "p-fin",
                    vec![json!({"name": "Follow up with Acme", "state": "Done"})],
                ),
        );

        let score = VendorPaymentFollowup
            .grade_checkpoints(&ctx, "visited https://payments.example.com/outgoing")
            .compute();
        assert_eq!(score.total, 3);
        assert_eq!(score.result, 3);
    }

    #[test]
    fn test_budget_variance_outage_scores_zero() {
        let ctx = outage_context();
        let score = BudgetVariance.grade_checkpoints(&ctx, "").compute();
        assert_eq!(score.total, 3);
        assert_eq!(score.result, 0);
    }
}
