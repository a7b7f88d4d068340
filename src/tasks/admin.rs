//! Administrative task evaluators.

use crate::context::EvalContext;
use crate::scoring::{
    graded, graded_bool, BonusRule, Checkpoint, Credit, IncompletePolicy, TaskResult,
};
use crate::tasks::{channel_contains, dm_contains, dm_text, Category, Task};
use crate::trajectory;

/// Restock the office supply inventory and notify the vendor.
pub struct OfficeInventory;

impl Task for OfficeInventory {
    fn id(&self) -> &'static str {
        "admin-office-inventory"
    }

    fn category(&self) -> Category {
        Category::Admin
    }

    fn description(&self) -> &'static str {
        "Update the office inventory sheet and ask the supply vendor for a restock"
    }

    fn grade_checkpoints(&self, ctx: &EvalContext, trajectory_log: &str) -> TaskResult {
        let id = self.id();
        let mut result = TaskResult::new();

        result.add(Checkpoint::from_bool(
            1,
            trajectory::contains(trajectory_log, "Documents/Office"),
        ));

        // One point per required item listed in the updated sheet.
        result.add(Checkpoint::new(
            3,
            graded(id, "inventory-sheet-updated", || {
                let sheet = ctx.files.fetch_text("Documents/Office/inventory.csv")?;
                let listed = ["Desk Chair", "Monitor", "Whiteboard Markers"]
                    .iter()
                    .filter(|item| sheet.contains(**item))
                    .count() as u32;
                Ok(Credit::Partial(listed))
            }),
        ));

        result.add(Checkpoint::from_bool(
            1,
            graded_bool(id, "vendor-notified", || {
                dm_contains(ctx, "supplies-vendor", "restock")
            }),
        ));

        result
    }
}

/// Publish next week's meeting-room schedule and announce it.
pub struct MeetingSchedule;

impl Task for MeetingSchedule {
    fn id(&self) -> &'static str {
        "admin-meeting-schedule"
    }

    fn category(&self) -> Category {
        Category::Admin
    }

    fn description(&self) -> &'static str {
        "Publish the weekly meeting-room schedule and announce it in #general"
    }

    fn grade_checkpoints(&self, ctx: &EvalContext, _trajectory_log: &str) -> TaskResult {
        let id = self.id();
        let mut result = TaskResult::with_bonus(BonusRule::ForFinalCheckpoint {
            on_incomplete: IncompletePolicy::KeepSum,
        });

        // Fetch once; the content feeds both the existence checkpoint and
        // the judge checkpoint.
        let schedule_text = ctx
            .files
            .fetch_text("Documents/Admin/meeting-schedule.md")
            .ok();

        result.add(Checkpoint::from_bool(1, schedule_text.is_some()));

        result.add(Checkpoint::from_bool(
            2,
            graded_bool(id, "schedule-covers-week", || match &schedule_text {
                Some(text) => ctx
                    .judge
                    .verdict(text, "every weekday has a meeting room assigned"),
                None => Ok(false),
            }),
        ));

        result.add(Checkpoint::from_bool(
            1,
            graded_bool(id, "schedule-announced", || {
                channel_contains(ctx, "general", &["meeting schedule"])
            }),
        ));

        result
    }
}

/// Answer an employee's question about the travel policy over DM.
pub struct TravelPolicyQa;

impl Task for TravelPolicyQa {
    fn id(&self) -> &'static str {
        "admin-travel-policy-qa"
    }

    fn category(&self) -> Category {
        Category::Admin
    }

    fn description(&self) -> &'static str {
        "Answer li.ming's travel policy question with the correct meal allowance"
    }

    fn grade_checkpoints(&self, ctx: &EvalContext, trajectory_log: &str) -> TaskResult {
        let id = self.id();
        let mut result = TaskResult::new();

        result.add(Checkpoint::from_bool(
            1,
            trajectory::contains(trajectory_log, "travel-policy"),
        ));

        result.add(Checkpoint::from_bool(
            2,
            graded_bool(id, "correct-answer-sent", || {
                let conversation = dm_text(ctx, "li.ming")?;
                if conversation.is_empty() {
                    return Ok(false);
                }
                ctx.judge.verdict(
                    &conversation,
                    "tells the employee the daily meal allowance is $75",
                )
            }),
        ));

        result
    }
}

/// Collect quarterly expense reports from every employee.
pub struct ExpenseReportCollect;

const EXPENSE_EMPLOYEES: [&str; 3] = ["chen", "garcia", "patel"];

impl Task for ExpenseReportCollect {
    fn id(&self) -> &'static str {
        "admin-expense-collect"
    }

    fn category(&self) -> Category {
        Category::Admin
    }

    fn description(&self) -> &'static str {
        "Collect a Q3 expense report per employee and remind #finance"
    }

    fn grade_checkpoints(&self, ctx: &EvalContext, _trajectory_log: &str) -> TaskResult {
        let id = self.id();
        let mut result = TaskResult::with_bonus(BonusRule::ForAnyCheckpoint { bonus: 1 });

        result.add(Checkpoint::new(
            3,
            graded(id, "reports-collected", || {
                let entries = ctx.files.list_dir("Documents/Expenses/2025-Q3")?;
                let collected = EXPENSE_EMPLOYEES
                    .iter()
                    .filter(|name| entries.iter().any(|e| e.starts_with(**name)))
                    .count() as u32;
                Ok(Credit::Partial(collected))
            }),
        ));

        result.add(Checkpoint::from_bool(
            1,
            graded_bool(id, "finance-reminded", || {
                channel_contains(ctx, "finance", &["expense report"])
            }),
        ));

        result
    }
}
