//! HR task evaluators.

use crate::context::EvalContext;
use crate::scoring::{graded, graded_bool, BonusRule, Checkpoint, Credit, TaskResult};
use crate::tasks::{
    channel_contains, dm_contains, file_matches, tracker_project_id, value_str, Category, Task,
};

/// Prepare an onboarding checklist for a new hire and welcome them.
pub struct OnboardingChecklist;

impl Task for OnboardingChecklist {
    fn id(&self) -> &'static str {
        "hr-onboarding-checklist"
    }

    fn category(&self) -> Category {
        Category::Hr
    }

    fn description(&self) -> &'static str {
        "Write Sara Kim's onboarding checklist and send her a welcome DM"
    }

    fn grade_checkpoints(&self, ctx: &EvalContext, _trajectory_log: &str) -> TaskResult {
        let id = self.id();
        let mut result = TaskResult::new();

        let checklist = ctx
            .files
            .fetch_text("Documents/HR/onboarding/sara-kim-checklist.md")
            .ok();

        result.add(Checkpoint::from_bool(1, checklist.is_some()));

        result.add(Checkpoint::from_bool(
            1,
            graded_bool(id, "checklist-complete", || match &checklist {
                Some(text) => ctx.judge.verdict(
                    text,
                    "covers equipment setup, account creation, and a first-week schedule",
                ),
                None => Ok(false),
            }),
        ));

        result.add(Checkpoint::from_bool(
            1,
            graded_bool(id, "welcome-dm-sent", || {
                dm_contains(ctx, "sara.kim", "welcome")
            }),
        ));

        result
    }
}

/// Apply approved leave requests to the balance sheet and confirm.
pub struct LeaveBalanceUpdate;

impl Task for LeaveBalanceUpdate {
    fn id(&self) -> &'static str {
        "hr-leave-balance"
    }

    fn category(&self) -> Category {
        Category::Hr
    }

    fn description(&self) -> &'static str {
        "Update the leave-balance sheet for approved requests and confirm by DM"
    }

    fn grade_checkpoints(&self, ctx: &EvalContext, _trajectory_log: &str) -> TaskResult {
        let id = self.id();
        let mut result = TaskResult::new();

        // One point per correctly updated row; patterns tolerate spacing
        // differences in the edited CSV.
        result.add(Checkpoint::new(
            2,
            graded(id, "balances-updated", || {
                let mut updated = 0;
                for pattern in [r"(?m)^chen,\s*12\b", r"(?m)^garcia,\s*8\b"] {
                    if file_matches(ctx, "Documents/HR/leave-balances.csv", pattern)? {
                        updated += 1;
                    }
                }
                Ok(Credit::Partial(updated))
            }),
        ));

        result.add(Checkpoint::from_bool(
            1,
            graded_bool(id, "confirmation-dm-sent", || {
                dm_contains(ctx, "chen", "leave balance")
            }),
        ));

        result
    }
}

/// Open a hiring issue for a new role and announce the posting.
pub struct JobPosting;

impl Task for JobPosting {
    fn id(&self) -> &'static str {
        "hr-job-posting"
    }

    fn category(&self) -> Category {
        Category::Hr
    }

    fn description(&self) -> &'static str {
        "Create the Data Analyst posting in the Hiring project and announce it"
    }

    fn grade_checkpoints(&self, ctx: &EvalContext, _trajectory_log: &str) -> TaskResult {
        let id = self.id();
        let mut result = TaskResult::new();

        // Locate the posting once; the second checkpoint judges its body.
        // Gating on the first lookup avoids a redundant tracker round-trip,
        // not a formal dependency.
        let posting = graded(id, "posting-created", || {
            let Some(project_id) = tracker_project_id(ctx, "Hiring")? else {
                return Ok(Credit::None);
            };
            let issues = ctx.tracker.issues(&project_id)?;
            let found = issues
                .iter()
                .any(|issue| value_str(issue, "name").is_some_and(|n| n.contains("Data Analyst")));
            Ok(Credit::from_bool(found))
        });
        result.add(Checkpoint::new(1, posting));

        result.add(Checkpoint::from_bool(
            1,
            graded_bool(id, "posting-body-complete", || {
                if posting != Credit::Full {
                    return Ok(false);
                }
                let Some(project_id) = tracker_project_id(ctx, "Hiring")? else {
                    return Ok(false);
                };
                let issues = ctx.tracker.issues(&project_id)?;
                let description = issues
                    .iter()
                    .find(|issue| {
                        value_str(issue, "name").is_some_and(|n| n.contains("Data Analyst"))
                    })
                    .and_then(|issue| value_str(issue, "description"))
                    .unwrap_or_default()
                    .to_string();
                ctx.judge.verdict(
                    &description,
                    "lists the role's responsibilities and required qualifications",
                )
            }),
        ));

        result.add(Checkpoint::from_bool(
            1,
            graded_bool(id, "posting-announced", || {
                channel_contains(ctx, "hiring", &["data analyst"])
            }),
        ));

        result
    }
}

/// Remind every employee to fill in the engagement survey.
pub struct SurveyReminder;

const SURVEY_EMPLOYEES: [&str; 3] = ["chen", "garcia", "patel"];

impl Task for SurveyReminder {
    fn id(&self) -> &'static str {
        "hr-survey-reminder"
    }

    fn category(&self) -> Category {
        Category::Hr
    }

    fn description(&self) -> &'static str {
        "DM every employee a reminder to complete the engagement survey"
    }

    fn grade_checkpoints(&self, ctx: &EvalContext, _trajectory_log: &str) -> TaskResult {
        let id = self.id();
        let mut result = TaskResult::with_bonus(BonusRule::ForAnyCheckpoint { bonus: 1 });

        result.add(Checkpoint::new(
            3,
            graded(id, "reminders-sent", || {
                let mut reminded = 0;
                for employee in SURVEY_EMPLOYEES {
                    if dm_contains(ctx, employee, "survey")? {
                        reminded += 1;
                    }
                }
                Ok(Credit::Partial(reminded))
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

    #[test]
    fn test_leave_balance_partial_update() {
        let mut ctx = empty_context();
        ctx.files = Box::new(MockFileStore::default().with_file(
            "Documents/HR/leave-balances.csv",
            "name,days\nchen, 12\ngarcia, 9\n",
        ));
        ctx.chat = Box::new(
            MockChat::default().with_dm("chen", vec![msg("hr", "Your leave balance is now 12")]),
        );

        // garcia's row was not updated: one of two sheet points.
        let score = LeaveBalanceUpdate.grade_checkpoints(&ctx, "").compute();
        assert_eq!(score.total, 3);
        assert_eq!(score.result, 2);
    }

    #[test]
    fn test_job_posting_full_credit() {
        let mut ctx = empty_context();
        ctx.tracker = Box::new(
            MockTracker::default()
                .with_project(json!({"id": "p-hiring", "name": "Hiring"}))
                .with_issues(
                    "p-hiring",
                    vec![json!({
                        "name": "Hire Data Analyst",
                        "description": "Responsibilities: dashboards. Qualifications: SQL.",
                    })],
                ),
        );
        ctx.judge = Box::new(MockJudge::default().yes_when("Responsibilities"));
        ctx.chat = Box::new(MockChat::default().with_channel(
            "hiring",
            vec![msg("hr", "We are hiring a Data Analyst, see the posting")],
        ));

        let score = JobPosting.grade_checkpoints(&ctx, "").compute();
        assert_eq!(score.total, 3);
        assert_eq!(score.result, 3);
    }

    #[test]
    fn test_job_posting_missing_project_scores_zero_without_error() {
        let ctx = empty_context();
        let score = JobPosting.grade_checkpoints(&ctx, "").compute();
        assert_eq!(score.result, 0);
    }

    #[test]
    fn test_survey_reminder_partial_with_bonus() {
        let mut ctx = empty_context();
        ctx.chat = Box::new(
            MockChat::default()
                .with_dm("chen", vec![msg("hr", "Please complete the survey")])
                .with_dm("garcia", vec![msg("hr", "unrelated note")]),
        );

        // Two of three reminders missing: partial credit, no completion
        // bonus because the single checkpoint is not at full credit.
        let score = SurveyReminder.grade_checkpoints(&ctx, "").compute();
        assert_eq!(score.total, 3);
        assert_eq!(score.result, 1);
    }

    #[test]
    fn test_survey_reminder_all_sent_earns_bonus() {
        let mut ctx = empty_context();
        let reminder = vec![msg("hr", "Reminder: engagement survey closes Friday")];
        ctx.chat = Box::new(
            MockChat::default()
                .with_dm("chen", reminder.clone())
                .with_dm("garcia", reminder.clone())
                .with_dm("patel", reminder),
        );

        let score = SurveyReminder.grade_checkpoints(&ctx, "").compute();
        assert_eq!(score.total, 3);
        assert_eq!(score.result, 4);
    }

    #[test]
    fn test_onboarding_checklist_outage_scores_zero() {
        let ctx = outage_context();
        let score = OnboardingChecklist.grade_checkpoints(&ctx, "").compute();
        assert_eq!(score.total, 3);
        assert_eq!(score.result, 0);
    }
}
