//! Project-management task evaluators.

use crate::context::EvalContext;
use crate::scoring::{
    graded, graded_bool, BonusRule, Checkpoint, Credit, IncompletePolicy, TaskResult,
};
use crate::tasks::{channel_contains, tracker_project_id, value_str, Category, Task};
use crate::trajectory;

/// Roll unfinished work from the ended sprint into the next one.
pub struct SprintRollover;

impl Task for SprintRollover {
    fn id(&self) -> &'static str {
        "pm-sprint-rollover"
    }

    fn category(&self) -> Category {
        Category::ProjectManagement
    }

    fn description(&self) -> &'static str {
        "Move Apollo's unfinished issues into the Sprint 24 cycle"
    }

    fn grade_checkpoints(&self, ctx: &EvalContext, _trajectory_log: &str) -> TaskResult {
        let id = self.id();
        let mut result = TaskResult::new();

        // Resolve the project once; later checkpoints reuse the id.
        let project_id = graded(id, "project-lookup", || {
            Ok(Credit::from_bool(
                tracker_project_id(ctx, "Apollo")?.is_some(),
            ))
        });
        result.add(Checkpoint::new(1, project_id));

        result.add(Checkpoint::from_bool(
            1,
            graded_bool(id, "next-cycle-created", || {
                let Some(project_id) = tracker_project_id(ctx, "Apollo")? else {
                    return Ok(false);
                };
                let cycles = ctx.tracker.cycles(&project_id)?;
                Ok(cycles
                    .iter()
                    .any(|cycle| value_str(cycle, "name") == Some("Sprint 24")))
            }),
        ));

        result.add(Checkpoint::from_bool(
            2,
            graded_bool(id, "open-issues-moved", || {
                let Some(project_id) = tracker_project_id(ctx, "Apollo")? else {
                    return Ok(false);
                };
                let issues = ctx.tracker.issues(&project_id)?;
                let open: Vec<_> = issues
                    .iter()
                    .filter(|issue| value_str(issue, "state") != Some("Done"))
                    .collect();
                if open.is_empty() {
                    return Ok(false);
                }
                Ok(open
                    .iter()
                    .all(|issue| value_str(issue, "cycle") == Some("Sprint 24")))
            }),
        ));

        result
    }
}

/// Post the weekly status update for the Apollo project.
pub struct ProjectStatusUpdate;

impl Task for ProjectStatusUpdate {
    fn id(&self) -> &'static str {
        "pm-status-update"
    }

    fn category(&self) -> Category {
        Category::ProjectManagement
    }

    fn description(&self) -> &'static str {
        "Post Apollo's weekly status update in its channel"
    }

    fn grade_checkpoints(&self, ctx: &EvalContext, trajectory_log: &str) -> TaskResult {
        let id = self.id();
        let mut result = TaskResult::new();

        result.add(Checkpoint::from_bool(
            1,
            trajectory::contains(trajectory_log, "/projects/"),
        ));

        result.add(Checkpoint::from_bool(
            1,
            graded_bool(id, "update-posted", || {
                channel_contains(ctx, "apollo", &["status update"])
            }),
        ));

        result.add(Checkpoint::from_bool(
            1,
            graded_bool(id, "update-is-substantive", || {
                let messages = ctx.chat.channel_history("apollo")?;
                let Some(update) = messages
                    .iter()
                    .find(|m| m.text.to_lowercase().contains("status update"))
                else {
                    return Ok(false);
                };
                ctx.judge.verdict(
                    &update.text,
                    "mentions completed work, in-progress work, and blockers",
                )
            }),
        ));

        result
    }
}

/// Close out stale milestones on the intranet project.
pub struct MilestoneCleanup;

const STALE_MILESTONES: [&str; 2] = ["v0.9", "v1.0"];

impl Task for MilestoneCleanup {
    fn id(&self) -> &'static str {
        "pm-milestone-cleanup"
    }

    fn category(&self) -> Category {
        Category::ProjectManagement
    }

    fn description(&self) -> &'static str {
        "Close the shipped milestones on office/intranet and clear v0.9 issues"
    }

    fn grade_checkpoints(&self, ctx: &EvalContext, _trajectory_log: &str) -> TaskResult {
        let id = self.id();
        let mut result = TaskResult::new();

        result.add(Checkpoint::new(
            2,
            graded(id, "milestones-closed", || {
                let milestones = ctx.forge.milestones("office/intranet")?;
                let closed = STALE_MILESTONES
                    .iter()
                    .filter(|title| {
                        milestones.iter().any(|m| {
                            value_str(m, "title") == Some(**title)
                                && value_str(m, "state") == Some("closed")
                        })
                    })
                    .count() as u32;
                Ok(Credit::Partial(closed))
            }),
        ));

        result.add(Checkpoint::from_bool(
            1,
            graded_bool(id, "no-open-issues-on-v0.9", || {
                let issues = ctx.forge.issues("office/intranet")?;
                Ok(!issues.iter().any(|issue| {
                    value_str(issue, "state") == Some("opened")
                        && issue
                            .pointer("/milestone/title")
                            .and_then(serde_json::Value::as_str)
                            == Some("v0.9")
                }))
            }),
        ));

        result
    }
}

/// Post the daily standup summary for the team.
pub struct StandupSummary;

impl Task for StandupSummary {
    fn id(&self) -> &'static str {
        "pm-standup-summary"
    }

    fn category(&self) -> Category {
        Category::ProjectManagement
    }

    fn description(&self) -> &'static str {
        "Summarize today's standup in the #standup channel"
    }

    fn grade_checkpoints(&self, ctx: &EvalContext, _trajectory_log: &str) -> TaskResult {
        let id = self.id();
        let mut result = TaskResult::with_bonus(BonusRule::ForFinalCheckpoint {
            on_incomplete: IncompletePolicy::KeepSum,
        });

        result.add(Checkpoint::from_bool(
            1,
            graded_bool(id, "summary-posted", || {
                channel_contains(ctx, "standup", &["yesterday", "today"])
            }),
        ));

        result.add(Checkpoint::from_bool(
            2,
            graded_bool(id, "summary-covers-team", || {
                let messages = ctx.chat.channel_history("standup")?;
                let joined = messages
                    .iter()
                    .map(|m| m.text.as_str())
                    .collect::<Vec<_>>()
                    .join("\n");
                if joined.is_empty() {
                    return Ok(false);
                }
                ctx.judge
                    .verdict(&joined, "summarizes each team member's update")
            }),
        ));

        result
    }
}
