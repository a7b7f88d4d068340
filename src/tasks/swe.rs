//! Software-engineering task evaluators.

use crate::context::EvalContext;
use crate::scoring::{graded, graded_bool, Checkpoint, Credit, TaskResult};
use crate::tasks::{channel_contains, dm_contains, value_str, Category, Task};
use crate::trajectory;

const INTRANET: &str = "office/intranet";

/// Repair the broken CI pipeline on the intranet project.
pub struct FixCiPipeline;

impl Task for FixCiPipeline {
    fn id(&self) -> &'static str {
        "swe-fix-ci"
    }

    fn category(&self) -> Category {
        Category::SoftwareEngineering
    }

    fn description(&self) -> &'static str {
        "Fix the intranet CI pipeline on main and close the breakage issue"
    }

    fn grade_checkpoints(&self, ctx: &EvalContext, trajectory_log: &str) -> TaskResult {
        let id = self.id();
        let mut result = TaskResult::new();

        result.add(Checkpoint::from_bool(
            1,
            trajectory::contains(trajectory_log, ".gitlab-ci.yml"),
        ));

        result.add(Checkpoint::from_bool(
            2,
            graded_bool(id, "main-pipeline-green", || {
                let pipelines = ctx.forge.pipelines(INTRANET, Some("main"))?;
                // Pipelines are newest-first; only the latest run counts.
                Ok(pipelines
                    .first()
                    .and_then(|p| value_str(p, "status"))
                    == Some("success"))
            }),
        ));

        result.add(Checkpoint::from_bool(
            1,
            graded_bool(id, "breakage-issue-closed", || {
                let issues = ctx.forge.issues(INTRANET)?;
                Ok(issues.iter().any(|issue| {
                    value_str(issue, "title").is_some_and(|t| t.contains("CI"))
                        && value_str(issue, "state") == Some("closed")
                }))
            }),
        ));

        result
    }
}

/// Label the untriaged bug reports.
pub struct IssueTriage;

const TRIAGE_ISSUES: [&str; 3] = ["Login page 500", "Broken avatar upload", "Slow dashboard"];

impl Task for IssueTriage {
    fn id(&self) -> &'static str {
        "swe-issue-triage"
    }

    fn category(&self) -> Category {
        Category::SoftwareEngineering
    }

    fn description(&self) -> &'static str {
        "Label the three untriaged intranet bugs and report in #engineering"
    }

    fn grade_checkpoints(&self, ctx: &EvalContext, _trajectory_log: &str) -> TaskResult {
        let id = self.id();
        let mut result = TaskResult::new();

        result.add(Checkpoint::new(
            3,
            graded(id, "bugs-labeled", || {
                let issues = ctx.forge.issues(INTRANET)?;
                let labeled = TRIAGE_ISSUES
                    .iter()
                    .filter(|title| {
                        issues.iter().any(|issue| {
                            value_str(issue, "title") == Some(**title)
                                && issue
                                    .get("labels")
                                    .and_then(serde_json::Value::as_array)
                                    .is_some_and(|labels| !labels.is_empty())
                        })
                    })
                    .count() as u32;
                Ok(Credit::Partial(labeled))
            }),
        ));

        result.add(Checkpoint::from_bool(
            1,
            graded_bool(id, "triage-reported", || {
                channel_contains(ctx, "engineering", &["triage"])
            }),
        ));

        result
    }
}

/// Write the v1.2 release notes on the wiki and mirror them to file sync.
pub struct ReleaseNotes;

impl Task for ReleaseNotes {
    fn id(&self) -> &'static str {
        "swe-release-notes"
    }

    fn category(&self) -> Category {
        Category::SoftwareEngineering
    }

    fn description(&self) -> &'static str {
        "Publish the v1.2 release notes on the wiki and mirror them to Documents"
    }

    fn grade_checkpoints(&self, ctx: &EvalContext, _trajectory_log: &str) -> TaskResult {
        let id = self.id();
        let mut result = TaskResult::new();

        let page = graded(id, "wiki-page-published", || {
            ctx.forge
                .wiki_page(INTRANET, "Release-Notes-v1.2")
                .map(|_| Credit::Full)
        });
        result.add(Checkpoint::new(1, page));

        result.add(Checkpoint::from_bool(
            1,
            graded_bool(id, "notes-are-complete", || {
                if page != Credit::Full {
                    return Ok(false);
                }
                let content = ctx.forge.wiki_page(INTRANET, "Release-Notes-v1.2")?;
                ctx.judge
                    .verdict(&content, "lists the new features and bug fixes in v1.2")
            }),
        ));

        result.add(Checkpoint::from_bool(
            1,
            graded_bool(id, "notes-mirrored", || {
                ctx.files
                    .exists("Documents/Engineering/release-notes-v1.2.md")
            }),
        ));

        result
    }
}

/// Address the review comments on the open merge request.
pub struct CodeReviewFollowup;

impl Task for CodeReviewFollowup {
    fn id(&self) -> &'static str {
        "swe-review-followup"
    }

    fn category(&self) -> Category {
        Category::SoftwareEngineering
    }

    fn description(&self) -> &'static str {
        "Address the review comments on MR 42 and tell the reviewer"
    }

    fn grade_checkpoints(&self, ctx: &EvalContext, trajectory_log: &str) -> TaskResult {
        let id = self.id();
        let mut result = TaskResult::new();

        result.add(Checkpoint::from_bool(
            1,
            trajectory::contains(trajectory_log, "/merge_requests/42"),
        ));

        result.add(Checkpoint::from_bool(
            1,
            graded_bool(id, "reviewer-notified", || {
                dm_contains(ctx, "garcia", "review")
            }),
        ));

        result.add(Checkpoint::from_bool(
            1,
            graded_bool(id, "followup-issue-closed", || {
                let issues = ctx.forge.issues(INTRANET)?;
                Ok(issues.iter().any(|issue| {
                    value_str(issue, "title").is_some_and(|t| t.contains("review comments"))
                        && value_str(issue, "state") == Some("closed")
                }))
            }),
        ));

        result
    }
}
