//! Per-task evaluators.
//!
//! Every task follows the same shape: build a `TaskResult` from a fixed
//! list of checkpoints, where each checkpoint's credit comes from a graded
//! probe against collaborator services, local trajectory evidence, or the
//! LLM judge. The modules here ship a representative evaluator set, four
//! per business category; each file doubles as the template for writing
//! more.

pub mod admin;
pub mod finance;
pub mod hr;
pub mod pm;
pub mod swe;

mod helpers;

pub(crate) use helpers::{
    channel_contains, dm_contains, dm_text, file_matches, tracker_project_id, value_str,
};

use crate::context::EvalContext;
use crate::scoring::TaskResult;

/// Business category a task belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Admin,
    Hr,
    Finance,
    ProjectManagement,
    SoftwareEngineering,
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Category::Admin => write!(f, "admin"),
            Category::Hr => write!(f, "hr"),
            Category::Finance => write!(f, "finance"),
            Category::ProjectManagement => write!(f, "pm"),
            Category::SoftwareEngineering => write!(f, "swe"),
        }
    }
}

impl std::str::FromStr for Category {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "admin" => Ok(Category::Admin),
            "hr" => Ok(Category::Hr),
            "finance" => Ok(Category::Finance),
            "pm" | "project-management" => Ok(Category::ProjectManagement),
            "swe" | "software-engineering" => Ok(Category::SoftwareEngineering),
            _ => anyhow::bail!("Invalid category: {s}. Valid values: admin, hr, finance, pm, swe"),
        }
    }
}

/// One task evaluator.
///
/// `grade_checkpoints` is a single stateless pass: it must always return a
/// result, granting zero credit for anything it cannot verify. All fallible
/// probing belongs inside `graded`/`graded_bool` wrappers.
pub trait Task {
    fn id(&self) -> &'static str;

    fn category(&self) -> Category;

    fn description(&self) -> &'static str;

    fn grade_checkpoints(&self, ctx: &EvalContext, trajectory: &str) -> TaskResult;
}

/// Every shipped evaluator, in registry order.
pub fn all() -> Vec<Box<dyn Task>> {
    vec![
        Box::new(admin::OfficeInventory),
        Box::new(admin::MeetingSchedule),
        Box::new(admin::TravelPolicyQa),
        Box::new(admin::ExpenseReportCollect),
        Box::new(hr::OnboardingChecklist),
        Box::new(hr::LeaveBalanceUpdate),
        Box::new(hr::JobPosting),
        Box::new(hr::SurveyReminder),
        Box::new(finance::InvoiceReconciliation),
        Box::new(finance::BudgetVariance),
        Box::new(finance::QuarterlyStatements),
        Box::new(finance::VendorPaymentFollowup),
        Box::new(pm::SprintRollover),
        Box::new(pm::ProjectStatusUpdate),
        Box::new(pm::MilestoneCleanup),
        Box::new(pm::StandupSummary),
        Box::new(swe::FixCiPipeline),
        Box::new(swe::IssueTriage),
        Box::new(swe::ReleaseNotes),
        Box::new(swe::CodeReviewFollowup),
    ]
}

/// Look up a task by id.
pub fn find(id: &str) -> Option<Box<dyn Task>> {
    all().into_iter().find(|task| task.id() == id)
}

/// All tasks in one category, in registry order.
pub fn by_category(category: Category) -> Vec<Box<dyn Task>> {
    all()
        .into_iter()
        .filter(|task| task.category() == category)
        .collect()
}
