use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;
use tracing_subscriber::EnvFilter;

use rubric::config::HarnessConfig;
use rubric::context::EvalContext;
use rubric::report;
use rubric::tasks::{self, Category, Task};

#[derive(Parser)]
#[command(name = "rubric")]
#[command(about = "Partial-credit benchmark harness for business-office agent tasks", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to a config file (default: ./rubric.toml if present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Grade one task and write its score file
    Grade {
        /// Task id (see `rubric list`)
        task: String,

        /// Path to the recorded trajectory log
        #[arg(short, long)]
        trajectory: Option<PathBuf>,

        /// Output file (default: eval_<task>.json)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Grade every registered task, writing one score file per task
    GradeAll {
        /// Only grade tasks in this category
        #[arg(long)]
        category: Option<Category>,

        /// Directory holding per-task trajectory logs, named <task>.log
        #[arg(short, long)]
        trajectory_dir: Option<PathBuf>,

        /// Directory to write score files into
        #[arg(short, long, default_value = "results")]
        output_dir: PathBuf,
    },

    /// List registered tasks
    List {
        /// Only list tasks in this category
        #[arg(long)]
        category: Option<Category>,
    },

    /// Summarize a directory of score files
    Report {
        /// Directory containing eval_*.json files
        #[arg(short, long, default_value = "results")]
        dir: PathBuf,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("rubric=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = HarnessConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Grade {
            task,
            trajectory,
            output,
        } => grade(&config, &task, trajectory.as_deref(), output.as_deref()),
        Commands::GradeAll {
            category,
            trajectory_dir,
            output_dir,
        } => grade_all(&config, category, trajectory_dir.as_deref(), &output_dir),
        Commands::List { category } => {
            list(category);
            Ok(())
        }
        Commands::Report { dir } => {
            let summary = report::scan_dir(&dir)?;
            report::print_summary(&summary);
            Ok(())
        }
    }
}

fn grade(
    config: &HarnessConfig,
    task_id: &str,
    trajectory: Option<&Path>,
    output: Option<&Path>,
) -> Result<()> {
    let Some(task) = tasks::find(task_id) else {
        bail!("Unknown task: {task_id}. Run `rubric list` to see registered tasks.");
    };

    let ctx = EvalContext::connect(config)?;
    let trajectory_log = read_trajectory(trajectory);
    let result = task.grade_checkpoints(&ctx, &trajectory_log);

    let default_output = PathBuf::from(report::result_file_name(task_id));
    let output = output.unwrap_or(&default_output);
    write_score_file(output, &result.to_json())?;

    let score = result.compute();
    println!(
        "{task_id}: {} ({} checkpoints)",
        format!("{}/{}", score.result, score.total).bold(),
        result.checkpoints().len(),
    );
    Ok(())
}

fn grade_all(
    config: &HarnessConfig,
    category: Option<Category>,
    trajectory_dir: Option<&Path>,
    output_dir: &Path,
) -> Result<()> {
    let tasks: Vec<Box<dyn Task>> = match category {
        Some(category) => tasks::by_category(category),
        None => tasks::all(),
    };

    fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create output dir: {}", output_dir.display()))?;

    let ctx = EvalContext::connect(config)?;
    for task in &tasks {
        let trajectory_path = trajectory_dir.map(|dir| dir.join(format!("{}.log", task.id())));
        let trajectory_log = read_trajectory(trajectory_path.as_deref());

        let result = task.grade_checkpoints(&ctx, &trajectory_log);
        let output = output_dir.join(report::result_file_name(task.id()));
        write_score_file(&output, &result.to_json())?;

        let score = result.compute();
        println!("{:<36} {}/{}", task.id(), score.result, score.total);
    }
    Ok(())
}

/// Read the trajectory log, degrading to an empty string when it is
/// missing or unreadable. Trajectory-dependent checkpoints then score zero
/// instead of aborting the run.
fn read_trajectory(path: Option<&Path>) -> String {
    let Some(path) = path else {
        return String::new();
    };
    match fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) => {
            warn!(
                "trajectory {} unreadable, grading without it: {err}",
                path.display()
            );
            String::new()
        }
    }
}

fn write_score_file(path: &Path, doc: &serde_json::Value) -> Result<()> {
    let content = serde_json::to_string_pretty(doc).context("Failed to serialize score")?;
    fs::write(path, content)
        .with_context(|| format!("Failed to write score file: {}", path.display()))
}

fn list(category: Option<Category>) {
    let tasks: Vec<Box<dyn Task>> = match category {
        Some(category) => tasks::by_category(category),
        None => tasks::all(),
    };

    println!("{}", "Registered tasks".bold());
    for task in tasks {
        println!(
            "  {:<36} {:<8} {}",
            task.id(),
            task.category().to_string(),
            task.description()
        );
    }
}
