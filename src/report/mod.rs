//! Batch aggregation over a directory of per-task score files.
//!
//! Each `eval_<task-id>.json` file is the serialized output of one
//! evaluation run; the summary reads the nested `final_score` object.
//! Unreadable or malformed entries are skipped with a warning, never
//! aborting the whole batch.

use anyhow::{Context, Result};
use colored::Colorize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::warn;

use crate::tasks::{self, Category};

const FILE_PREFIX: &str = "eval_";
const FILE_SUFFIX: &str = ".json";

/// Name of the score file for a task.
pub fn result_file_name(task_id: &str) -> String {
    format!("{FILE_PREFIX}{task_id}{FILE_SUFFIX}")
}

/// One parsed score file.
#[derive(Debug, Clone)]
pub struct TaskReport {
    pub task_id: String,
    /// Category from the registry; `None` for score files of unknown tasks.
    pub category: Option<Category>,
    pub total: u32,
    pub result: u32,
}

impl TaskReport {
    pub fn is_perfect(&self) -> bool {
        self.total > 0 && self.result == self.total
    }
}

/// Aggregated scores for one results directory.
#[derive(Debug, Default)]
pub struct Summary {
    pub entries: Vec<TaskReport>,
    /// Files that looked like score files but could not be parsed.
    pub skipped: usize,
}

impl Summary {
    pub fn total(&self) -> u32 {
        self.entries.iter().map(|e| e.total).sum()
    }

    pub fn result(&self) -> u32 {
        self.entries.iter().map(|e| e.result).sum()
    }

    pub fn ratio(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            0.0
        } else {
            f64::from(self.result()) / f64::from(total)
        }
    }

    pub fn perfect_count(&self) -> usize {
        self.entries.iter().filter(|e| e.is_perfect()).count()
    }

    /// (result, total) per category, in display order.
    pub fn by_category(&self) -> BTreeMap<String, (u32, u32)> {
        let mut categories = BTreeMap::new();
        for entry in &self.entries {
            let key = entry
                .category
                .map(|c| c.to_string())
                .unwrap_or_else(|| "unknown".to_string());
            let slot = categories.entry(key).or_insert((0, 0));
            slot.0 += entry.result;
            slot.1 += entry.total;
        }
        categories
    }
}

/// Scan a directory for `eval_*.json` files and aggregate them.
pub fn scan_dir(dir: &Path) -> Result<Summary> {
    let mut summary = Summary::default();

    let entries = fs::read_dir(dir)
        .with_context(|| format!("Failed to read results directory: {}", dir.display()))?;

    for entry in entries {
        let path = entry?.path();
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if !name.starts_with(FILE_PREFIX) || !name.ends_with(FILE_SUFFIX) {
            continue;
        }
        let task_id = name[FILE_PREFIX.len()..name.len() - FILE_SUFFIX.len()].to_string();

        match parse_score_file(&path) {
            Ok((total, result)) => {
                let category = tasks::find(&task_id).map(|task| task.category());
                summary.entries.push(TaskReport {
                    task_id,
                    category,
                    total,
                    result,
                });
            }
            Err(err) => {
                warn!("skipping unreadable score file {}: {err:#}", path.display());
                summary.skipped += 1;
            }
        }
    }

    summary.entries.sort_by(|a, b| a.task_id.cmp(&b.task_id));
    Ok(summary)
}

fn parse_score_file(path: &Path) -> Result<(u32, u32)> {
    let content = fs::read_to_string(path).context("read failed")?;
    let doc: Value = serde_json::from_str(&content).context("not valid JSON")?;
    let total = read_u32(&doc, "/final_score/total")?;
    let result = read_u32(&doc, "/final_score/result")?;
    Ok((total, result))
}

fn read_u32(doc: &Value, pointer: &str) -> Result<u32> {
    doc.pointer(pointer)
        .and_then(Value::as_u64)
        .and_then(|v| u32::try_from(v).ok())
        .with_context(|| format!("missing or invalid {pointer}"))
}

/// Print the summary table and per-category statistics.
pub fn print_summary(summary: &Summary) {
    println!("{}", "Evaluation Summary".bold().blue());
    println!("{}", "=".repeat(50));

    for entry in &summary.entries {
        let score = format!("{}/{}", entry.result, entry.total);
        let score = if entry.is_perfect() {
            score.green()
        } else if entry.result > 0 {
            score.yellow()
        } else {
            score.red()
        };
        println!("  {:<36} {score}", entry.task_id);
    }

    if !summary.entries.is_empty() {
        println!("\n{}", "By category".bold());
        for (category, (result, total)) in summary.by_category() {
            println!("  {category:<12} {result}/{total}");
        }
    }

    println!(
        "\n{} {}/{} points ({:.1}%), {} of {} tasks at full credit",
        "Overall:".bold(),
        summary.result(),
        summary.total(),
        summary.ratio() * 100.0,
        summary.perfect_count(),
        summary.entries.len(),
    );

    if summary.skipped > 0 {
        println!(
            "{}",
            format!("Skipped {} unreadable score file(s)", summary.skipped).yellow()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_score(dir: &Path, task_id: &str, total: u32, result: u32) {
        let doc = serde_json::json!({
            "checkpoints": [],
            "total": total,
            "result": result,
            "final_score": { "total": total, "result": result },
        });
        fs::write(dir.join(result_file_name(task_id)), doc.to_string()).unwrap();
    }

    #[test]
    fn test_scan_aggregates_and_sorts() {
        let dir = tempfile::tempdir().unwrap();
        write_score(dir.path(), "swe-fix-ci", 4, 4);
        write_score(dir.path(), "admin-office-inventory", 5, 2);

        let summary = scan_dir(dir.path()).unwrap();
        assert_eq!(summary.entries.len(), 2);
        assert_eq!(summary.entries[0].task_id, "admin-office-inventory");
        assert_eq!(summary.total(), 9);
        assert_eq!(summary.result(), 6);
        assert_eq!(summary.perfect_count(), 1);
    }

    #[test]
    fn test_scan_skips_malformed_files() {
        let dir = tempfile::tempdir().unwrap();
        write_score(dir.path(), "hr-job-posting", 3, 3);
        fs::write(dir.path().join("eval_broken.json"), "{not json").unwrap();
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let summary = scan_dir(dir.path()).unwrap();
        assert_eq!(summary.entries.len(), 1);
        assert_eq!(summary.skipped, 1);
    }

    #[test]
    fn test_categories_resolved_from_registry() {
        let dir = tempfile::tempdir().unwrap();
        write_score(dir.path(), "hr-job-posting", 3, 1);
        write_score(dir.path(), "some-retired-task", 2, 2);

        let summary = scan_dir(dir.path()).unwrap();
        let categories = summary.by_category();
        assert_eq!(categories.get("hr"), Some(&(1, 3)));
        assert_eq!(categories.get("unknown"), Some(&(2, 2)));
    }

    #[test]
    fn test_empty_directory_ratio_is_zero() {
        let dir = tempfile::tempdir().unwrap();
        let summary = scan_dir(dir.path()).unwrap();
        assert_eq!(summary.ratio(), 0.0);
    }
}
