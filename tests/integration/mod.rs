//! Integration tests over the public harness API: scoring documents,
//! score-file aggregation, configuration loading, and the task registry.

use std::fs;

use rubric::config::HarnessConfig;
use rubric::report;
use rubric::scoring::{BonusRule, Checkpoint, Credit, IncompletePolicy, TaskResult};
use rubric::tasks::{self, Category};

#[test]
fn score_document_survives_disk_round_trip() {
    let mut result = TaskResult::with_bonus(BonusRule::ForAnyCheckpoint { bonus: 1 });
    result.add(Checkpoint::from_bool(1, true));
    result.add(Checkpoint::new(3, Credit::Partial(2)));
    result.add(Checkpoint::from_bool(2, false));
    let score = result.compute();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(report::result_file_name("demo-task"));
    fs::write(&path, serde_json::to_string_pretty(&result.to_json()).unwrap()).unwrap();

    let summary = report::scan_dir(dir.path()).unwrap();
    assert_eq!(summary.entries.len(), 1);
    assert_eq!(summary.entries[0].task_id, "demo-task");
    assert_eq!(summary.entries[0].total, score.total);
    assert_eq!(summary.entries[0].result, score.result);
}

#[test]
fn aggregation_tolerates_one_bad_file_per_batch() {
    let dir = tempfile::tempdir().unwrap();

    let mut good = TaskResult::new();
    good.add(Checkpoint::from_bool(2, true));
    fs::write(
        dir.path().join(report::result_file_name("good-task")),
        good.to_json().to_string(),
    )
    .unwrap();
    fs::write(dir.path().join("eval_bad.json"), "{\"final_score\": []}").unwrap();

    let summary = report::scan_dir(dir.path()).unwrap();
    assert_eq!(summary.entries.len(), 1);
    assert_eq!(summary.skipped, 1);
    assert_eq!(summary.result(), 2);
}

#[test]
fn zero_total_reports_zero_final_score() {
    let result = TaskResult::new();
    let doc = result.to_json();
    assert_eq!(doc["final_score"]["total"], 0);
    assert_eq!(doc["final_score"]["result"], 0);
    assert_eq!(result.compute().ratio(), 0.0);
}

#[test]
fn strict_final_checkpoint_policy_zeroes_on_disk_too() {
    let mut result = TaskResult::with_bonus(BonusRule::ForFinalCheckpoint {
        on_incomplete: IncompletePolicy::ZeroOut,
    });
    result.add(Checkpoint::from_bool(1, true));
    result.add(Checkpoint::from_bool(1, false));

    let doc = result.to_json();
    // Per-checkpoint entries keep their raw credit for inspection; only the
    // aggregate is zeroed.
    assert_eq!(doc["checkpoints"][0]["result"], 1);
    assert_eq!(doc["final_score"]["result"], 0);
}

#[test]
fn config_loads_from_explicit_toml() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("rubric.toml");
    fs::write(
        &path,
        r#"
        [tracker]
        url = "http://tracker.internal:8091"
        api_key = "plane-key"
        workspace = "acme"

        [judge]
        model = "gpt-4o-mini"
        "#,
    )
    .unwrap();

    let config = HarnessConfig::load(Some(&path)).unwrap();
    assert_eq!(config.tracker.url, "http://tracker.internal:8091");
    assert_eq!(config.tracker.workspace, "acme");
    assert_eq!(config.judge.model, "gpt-4o-mini");
}

#[test]
fn registry_exposes_tasks_for_every_category() {
    assert_eq!(tasks::all().len(), 20);
    for task in tasks::all() {
        assert!(!task.description().is_empty(), "task {}", task.id());
    }
    assert!(!tasks::by_category(Category::Finance).is_empty());
    assert_eq!(
        tasks::find("pm-sprint-rollover").unwrap().category(),
        Category::ProjectManagement
    );
}
