use super::*;
use llm_keyword_filter::{
    CheckpointPolicy, DriverState, FilterConfig, KeywordFilter, ProgressCheckpoint,
};
use std::time::Duration;

struct Workspace {
    _dir: tempfile::TempDir,
    input: std::path::PathBuf,
    output: std::path::PathBuf,
    progress: std::path::PathBuf,
}

impl Workspace {
    fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        Self {
            input: dir.path().join("keywords.txt"),
            output: dir.path().join("filtered.txt"),
            progress: dir.path().join("progress.txt"),
            _dir: dir,
        }
    }

    fn config(&self) -> FilterConfig {
        FilterConfig::new(&self.input, &self.output)
            .progress_path(&self.progress)
            .pause(Duration::ZERO)
    }

    fn checkpoint(&self) -> usize {
        ProgressCheckpoint::new(&self.progress).load().unwrap()
    }
}

#[tokio::test]
async fn twenty_five_keywords_in_two_batches() {
    let ws = Workspace::new();
    let input = keywords(25);
    write_keywords(&ws.input, &input);

    // Batch 1 reports its first five keywords, batch 2 its last two.
    let classifier =
        ScriptedClassifier::new(vec![Some(vec![0, 1, 2, 3, 4]), Some(vec![3, 4])]);
    let report = KeywordFilter::new(ws.config()).run(&classifier).await.unwrap();

    let expected = vec!["kw0", "kw1", "kw2", "kw3", "kw4", "kw23", "kw24"];
    assert_eq!(report.state, DriverState::Completed);
    assert_eq!(report.accepted, expected);
    assert_eq!(read_lines(&ws.output), expected);
    assert_eq!(ws.checkpoint(), 40);

    let batches = classifier.batches.borrow();
    assert_eq!(batches.len(), 2);
    assert_eq!(batches[0], input[..20]);
    assert_eq!(batches[1], input[20..]);
}

#[tokio::test]
async fn consumed_policy_ends_at_keyword_count() {
    let ws = Workspace::new();
    write_keywords(&ws.input, &keywords(25));

    let classifier = ScriptedClassifier::new(vec![Some(vec![0]), Some(vec![0])]);
    let config = ws.config().checkpoint_policy(CheckpointPolicy::Consumed);
    KeywordFilter::new(config).run(&classifier).await.unwrap();

    assert_eq!(read_lines(&ws.output), vec!["kw0", "kw20"]);
    assert_eq!(ws.checkpoint(), 25);
}

#[tokio::test]
async fn failure_on_second_batch_keeps_first() {
    let ws = Workspace::new();
    write_keywords(&ws.input, &keywords(50));

    let classifier = ScriptedClassifier::new(vec![Some(vec![1, 2]), None, Some(vec![0])]);
    let report = KeywordFilter::new(ws.config()).run(&classifier).await.unwrap();

    assert!(report.is_aborted());
    assert_eq!(read_lines(&ws.output), vec!["kw1", "kw2"]);
    assert_eq!(ws.checkpoint(), 20);
    assert_eq!(classifier.batches.borrow().len(), 2);
}

#[tokio::test]
async fn resume_from_checkpoint() {
    let ws = Workspace::new();
    write_keywords(&ws.input, &keywords(50));
    std::fs::write(&ws.progress, "20").unwrap();

    let classifier = ScriptedClassifier::new(vec![Some(vec![0]), Some(vec![9])]);
    KeywordFilter::new(ws.config()).run(&classifier).await.unwrap();

    assert_eq!(read_lines(&ws.output), vec!["kw20", "kw49"]);
    assert_eq!(ws.checkpoint(), 60);
    assert_eq!(classifier.batches.borrow()[0][0], "kw20");
}

#[tokio::test]
async fn checkpoint_at_end_writes_empty_output() {
    let ws = Workspace::new();
    write_keywords(&ws.input, &keywords(25));
    std::fs::write(&ws.progress, "25").unwrap();
    std::fs::write(&ws.output, "left over\n").unwrap();

    let classifier = ScriptedClassifier::new(vec![]);
    let report = KeywordFilter::new(ws.config()).run(&classifier).await.unwrap();

    assert_eq!(report.state, DriverState::Completed);
    assert_eq!(report.batches_completed, 0);
    assert!(classifier.batches.borrow().is_empty());
    assert_eq!(std::fs::read_to_string(&ws.output).unwrap(), "");
    assert_eq!(ws.checkpoint(), 25);
}

#[tokio::test]
async fn fresh_run_ignores_checkpoint() {
    let ws = Workspace::new();
    write_keywords(&ws.input, &keywords(10));
    std::fs::write(&ws.progress, "40").unwrap();

    let classifier = ScriptedClassifier::new(vec![Some(vec![9])]);
    KeywordFilter::new(ws.config().fresh(true))
        .run(&classifier)
        .await
        .unwrap();

    assert_eq!(read_lines(&ws.output), vec!["kw9"]);
    assert_eq!(ws.checkpoint(), 20);
}

#[tokio::test]
async fn missing_input_writes_nothing() {
    let ws = Workspace::new();
    let classifier = ScriptedClassifier::new(vec![Some(vec![0])]);
    let report = KeywordFilter::new(ws.config()).run(&classifier).await.unwrap();

    assert_eq!(report.state, DriverState::Idle);
    assert!(!ws.output.exists());
    assert!(!ws.progress.exists());
}

#[tokio::test]
async fn corrupt_checkpoint_is_fatal() {
    let ws = Workspace::new();
    write_keywords(&ws.input, &keywords(5));
    std::fs::write(&ws.progress, "twenty").unwrap();

    let classifier = ScriptedClassifier::new(vec![Some(vec![0])]);
    let res = KeywordFilter::new(ws.config()).run(&classifier).await;

    assert!(res.is_err());
    assert!(classifier.batches.borrow().is_empty());
    assert!(!ws.output.exists());
}
