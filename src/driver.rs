use crate::{
    classify::{parse_classification, KeywordClassifier},
    keywords::{windows, CheckpointPolicy, ProgressCheckpoint, DEFAULT_BATCH_SIZE},
};
use std::time::Duration;

pub const DEFAULT_PAUSE: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverState {
    Idle,
    Running,
    Completed,
    Aborted,
}

#[derive(Debug, Clone)]
pub struct DriverConfig {
    pub batch_size: usize,
    /// Fixed wait between windows.
    pub pause: Duration,
    pub checkpoint_policy: CheckpointPolicy,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            pause: DEFAULT_PAUSE,
            checkpoint_policy: CheckpointPolicy::default(),
        }
    }
}

impl DriverConfig {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    pub fn pause(mut self, pause: Duration) -> Self {
        self.pause = pause;
        self
    }

    pub fn checkpoint_policy(mut self, checkpoint_policy: CheckpointPolicy) -> Self {
        self.checkpoint_policy = checkpoint_policy;
        self
    }
}

/// What a run produced. `accepted` is returned whether the run completed or aborted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterReport {
    pub accepted: Vec<String>,
    pub state: DriverState,
    pub batches_completed: usize,
    /// The last index written to the checkpoint, or the start index if none was written.
    pub next_index: usize,
}

impl FilterReport {
    pub fn is_aborted(&self) -> bool {
        self.state == DriverState::Aborted
    }
}

pub struct BatchDriver<'a, C> {
    classifier: &'a C,
    checkpoint: &'a ProgressCheckpoint,
    config: DriverConfig,
    state: DriverState,
}

impl<'a, C: KeywordClassifier> BatchDriver<'a, C> {
    pub fn new(
        classifier: &'a C,
        checkpoint: &'a ProgressCheckpoint,
        config: DriverConfig,
    ) -> Self {
        Self {
            classifier,
            checkpoint,
            config,
            state: DriverState::Idle,
        }
    }

    pub fn state(&self) -> DriverState {
        self.state
    }

    /// Classifies `keywords[start..]` window by window, stopping at the first failure.
    pub async fn run(&mut self, keywords: &[String], start: usize) -> FilterReport {
        self.state = DriverState::Running;
        let mut accepted = Vec::new();
        let mut batches_completed = 0;
        let mut next_index = start;
        let batch_size = self.config.batch_size.max(1);

        let mut ranges = windows(keywords.len(), start, batch_size).peekable();
        while let Some(range) = ranges.next() {
            let batch = &keywords[range.clone()];
            crate::info!(
                "Processing keywords {} - {} of {}",
                range.start + 1,
                range.end,
                keywords.len()
            );

            let reply = match self.classifier.classify(batch).await {
                Ok(reply) => reply,
                Err(e) => {
                    crate::error!("Classification request failed: {}", e);
                    self.state = DriverState::Aborted;
                    break;
                }
            };
            crate::info!("Model reply: {}", reply);

            let classification = parse_classification(&reply);
            crate::debug!(
                "Batch {}..{}: {} related, {} unrelated",
                range.start,
                range.end,
                classification.related.len(),
                classification.unrelated.len()
            );
            accepted.extend(classification.related);

            let index = self
                .config
                .checkpoint_policy
                .next_index(range.start, batch_size, batch.len());
            if let Err(e) = self.checkpoint.save(index) {
                crate::error!("{}", e);
                self.state = DriverState::Aborted;
                break;
            }
            next_index = index;
            batches_completed += 1;

            if ranges.peek().is_some() && !self.config.pause.is_zero() {
                tokio::time::sleep(self.config.pause).await;
            }
        }

        if self.state == DriverState::Running {
            self.state = DriverState::Completed;
        }
        crate::info!(
            "Run {:?} after {} batches with {} accepted keywords",
            self.state,
            batches_completed,
            accepted.len()
        );
        FilterReport {
            accepted,
            state: self.state,
            batches_completed,
            next_index,
        }
    }
}
