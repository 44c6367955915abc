use crate::{
    driver::DriverConfig,
    keywords::{CheckpointPolicy, DEFAULT_PROGRESS_FILE},
};
use std::{path::PathBuf, time::Duration};

/// Paths and driver settings for one filter run.
#[derive(Debug, Clone)]
pub struct FilterConfig {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub progress_path: PathBuf,
    /// Remove the progress file before the run instead of resuming.
    pub fresh: bool,
    pub driver: DriverConfig,
}

impl FilterConfig {
    pub fn new<I: Into<PathBuf>, O: Into<PathBuf>>(input_path: I, output_path: O) -> Self {
        Self {
            input_path: input_path.into(),
            output_path: output_path.into(),
            progress_path: PathBuf::from(DEFAULT_PROGRESS_FILE),
            fresh: false,
            driver: DriverConfig::default(),
        }
    }

    pub fn progress_path<P: Into<PathBuf>>(mut self, progress_path: P) -> Self {
        self.progress_path = progress_path.into();
        self
    }

    pub fn fresh(mut self, fresh: bool) -> Self {
        self.fresh = fresh;
        self
    }

    pub fn batch_size(mut self, batch_size: usize) -> Self {
        self.driver = self.driver.batch_size(batch_size);
        self
    }

    pub fn pause(mut self, pause: Duration) -> Self {
        self.driver = self.driver.pause(pause);
        self
    }

    pub fn checkpoint_policy(mut self, checkpoint_policy: CheckpointPolicy) -> Self {
        self.driver = self.driver.checkpoint_policy(checkpoint_policy);
        self
    }
}
