use std::path::{Path, PathBuf};

pub const DEFAULT_PROGRESS_FILE: &str = "progress.txt";

/// How far the checkpoint advances after a successful batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum CheckpointPolicy {
    /// `start + batch_size`. A short final batch moves the checkpoint past the
    /// end of the keyword list, which later runs read as "done".
    #[default]
    WindowStride,
    /// `start + batch.len()`. The checkpoint never exceeds the keyword count.
    Consumed,
}

impl CheckpointPolicy {
    pub fn next_index(self, start: usize, batch_size: usize, batch_len: usize) -> usize {
        match self {
            CheckpointPolicy::WindowStride => start.saturating_add(batch_size),
            CheckpointPolicy::Consumed => start.saturating_add(batch_len),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CheckpointError {
    #[error("failed to access progress file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("progress file {path} does not hold an index: {content:?}")]
    Parse {
        path: PathBuf,
        content: String,
        source: std::num::ParseIntError,
    },
}

/// The index of the first unprocessed keyword, persisted as a decimal string.
///
/// The stored index is not checked against the keyword file it was written for.
#[derive(Debug, Clone)]
pub struct ProgressCheckpoint {
    path: PathBuf,
}

impl Default for ProgressCheckpoint {
    fn default() -> Self {
        Self::new(DEFAULT_PROGRESS_FILE)
    }
}

impl ProgressCheckpoint {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Zero when there is no progress file.
    pub fn load(&self) -> Result<usize, CheckpointError> {
        if !self.path.exists() {
            return Ok(0);
        }
        let content = std::fs::read_to_string(&self.path).map_err(|source| CheckpointError::Io {
            path: self.path.clone(),
            source,
        })?;
        let index = content
            .trim()
            .parse::<usize>()
            .map_err(|source| CheckpointError::Parse {
                path: self.path.clone(),
                content: content.clone(),
                source,
            })?;
        crate::info!("Resuming from index {}", index);
        Ok(index)
    }

    pub fn save(&self, index: usize) -> Result<(), CheckpointError> {
        std::fs::write(&self.path, index.to_string()).map_err(|source| CheckpointError::Io {
            path: self.path.clone(),
            source,
        })?;
        crate::info!("Progress saved, next index: {}", index);
        Ok(())
    }

    /// Removes the progress file so the next run starts at zero.
    pub fn clear(&self) -> Result<(), CheckpointError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => {
                crate::info!("Cleared progress file {}", self.path.display());
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(CheckpointError::Io {
                path: self.path.clone(),
                source,
            }),
        }
    }
}
