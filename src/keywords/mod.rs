pub mod batch;
pub mod checkpoint;
pub mod line_store;

pub use batch::{windows, DEFAULT_BATCH_SIZE};
pub use checkpoint::{
    CheckpointError, CheckpointPolicy, ProgressCheckpoint, DEFAULT_PROGRESS_FILE,
};
