use std::ops::Range;

pub const DEFAULT_BATCH_SIZE: usize = 20;

/// Contiguous, non-overlapping index ranges of at most `batch_size` covering
/// `start..len`. The last range may be shorter. Nothing is yielded when
/// `start >= len`.
pub fn windows(len: usize, start: usize, batch_size: usize) -> impl Iterator<Item = Range<usize>> {
    let batch_size = batch_size.max(1);
    (start..len)
        .step_by(batch_size)
        .map(move |i| i..i.saturating_add(batch_size).min(len))
}
