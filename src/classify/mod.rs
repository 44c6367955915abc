//! Relevance classification of keyword batches.
//!
//! [`KeywordClassifier`] is the seam between the batch driver and the remote
//! model. The parser turns a model's free-text reply into keyword sets and is a
//! pure function, so prompt or format changes only touch [`parser`].

pub mod parser;
pub mod prompt;

use crate::llms::api::ClientError;

pub use parser::{parse_classification, parse_related_keywords, KeywordClassification};

/// Sends one batch of keywords to a model and returns the raw reply text.
#[allow(async_fn_in_trait)]
pub trait KeywordClassifier {
    async fn classify(&self, batch: &[String]) -> Result<String, ClassifyError>;
}

#[derive(Debug, thiserror::Error)]
pub enum ClassifyError {
    #[error("ClientError: {0}")]
    ClientError(#[from] ClientError),
    #[error("NoChoices: Response had no choices")]
    NoChoices,
    #[error("ResponseContentEmpty: Response had no content")]
    ResponseContentEmpty,
}
