//! # llm_keyword_filter: Domain relevance filtering of keyword lists with an LLM
//!
//! Keywords are read one per line, sent in fixed-size batches to an
//! OpenAI-compatible chat completion endpoint with a computational linguistics
//! rubric, and the keywords the model reports as related are written out one
//! per line. Progress is checkpointed after every batch so an interrupted run
//! resumes where it stopped.
//!
//! ```no_run
//! use llm_keyword_filter::{DeepSeekBackend, DeepSeekConfig, FilterConfig, KeywordFilter};
//!
//! # async fn run() -> anyhow::Result<()> {
//! let backend = DeepSeekBackend::new(DeepSeekConfig::new())?;
//! let filter = KeywordFilter::new(FilterConfig::new("keywords.txt", "filtered.txt"));
//! let report = filter.run(&backend).await?;
//! println!("{} keywords accepted", report.accepted.len());
//! # Ok(())
//! # }
//! ```

// Public modules
pub mod classify;
pub mod config;
pub mod driver;
pub mod keywords;
pub mod llms;
pub mod logging;

// Internal imports
#[allow(unused_imports)]
pub(crate) use anyhow::{anyhow, bail, Error, Result};
#[allow(unused_imports)]
pub(crate) use tracing::{debug, error, info, span, trace, warn, Level};

// Public exports
pub use classify::{
    parse_classification, parse_related_keywords, ClassifyError, KeywordClassification,
    KeywordClassifier,
};
pub use config::FilterConfig;
pub use driver::{BatchDriver, DriverConfig, DriverState, FilterReport};
pub use keywords::{line_store, CheckpointPolicy, ProgressCheckpoint};
pub use llms::api::{
    deepseek::{DeepSeekBackend, DeepSeekConfig},
    ClientError, LlmApiConfigTrait,
};
pub use logging::{LoggingConfig, LoggingConfigTrait};

/// Runs the whole pipeline: load keywords, resume, classify, write the accepted set.
pub struct KeywordFilter {
    pub config: FilterConfig,
}

impl KeywordFilter {
    pub fn new(config: FilterConfig) -> Self {
        Self { config }
    }

    /// A missing or empty input file ends the run without touching the output
    /// file. A corrupt progress file is an error. A failed request ends the
    /// loop early; whatever was accepted before it is still written.
    pub async fn run<C: KeywordClassifier>(&self, classifier: &C) -> Result<FilterReport> {
        info!("Keyword filter starting");
        let keywords = line_store::load(&self.config.input_path);
        if keywords.is_empty() {
            warn!("No keywords to filter");
            return Ok(FilterReport {
                accepted: Vec::new(),
                state: DriverState::Idle,
                batches_completed: 0,
                next_index: 0,
            });
        }

        let checkpoint = ProgressCheckpoint::new(&self.config.progress_path);
        if self.config.fresh {
            checkpoint.clear()?;
        }
        let start = checkpoint.load()?;

        let mut driver = BatchDriver::new(classifier, &checkpoint, self.config.driver.clone());
        let report = driver.run(&keywords, start).await;

        // Already logged; the report is returned either way.
        let _ = line_store::save(&self.config.output_path, &report.accepted);
        info!("Keyword filter finished");
        Ok(report)
    }
}
