use clap::Parser;
use llm_keyword_filter::{
    keywords::DEFAULT_PROGRESS_FILE,
    llms::api::deepseek::{DEEPSEEK_API_BASE, DEEPSEEK_API_KEY_ENV_VAR, DEEPSEEK_REASONER},
    CheckpointPolicy,
    DeepSeekBackend,
    DeepSeekConfig,
    FilterConfig,
    KeywordFilter,
    LlmApiConfigTrait,
    LoggingConfig,
    LoggingConfigTrait,
};
use std::{num::NonZeroUsize, path::PathBuf, time::Duration};

/// Keep the keywords an LLM judges related to computational linguistics.
#[derive(Parser, Debug)]
#[command(name = "keyword_filter", version, about)]
struct Cli {
    /// Keyword file, one keyword per line
    #[arg(short, long, env = "KEYWORD_FILTER_INPUT")]
    input: PathBuf,

    /// Where the accepted keywords are written, one per line
    #[arg(short, long, env = "KEYWORD_FILTER_OUTPUT")]
    output: PathBuf,

    /// Progress file holding the next unprocessed index
    #[arg(long, default_value = DEFAULT_PROGRESS_FILE)]
    progress: PathBuf,

    /// Delete the progress file and start from the first keyword
    #[arg(long)]
    fresh: bool,

    #[arg(long, default_value = "20")]
    batch_size: NonZeroUsize,

    /// Pause between batches in milliseconds
    #[arg(long, default_value_t = 500)]
    pause_ms: u64,

    #[arg(long, value_enum, default_value_t = CheckpointPolicy::WindowStride)]
    checkpoint_policy: CheckpointPolicy,

    #[arg(long, default_value = DEEPSEEK_REASONER)]
    model: String,

    #[arg(long, default_value = DEEPSEEK_API_BASE)]
    api_base: String,

    /// Environment variable holding the bearer token
    #[arg(long, default_value = DEEPSEEK_API_KEY_ENV_VAR)]
    api_key_env_var: String,

    /// Also write hourly rolling log files to this directory
    #[arg(long)]
    log_dir: Option<PathBuf>,

    #[arg(long, default_value_t = tracing::Level::INFO)]
    log_level: tracing::Level,
}

impl Cli {
    fn logging_config(&self) -> LoggingConfig {
        let config = LoggingConfig::new().log_level(self.log_level);
        match &self.log_dir {
            Some(dir) => config.log_dir(dir),
            None => config,
        }
    }

    fn deepseek_config(&self) -> DeepSeekConfig {
        DeepSeekConfig::new()
            .with_model(&self.model)
            .with_api_base(&self.api_base)
            .with_api_key_env_var(&self.api_key_env_var)
    }

    fn filter_config(&self) -> FilterConfig {
        FilterConfig::new(&self.input, &self.output)
            .progress_path(&self.progress)
            .fresh(self.fresh)
            .batch_size(self.batch_size.get())
            .pause(Duration::from_millis(self.pause_ms))
            .checkpoint_policy(self.checkpoint_policy)
    }
}

// The logger guard is thread local, so everything runs on the main thread.
#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut logging_config = cli.logging_config();
    logging_config.load_logger()?;

    let backend = DeepSeekBackend::new(cli.deepseek_config())
        .inspect_err(|e| tracing::error!("{}", e))?;

    let report = KeywordFilter::new(cli.filter_config())
        .run(&backend)
        .await
        .inspect_err(|e| tracing::error!("{:#}", e))?;

    if report.is_aborted() {
        tracing::warn!(
            "Run aborted; {} keywords written, resume from index {}",
            report.accepted.len(),
            report.next_index
        );
    }
    Ok(())
}
