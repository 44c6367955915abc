use colorful::Colorful;
use std::{
    fs::create_dir_all,
    path::{Path, PathBuf},
};
use tracing_subscriber::layer::SubscriberExt;

#[derive(Clone, Debug)]
pub struct LoggingConfig {
    pub level: tracing::Level,
    pub logging_enabled: bool,
    pub logger_name: String,
    /// When set, logs are also written to hourly rolling files in this directory.
    pub log_dir: Option<PathBuf>,
    pub _tracing_guard: Option<std::sync::Arc<tracing::subscriber::DefaultGuard>>,
}

impl LoggingConfig {
    pub fn new() -> Self {
        Default::default()
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: tracing::Level::INFO,
            logging_enabled: true,
            logger_name: "keyword_filter".to_string(),
            log_dir: None,
            _tracing_guard: None,
        }
    }
}

impl LoggingConfig {
    /// Installs the subscriber for the current thread. The guard lives as long as this config.
    pub fn load_logger(&mut self) -> crate::Result<()> {
        self._tracing_guard = if self.logging_enabled {
            Some(std::sync::Arc::new(self.create_logger()?))
        } else {
            None
        };

        if self.logging_enabled {
            println!(
                "{}",
                format!("Starting {} Logger", self.logger_name)
                    .color(colorful::RGB::new(0, 139, 248))
                    .bold()
            );
        }

        Ok(())
    }

    fn create_logger(&self) -> crate::Result<tracing::subscriber::DefaultGuard> {
        let file_layer = match &self.log_dir {
            Some(log_dir) => {
                if !Path::new(log_dir).exists() {
                    create_dir_all(log_dir)?;
                }

                let file_appender = tracing_appender::rolling::RollingFileAppender::builder()
                    .rotation(tracing_appender::rolling::Rotation::HOURLY)
                    .max_log_files(6)
                    .filename_prefix(&self.logger_name)
                    .filename_suffix("log")
                    .build(log_dir)?;

                Some(
                    tracing_subscriber::fmt::layer()
                        .pretty()
                        .with_ansi(false) // No ANSI codes in files
                        .with_writer(file_appender),
                )
            }
            None => None,
        };

        let filter = tracing_subscriber::EnvFilter::builder()
            .with_default_directive(self.level.into())
            .parse_lossy("");

        let terminal_layer = tracing_subscriber::fmt::layer()
            .compact()
            .with_ansi(false)
            .with_writer(std::io::stdout);

        let subscriber = tracing_subscriber::registry()
            .with(filter)
            .with(file_layer)
            .with(terminal_layer);

        Ok(tracing::subscriber::set_default(subscriber))
    }
}

pub trait LoggingConfigTrait {
    fn logging_config_mut(&mut self) -> &mut LoggingConfig;

    fn logging_enabled(mut self, enabled: bool) -> Self
    where
        Self: Sized,
    {
        self.logging_config_mut().logging_enabled = enabled;
        self
    }

    fn logger_name<S: Into<String>>(mut self, logger_name: S) -> Self
    where
        Self: Sized,
    {
        self.logging_config_mut().logger_name = logger_name.into();
        self
    }

    fn log_dir<P: Into<PathBuf>>(mut self, log_dir: P) -> Self
    where
        Self: Sized,
    {
        self.logging_config_mut().log_dir = Some(log_dir.into());
        self
    }

    fn log_level(mut self, level: tracing::Level) -> Self
    where
        Self: Sized,
    {
        self.logging_config_mut().level = level;
        self
    }

    /// Sets the log level to TRACE.
    ///
    /// Serialized requests and responses are logged at this level.
    fn log_level_trace(self) -> Self
    where
        Self: Sized,
    {
        self.log_level(tracing::Level::TRACE)
    }

    /// Sets the log level to DEBUG.
    ///
    /// Per-batch decisions such as the unrelated keyword count are logged here.
    fn log_level_debug(self) -> Self
    where
        Self: Sized,
    {
        self.log_level(tracing::Level::DEBUG)
    }

    /// Sets the log level to INFO. This is the default.
    ///
    /// Use INFO for run milestones: keywords loaded, resume index, batch ranges,
    /// model replies, checkpoint saves and the final write.
    fn log_level_info(self) -> Self
    where
        Self: Sized,
    {
        self.log_level(tracing::Level::INFO)
    }

    /// Sets the log level to WARN.
    fn log_level_warn(self) -> Self
    where
        Self: Sized,
    {
        self.log_level(tracing::Level::WARN)
    }

    /// Sets the log level to ERROR.
    ///
    /// Failed reads and writes, and the request failure that aborts a run, are
    /// logged at this level.
    fn log_level_error(self) -> Self
    where
        Self: Sized,
    {
        self.log_level(tracing::Level::ERROR)
    }
}

impl LoggingConfigTrait for LoggingConfig {
    fn logging_config_mut(&mut self) -> &mut LoggingConfig {
        self
    }
}
