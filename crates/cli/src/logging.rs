// Logging setup: compact stderr lines plus a daily validation log file

use std::path::PathBuf;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use sipot_config::Settings;

/// Prefix of the daily files: `validacion.<YYYY-MM-DD>.log`.
pub const LOG_FILE_PREFIX: &str = "validacion";

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Default filter directive, overridden by `RUST_LOG`.
    pub level: String,
    pub log_dir: PathBuf,
    pub retention_days: usize,
    /// Keep stderr free of log lines.
    pub quiet: bool,
}

impl LoggingConfig {
    pub fn from_settings(settings: &Settings, quiet: bool) -> Self {
        Self {
            level: settings.log_level.clone(),
            log_dir: settings.log_dir.clone(),
            retention_days: settings.log_retention_days,
            quiet,
        }
    }
}

/// Install the global subscriber.
///
/// The returned guard flushes the file writer on drop and must live until
/// the process exits. When the log directory cannot be used, logging falls
/// back to stderr only and the reason is returned alongside.
pub fn init(config: &LoggingConfig) -> (Option<WorkerGuard>, Option<String>) {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let console_layer = (!config.quiet).then(|| {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .without_time()
            .compact()
            .boxed()
    });

    let (file_layer, guard, fallback) = match file_appender(config) {
        Ok(appender) => {
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(false)
                .boxed();
            (Some(layer), Some(guard), None)
        }
        Err(reason) => (None, None, Some(reason)),
    };

    // A second init (tests, embedding) keeps the first subscriber
    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .with(file_layer)
        .try_init();

    (guard, fallback)
}

fn file_appender(config: &LoggingConfig) -> Result<RollingFileAppender, String> {
    std::fs::create_dir_all(&config.log_dir)
        .map_err(|e| format!("cannot create log dir '{}': {}", config.log_dir.display(), e))?;

    RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(LOG_FILE_PREFIX)
        .filename_suffix("log")
        .max_log_files(config.retention_days.max(1))
        .build(&config.log_dir)
        .map_err(|e| format!("cannot open log file in '{}': {}", config.log_dir.display(), e))
}
