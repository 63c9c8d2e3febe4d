//! Logging setup for realty-admin
//!
//! Console output goes to stderr so command output on stdout stays clean.
//! When file logging is enabled, a rolling `realty-admin.log` in the log
//! directory captures the same events without ANSI colors.

use std::{path::PathBuf, str::FromStr};

use tracing::Level;
use tracing_appender::{
    non_blocking::WorkerGuard,
    rolling::{RollingFileAppender, Rotation},
};
use tracing_subscriber::{
    EnvFilter, Layer, Registry, fmt, layer::SubscriberExt, util::SubscriberInitExt,
};

const LOG_FILE_NAME: &str = "realty-admin.log";

/// Log rotation policy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogRotation {
    Daily,
    Hourly,
    /// Single file
    Never,
}

impl From<LogRotation> for Rotation {
    fn from(rotation: LogRotation) -> Self {
        match rotation {
            LogRotation::Daily => Rotation::DAILY,
            LogRotation::Hourly => Rotation::HOURLY,
            LogRotation::Never => Rotation::NEVER,
        }
    }
}

impl FromStr for LogRotation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "daily" => Ok(LogRotation::Daily),
            "hourly" => Ok(LogRotation::Hourly),
            "never" => Ok(LogRotation::Never),
            _ => Err(format!("Invalid log rotation: {}", s)),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub log_dir: PathBuf,
    /// Default level when `RUST_LOG` is not set
    pub level: Level,
    pub file_logging: bool,
    pub rotation: LogRotation,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_dir: PathBuf::from("logs"),
            level: Level::WARN,
            file_logging: false,
            rotation: LogRotation::Daily,
        }
    }
}

/// Keeps the file writer alive; buffered output is flushed on drop.
pub struct LoggingGuard {
    _file_guards: Vec<WorkerGuard>,
}

/// Initialize the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over the configured level for every layer.
pub fn init_logging(config: &LoggingConfig) -> anyhow::Result<LoggingGuard> {
    let mut guards: Vec<WorkerGuard> = Vec::new();
    let mut layers: Vec<Box<dyn Layer<Registry> + Send + Sync>> = Vec::new();

    let filter = || {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(config.level.to_string()))
    };

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_filter(filter());
    layers.push(Box::new(console_layer));

    if config.file_logging {
        std::fs::create_dir_all(&config.log_dir)?;

        let appender =
            RollingFileAppender::new(config.rotation.into(), &config.log_dir, LOG_FILE_NAME);
        let (writer, guard) = tracing_appender::non_blocking(appender);
        guards.push(guard);

        let file_layer = fmt::layer()
            .with_writer(writer)
            .with_target(true)
            .with_thread_names(true)
            .with_file(true)
            .with_line_number(true)
            .with_ansi(false)
            .with_filter(filter());
        layers.push(Box::new(file_layer));
    }

    Registry::default()
        .with(layers)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    if config.file_logging {
        tracing::debug!(
            log_dir = %config.log_dir.display(),
            "File logging initialized: {}",
            LOG_FILE_NAME
        );
    }

    Ok(LoggingGuard {
        _file_guards: guards,
    })
}
