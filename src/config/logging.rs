use std::path::PathBuf;

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::config::EnvironmentProvider;

/// Configuration for application logging
#[derive(Debug, Clone, PartialEq)]
pub struct LoggingConfig {
    pub log_level: String,
    pub app_log_file: Option<PathBuf>,
    pub app_log_retention_days: u32,
}

impl LoggingConfig {
    pub fn from_env_provider(env_provider: &impl EnvironmentProvider) -> Self {
        Self {
            log_level: env_provider
                .get_non_empty("LOG_LEVEL")
                .unwrap_or_else(|| "INFO".to_string()),
            app_log_file: env_provider.get_non_empty("APP_LOG_FILE").map(PathBuf::from),
            app_log_retention_days: env_provider.get_parsed_or("APP_LOG_RETENTION_DAYS", 7),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("Failed to initialize logging: {0}")]
    InitializationError(String),

    #[error("Invalid log level: {0}")]
    InvalidLogLevel(String),

    #[error("File system error: {0}")]
    FileSystemError(#[from] std::io::Error),
}

/// Initialize the tracing subscriber with console and optional file output
pub fn init_logging(env_provider: &impl EnvironmentProvider) -> Result<(), LoggingError> {
    let config = LoggingConfig::from_env_provider(env_provider);

    let env_filter = EnvFilter::try_new(&config.log_level)
        .map_err(|e| LoggingError::InvalidLogLevel(format!("{}: {}", config.log_level, e)))?;

    let console_layer = fmt::layer()
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .with_filter(env_filter.clone());

    let subscriber = tracing_subscriber::registry().with(console_layer);

    match &config.app_log_file {
        Some(log_file_path) => {
            let directory = log_file_path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or_else(|| std::path::Path::new("."));
            std::fs::create_dir_all(directory)?;

            let file_name = log_file_path
                .file_name()
                .ok_or_else(|| LoggingError::InitializationError("Invalid log file path".to_string()))?;

            let file_appender = tracing_appender::rolling::Builder::new()
                .rotation(tracing_appender::rolling::Rotation::DAILY)
                .filename_prefix(file_name.to_string_lossy())
                .max_log_files(config.app_log_retention_days.max(1) as usize)
                .build(directory)
                .map_err(|e| LoggingError::InitializationError(e.to_string()))?;

            let file_layer = fmt::layer()
                .with_writer(file_appender)
                .with_target(true)
                .with_ansi(false)
                .with_file(true)
                .with_line_number(true)
                .with_filter(env_filter);

            subscriber
                .with(file_layer)
                .try_init()
                .map_err(|e| LoggingError::InitializationError(e.to_string()))?;
        }
        None => {
            subscriber
                .try_init()
                .map_err(|e| LoggingError::InitializationError(e.to_string()))?;
        }
    }

    Ok(())
}
