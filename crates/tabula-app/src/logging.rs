//! Logging and tracing setup
//!
//! Console logging via `tracing` with an `EnvFilter` (RUST_LOG overrides
//! the default per-crate filter), plus a daily-rotated plain-text file
//! under the platform data-local directory for bug reports.

use std::path::PathBuf;

use tracing_subscriber::{
    EnvFilter,
    fmt::{self},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Directory where log files are written
    pub log_dir: PathBuf,
    /// Whether to also log to a rotating file
    pub enable_file_logs: bool,
    /// Default log level filter, overridden by RUST_LOG
    pub default_filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_dir: log_directory(),
            enable_file_logs: true,
            default_filter: "info,tabula_app=debug,tabula_store=debug,tabula_canvas=debug,\
                             tabula_designer=debug,tabula_ui=debug"
                .to_string(),
        }
    }
}

/// Where log files land.
pub fn log_directory() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("tabula")
        .join("logs")
}

/// Initialize the logging system with the default configuration.
pub fn init_default() -> anyhow::Result<()> {
    init(LoggingConfig::default())
}

/// Initialize the logging system with the given configuration.
pub fn init(config: LoggingConfig) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.default_filter));

    let console_layer = fmt::layer().with_target(true);

    let file_layer = if config.enable_file_logs {
        std::fs::create_dir_all(&config.log_dir)?;
        let appender = tracing_appender::rolling::daily(&config.log_dir, "tabula.log");
        Some(fmt::layer().with_ansi(false).with_writer(appender))
    } else {
        None
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .with(file_layer)
        .init();

    Ok(())
}

/// Route panics through tracing before the default hook runs, so crashes
/// land in the log file alongside the events that led up to them.
pub fn install_panic_hook() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let message = info
            .payload()
            .downcast_ref::<&str>()
            .map(|s| s.to_string())
            .or_else(|| info.payload().downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "Box<dyn Any>".to_string());
        let location = info
            .location()
            .map(|l| format!("{}:{}:{}", l.file(), l.line(), l.column()))
            .unwrap_or_else(|| "unknown".to_string());
        tracing::error!(%location, "panic: {message}");
        default_hook(info);
    }));
}
