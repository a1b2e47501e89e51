//! # Logging Utilities
//!
//! Logging infrastructure for psxsym using `tracing`.
//!
//! Logs always go to stderr, so a listing written to stdout can be piped or
//! redirected without log lines mixed in. Optionally they are also written to
//! a file.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use psxsym_utils::init_logging;
//!
//! // Keep the guard alive for as long as logs should be flushed to the file
//! let _guard = init_logging().expect("Failed to initialize logging");
//!
//! tracing::info!("Application started");
//! ```
//!
//! ## Environment Variables
//!
//! - `RUST_LOG`: Log level filter (e.g., `RUST_LOG=debug`, `RUST_LOG=psxsym_core=trace`)
//! - `PSXSYM_LOG_FORMAT`: Output format (`json` or `pretty`, default: `pretty`)
//! - `PSXSYM_LOG_FILE`: Optional path to a log file (if not set, logs only to stderr)
//!
//! ## Examples
//!
//! ```rust,no_run
//! use psxsym_utils::{LogConfig, LogFormat, LogLevel, init_logging_with_config};
//!
//! // Environment settings, with the level forced from the command line
//! let config = LogConfig::from_env().with_level(LogLevel::Debug).with_format(LogFormat::Json);
//! let _guard = init_logging_with_config(&config).expect("Failed to initialize logging");
//! ```

use std::env;
use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::time::ChronoUtc;
use tracing_subscriber::fmt::{self, MakeWriter};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};

/// Environment variable selecting the output format.
pub const LOG_FORMAT_VAR: &str = "PSXSYM_LOG_FORMAT";

/// Environment variable naming an additional log file.
pub const LOG_FILE_VAR: &str = "PSXSYM_LOG_FILE";

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat
{
    /// Pretty-printed, human-readable format (default)
    #[default]
    Pretty,
    /// JSON format, one object per line
    Json,
}

impl FromStr for LogFormat
{
    type Err = LoggingError;

    fn from_str(s: &str) -> Result<Self, Self::Err>
    {
        match s.to_lowercase().as_str() {
            "pretty" | "text" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            _ => Err(LoggingError::InvalidFormat(s.to_string())),
        }
    }
}

/// Log level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel
{
    /// Error level
    Error,
    /// Warning level
    Warn,
    /// Info level (default)
    Info,
    /// Debug level
    Debug,
    /// Trace level; one event per decoded record
    Trace,
}

impl From<LogLevel> for Level
{
    fn from(level: LogLevel) -> Self
    {
        match level {
            LogLevel::Error => Level::ERROR,
            LogLevel::Warn => Level::WARN,
            LogLevel::Info => Level::INFO,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Trace => Level::TRACE,
        }
    }
}

impl FromStr for LogLevel
{
    type Err = LoggingError;

    fn from_str(s: &str) -> Result<Self, Self::Err>
    {
        match s.to_lowercase().as_str() {
            "error" | "err" => Ok(LogLevel::Error),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "info" => Ok(LogLevel::Info),
            "debug" | "dbg" => Ok(LogLevel::Debug),
            "trace" => Ok(LogLevel::Trace),
            _ => Err(LoggingError::InvalidLevel(s.to_string())),
        }
    }
}

/// Logging configuration
///
/// Filter precedence: an explicit `level`, then `RUST_LOG`, then `info`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogConfig
{
    /// Overrides `RUST_LOG` when set
    pub level: Option<LogLevel>,
    pub format: LogFormat,
    /// Also write logs to this file
    pub file: Option<PathBuf>,
}

impl LogConfig
{
    /// Read `PSXSYM_LOG_FORMAT` and `PSXSYM_LOG_FILE`.
    ///
    /// An unrecognised format falls back to pretty output. The level is left
    /// unset so `RUST_LOG` applies.
    pub fn from_env() -> Self
    {
        let format = env::var(LOG_FORMAT_VAR)
            .ok()
            .and_then(|s| LogFormat::from_str(&s).ok())
            .unwrap_or_default();
        let file = env::var_os(LOG_FILE_VAR).filter(|path| !path.is_empty()).map(PathBuf::from);

        Self {
            level: None,
            format,
            file,
        }
    }

    #[must_use]
    pub fn with_level(mut self, level: LogLevel) -> Self
    {
        self.level = Some(level);
        self
    }

    #[must_use]
    pub fn with_format(mut self, format: LogFormat) -> Self
    {
        self.format = format;
        self
    }

    #[must_use]
    pub fn with_file(mut self, file: impl Into<PathBuf>) -> Self
    {
        self.file = Some(file.into());
        self
    }

    fn filter(&self) -> EnvFilter
    {
        match self.level {
            Some(level) => EnvFilter::new(Level::from(level).to_string()),
            None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(Level::INFO.to_string())),
        }
    }
}

/// Flushes buffered file output when dropped.
///
/// Hold it until the program exits; logging to stderr does not need it.
#[must_use = "dropping the guard stops file logging"]
#[derive(Debug)]
pub struct LogGuard
{
    _file: Option<WorkerGuard>,
}

/// Initialize logging from the environment
///
/// Reads configuration from environment variables:
/// - `RUST_LOG`: Log level filter (e.g., `debug`, `psxsym_core=trace`)
/// - `PSXSYM_LOG_FORMAT`: Output format (`json` or `pretty`, default: `pretty`)
/// - `PSXSYM_LOG_FILE`: Optional path to log file
///
/// ## Errors
///
/// Returns an error if:
/// - Logging is already initialized
/// - The log file cannot be created (if `PSXSYM_LOG_FILE` is set)
pub fn init_logging() -> Result<LogGuard, LoggingError>
{
    init_logging_with_config(&LogConfig::from_env())
}

/// Initialize logging with explicit level and format
///
/// `PSXSYM_LOG_FILE` is still honoured.
///
/// ## Errors
///
/// Returns an error if logging is already initialized or file logging fails.
pub fn init_logging_with_level(level: LogLevel, format: LogFormat) -> Result<LogGuard, LoggingError>
{
    init_logging_with_config(&LogConfig::from_env().with_level(level).with_format(format))
}

/// Initialize logging from a [`LogConfig`].
///
/// ## Errors
///
/// Returns an error if logging is already initialized or file logging fails.
pub fn init_logging_with_config(config: &LogConfig) -> Result<LogGuard, LoggingError>
{
    let mut layers = vec![layer(config.format, io::stderr, io::stderr().is_terminal(), config.filter())];

    let mut guard = None;
    if let Some(path) = &config.file {
        let (writer, file_guard) = tracing_appender::non_blocking(file_appender(path)?);
        layers.push(layer(config.format, writer, false, config.filter()));
        guard = Some(file_guard);
    }

    Registry::default()
        .with(layers)
        .try_init()
        .map_err(|err| LoggingError::InitializationFailed(err.to_string()))?;

    Ok(LogGuard { _file: guard })
}

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

fn layer<W>(format: LogFormat, writer: W, ansi: bool, filter: EnvFilter) -> BoxedLayer
where
    W: for<'writer> MakeWriter<'writer> + Send + Sync + 'static,
{
    let base = fmt::layer()
        .with_writer(writer)
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .with_timer(ChronoUtc::rfc_3339());

    match format {
        LogFormat::Pretty => base.with_ansi(ansi).with_filter(filter).boxed(),
        LogFormat::Json => base
            .json()
            .with_current_span(true)
            .with_span_list(true)
            .with_filter(filter)
            .boxed(),
    }
}

/// Single, non-rotating log file; the parent directory is created if missing.
fn file_appender(path: &Path) -> Result<tracing_appender::rolling::RollingFileAppender, LoggingError>
{
    let file_name = path
        .file_name()
        .ok_or_else(|| LoggingError::InvalidFile(path.to_path_buf()))?;
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    std::fs::create_dir_all(&dir)?;
    Ok(tracing_appender::rolling::never(dir, file_name))
}

/// Logging initialization error
#[derive(Debug, thiserror::Error)]
pub enum LoggingError
{
    /// Invalid log format
    #[error("Invalid log format: {0}. Use 'pretty' or 'json'")]
    InvalidFormat(String),

    /// Invalid log level
    #[error("Invalid log level: {0}. Use 'error', 'warn', 'info', 'debug', or 'trace'")]
    InvalidLevel(String),

    /// The log file path has no file name
    #[error("Invalid log file path: {}", .0.display())]
    InvalidFile(PathBuf),

    /// Failed to initialize logging
    #[error("Failed to initialize logging: {0}")]
    InitializationFailed(String),

    /// File logging error
    #[error("File logging error: {0}")]
    FileError(#[from] io::Error),
}

#[cfg(test)]
mod tests
{
    use super::*;

    #[test]
    fn test_log_format_from_str()
    {
        assert_eq!(LogFormat::from_str("pretty").unwrap(), LogFormat::Pretty);
        assert_eq!(LogFormat::from_str("JSON").unwrap(), LogFormat::Json);
        assert_eq!(LogFormat::from_str("text").unwrap(), LogFormat::Pretty);
        assert!(matches!(
            LogFormat::from_str("xml"),
            Err(LoggingError::InvalidFormat(s)) if s == "xml"
        ));
    }

    #[test]
    fn test_log_level_from_str()
    {
        assert_eq!(LogLevel::from_str("error").unwrap(), LogLevel::Error);
        assert_eq!(LogLevel::from_str("warning").unwrap(), LogLevel::Warn);
        assert_eq!(LogLevel::from_str("info").unwrap(), LogLevel::Info);
        assert_eq!(LogLevel::from_str("dbg").unwrap(), LogLevel::Debug);
        assert_eq!(LogLevel::from_str("Trace").unwrap(), LogLevel::Trace);
        assert!(LogLevel::from_str("loud").is_err());
    }

    #[test]
    fn test_log_level_to_tracing_level()
    {
        assert_eq!(Level::from(LogLevel::Error), Level::ERROR);
        assert_eq!(Level::from(LogLevel::Warn), Level::WARN);
        assert_eq!(Level::from(LogLevel::Info), Level::INFO);
        assert_eq!(Level::from(LogLevel::Debug), Level::DEBUG);
        assert_eq!(Level::from(LogLevel::Trace), Level::TRACE);
    }

    #[test]
    fn test_config_builders()
    {
        let config = LogConfig::default()
            .with_level(LogLevel::Trace)
            .with_format(LogFormat::Json)
            .with_file("logs/psxsym.log");
        assert_eq!(config.level, Some(LogLevel::Trace));
        assert_eq!(config.format, LogFormat::Json);
        assert_eq!(config.file.as_deref(), Some(Path::new("logs/psxsym.log")));
    }

    #[test]
    fn test_file_without_name_is_rejected()
    {
        assert!(matches!(file_appender(Path::new("/")), Err(LoggingError::InvalidFile(_))));
    }
}
