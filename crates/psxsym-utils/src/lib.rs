//! # psxsym Utilities
//!
//! Shared utilities and helpers for psxsym.
//!
//! This crate provides the logging setup used by the command-line tool, built
//! on `tracing`. The decoding crates only emit events; installing a subscriber
//! is left to the binary.

pub mod logging;

// Re-export commonly used logging functions for convenience
pub use logging::{
    init_logging, init_logging_with_config, init_logging_with_level, LogConfig, LogFormat, LogGuard, LogLevel,
    LoggingError,
};
pub use tracing::{debug, error, info, trace, warn};
