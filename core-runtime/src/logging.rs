//! # Logging & Tracing Infrastructure
//!
//! Configures the `tracing` pipeline for the video sync core.
//!
//! ## Overview
//!
//! The core logs through `tracing` macros everywhere; this module installs
//! the global `tracing-subscriber` stack. Output format and verbosity are
//! chosen by the embedding host: pretty output for development consoles,
//! JSON for log shippers, compact for production text logs. The `RUST_LOG`
//! environment variable overrides the configured default directive.
//!
//! ## Usage
//!
//! ```ignore
//! use core_runtime::logging::{init_logging, LogFormat, LoggingConfig};
//!
//! let config = LoggingConfig::default()
//!     .with_format(LogFormat::Compact)
//!     .with_directive("core_video=debug,info");
//! init_logging(config)?;
//!
//! tracing::info!("video sync core ready");
//! ```

use crate::error::{Error, Result};
use tracing_subscriber::{
    filter::EnvFilter, layer::SubscriberExt, util::SubscriberInitExt,
};

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable pretty format with source locations.
    Pretty,
    /// Structured JSON format for machine parsing.
    Json,
    /// Compact format for production.
    Compact,
}

/// Configuration for the global tracing subscriber.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Output format for the fmt layer.
    pub format: LogFormat,
    /// Filter directive applied when `RUST_LOG` is not set.
    pub default_directive: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::Pretty,
            default_directive: "info".to_string(),
        }
    }
}

impl LoggingConfig {
    /// Set the output format.
    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    /// Set the filter directive used when `RUST_LOG` is not set.
    pub fn with_directive(mut self, directive: impl Into<String>) -> Self {
        self.default_directive = directive.into();
        self
    }
}

/// Install the global tracing subscriber.
///
/// Fails when a subscriber is already installed, which embedding hosts that
/// bring their own tracing stack should treat as expected.
pub fn init_logging(config: LoggingConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.default_directive));

    let registry = tracing_subscriber::registry().with(filter);
    let installed = match config.format {
        LogFormat::Pretty => registry
            .with(tracing_subscriber::fmt::layer().pretty())
            .try_init(),
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json())
            .try_init(),
        LogFormat::Compact => registry
            .with(tracing_subscriber::fmt::layer().compact())
            .try_init(),
    };

    installed.map_err(|err| Error::Config(format!("failed to install subscriber: {err}")))
}
