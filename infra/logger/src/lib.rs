//! # Logger
//!
//! Global `tracing` subscriber setup for `rowmap` binaries.
//!
//! Logs always go to stderr, so stdout stays free for the rows a command produces.
//! Output is compact text by default, or one JSON object per event with
//! [`LoggerBuilder::json`].
//!
//! * Use [`LoggerBuilder::env_filter`] to set module-directed filters
//!   (e.g., `"rowmap=debug,rowmap_kernel=info"`). `RUST_LOG` overrides the level when no
//!   explicit filter is given.
//!
//! ## Example
//!
//! ```rust
//! # use rowmap_logger::{Logger, LevelFilter};
//!
//! let _logger = Logger::builder()
//!     .name("rowmap")
//!     .level(LevelFilter::DEBUG)
//!     .init()
//!     .unwrap();
//! ```

mod error;

pub use crate::error::{LoggerError, LoggerErrorExt};
pub use tracing::level_filters::LevelFilter;

use private::Sealed;
use std::io;
use tracing_subscriber::fmt::layer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

#[derive(Debug)]
pub struct LoggerConfig {
    level: LevelFilter,
    json: bool,
    ansi: bool,
    env_filter: Option<String>,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self { level: LevelFilter::WARN, json: false, ansi: true, env_filter: None }
    }
}

#[derive(Debug)]
pub struct NoName;
#[derive(Debug)]
pub struct WithName(String);

mod private {
    pub trait Sealed {}
}
impl Sealed for NoName {}
impl Sealed for WithName {}

/// A builder for configuring and initializing the global tracing subscriber.
#[derive(Debug)]
pub struct LoggerBuilder<N: Sealed = NoName> {
    config: LoggerConfig,
    name: N,
}

impl LoggerBuilder<NoName> {
    /// Sets the name of the logger.
    pub fn name(self, name: impl Into<String>) -> LoggerBuilder<WithName> {
        LoggerBuilder { name: WithName(name.into()), config: self.config }
    }
}

impl LoggerBuilder<WithName> {
    /// Configures the minimum log level to be emitted.
    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub const fn level(mut self, level: LevelFilter) -> Self {
        self.config.level = level;
        self
    }

    /// Parses and sets the level from its textual form (`"warn"`, `"debug"`, `"off"`).
    ///
    /// # Errors
    /// Returns [`LoggerError::InvalidConfiguration`] for an unknown level name.
    pub fn level_name(self, level: &str) -> Result<Self, LoggerError> {
        let level = level
            .trim()
            .parse::<LevelFilter>()
            .map_err(|e| LoggerError::invalid(format!("Invalid log level '{level}': {e}")))?;
        Ok(self.level(level))
    }

    /// Adds an explicit env filter (e.g., `rowmap=debug`).
    ///
    /// Invalid filters will cause [`LoggerBuilder::init`] to return an error.
    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub fn env_filter(mut self, filter: impl Into<String>) -> Self {
        self.config.env_filter = Some(filter.into());
        self
    }

    /// Emits one JSON object per event instead of compact text.
    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub const fn json(mut self, enabled: bool) -> Self {
        self.config.json = enabled;
        self
    }

    /// Enables ANSI colors in text output.
    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub const fn ansi(mut self, enabled: bool) -> Self {
        self.config.ansi = enabled;
        self
    }

    /// Consumes the builder and initializes the global tracing subscriber.
    ///
    /// # Errors
    /// Returns [`LoggerError::Subscriber`] if a global subscriber has already been set.
    /// Returns [`LoggerError::InvalidConfiguration`] for invalid builder settings.
    pub fn init(self) -> Result<Logger, LoggerError> {
        validate_name(&self.name.0)?;
        let env_filter = build_env_filter(&self.config)?;

        let stderr = layer().with_writer(io::stderr).with_target(true);
        let output = if self.config.json {
            stderr.json().boxed()
        } else {
            stderr.compact().with_ansi(self.config.ansi).boxed()
        };

        tracing_subscriber::registry().with(env_filter).with(output).try_init()?;
        tracing::debug!(logger = %self.name.0, level = %self.config.level, "Logger initialized");

        Ok(Logger { name: self.name.0 })
    }
}

/// A handle to the initialized logging system.
#[must_use = "Keep the handle for the lifetime of the program."]
#[derive(Debug)]
pub struct Logger {
    name: String,
}

impl Logger {
    /// Returns a new [`LoggerBuilder`] to configure the global tracing subscriber.
    ///
    /// The `name` identifies the process in log output.
    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder { config: LoggerConfig::default(), name: NoName }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

fn validate_name(name: &str) -> Result<(), LoggerError> {
    if name.trim().is_empty() {
        return Err(LoggerError::invalid("Logger name cannot be empty"));
    }
    Ok(())
}

fn build_env_filter(config: &LoggerConfig) -> Result<EnvFilter, LoggerError> {
    let builder = EnvFilter::builder().with_default_directive(config.level.into());
    config.env_filter.as_ref().map_or_else(
        || Ok(builder.from_env_lossy()),
        |filter| {
            builder
                .parse(filter)
                .map_err(|e| LoggerError::invalid(format!("Invalid env filter '{filter}': {e}")))
        },
    )
}
