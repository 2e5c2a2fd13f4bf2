//! # Logger
//!
//! Installs the global `tracing` subscriber for MCF tools and services:
//! compact console output, optional rolling file output (plain or JSON), and
//! `EnvFilter`-based filtering.
//!
//! The MCF crates only emit events; nothing is printed until a subscriber is
//! installed, either through [`Logger::builder`] or from a deserialized
//! [`LoggingConfig`] with [`Logger::from_config`].
//!
//! ## Example
//!
//! ```rust,ignore
//! use mcf_logger::{LevelFilter, Logger};
//!
//! let _logger = Logger::builder("mcf-tool")
//!     .level(LevelFilter::DEBUG)
//!     .filter("mcf_format=trace")
//!     .init()?;
//! ```

mod error;
mod settings;

pub use crate::error::{LoggerError, LoggerErrorExt};
pub use crate::settings::{LoggingConfig, RotationPolicy};
pub use tracing::level_filters::LevelFilter;
pub use tracing_appender::rolling::Rotation;

use private::Sealed;
use std::fs;
use std::marker::PhantomData;
use std::path::PathBuf;
use std::str::FromStr;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::RollingFileAppender;
use tracing_subscriber::fmt::layer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

const LOG_FILE_SUFFIX: &str = "log";

#[derive(Debug)]
struct Outputs {
    console: bool,
    path: Option<PathBuf>,
    level: LevelFilter,
    rotation: Rotation,
    max_files: usize,
    json: bool,
    filter: Option<String>,
}

impl Default for Outputs {
    fn default() -> Self {
        let defaults = LoggingConfig::default();
        Self {
            console: defaults.console,
            path: None,
            level: LevelFilter::INFO,
            rotation: defaults.rotation.into(),
            max_files: defaults.max_files,
            json: defaults.json,
            filter: None,
        }
    }
}

#[derive(Debug)]
pub struct NoFile;
#[derive(Debug)]
pub struct WithFile;

mod private {
    pub trait Sealed {}
}
impl Sealed for NoFile {}
impl Sealed for WithFile {}

/// Configures and installs the global tracing subscriber.
///
/// File-only options (`rotation`, `max_files`, `json`) become available after
/// [`LoggerBuilder::path`].
#[derive(Debug)]
pub struct LoggerBuilder<F: Sealed = NoFile> {
    name: String,
    outputs: Outputs,
    file: PhantomData<F>,
}

impl LoggerBuilder<WithFile> {
    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub const fn max_files(mut self, max: usize) -> Self {
        self.outputs.max_files = max;
        self
    }

    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub const fn rotation(mut self, rotation: Rotation) -> Self {
        self.outputs.rotation = rotation;
        self
    }

    /// Writes file output as JSON lines.
    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub const fn json(mut self, enabled: bool) -> Self {
        self.outputs.json = enabled;
        self
    }
}

impl<F: Sealed> LoggerBuilder<F> {
    /// Minimum level emitted when no filter directive matches.
    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub const fn level(mut self, level: LevelFilter) -> Self {
        self.outputs.level = level;
        self
    }

    /// Explicit `EnvFilter` directives (e.g. `mcf_format=debug,mcf_envelope=trace`).
    ///
    /// Without one, `RUST_LOG` is honoured. Invalid directives make
    /// [`LoggerBuilder::init`] fail.
    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub fn filter(mut self, directives: impl Into<String>) -> Self {
        self.outputs.filter = Some(directives.into());
        self
    }

    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub const fn console(mut self, enabled: bool) -> Self {
        self.outputs.console = enabled;
        self
    }

    /// Enables rolling file output in `path`, created if missing.
    pub fn path(self, path: impl Into<PathBuf>) -> LoggerBuilder<WithFile> {
        let mut outputs = self.outputs;
        outputs.path = Some(path.into());
        LoggerBuilder { name: self.name, outputs, file: PhantomData }
    }

    /// Consumes the builder and installs the global subscriber.
    ///
    /// The returned [`Logger`] owns the background writer of the file output;
    /// keep it alive until shutdown so buffered lines are flushed.
    ///
    /// # Errors
    /// * [`LoggerError::InvalidConfiguration`] If the name is blank, `max_files` is zero,
    ///   the filter does not parse, or no output is enabled.
    /// * [`LoggerError::Appender`] If the rolling file appender cannot be created.
    /// * [`LoggerError::Subscriber`] If a global subscriber is already installed.
    pub fn init(self) -> Result<Logger, LoggerError> {
        validate(&self.name, &self.outputs)?;
        let env_filter = build_env_filter(&self.outputs)?;

        let mut layers = Vec::new();

        if self.outputs.console {
            layers.push(layer().compact().with_ansi(true).boxed());
        }

        let guard = if let Some(path) = self.outputs.path {
            fs::create_dir_all(&path).map_err(|e| LoggerError::Internal {
                message: e.to_string().into(),
                context: Some(format!("Failed to create path: {}", path.display()).into()),
            })?;

            let appender = RollingFileAppender::builder()
                .rotation(self.outputs.rotation)
                .filename_prefix(&self.name)
                .filename_suffix(LOG_FILE_SUFFIX)
                .max_log_files(self.outputs.max_files)
                .build(path)?;

            let (writer, guard) = tracing_appender::non_blocking(appender);
            let file_layer = layer().with_writer(writer).with_ansi(false);
            let boxed =
                if self.outputs.json { file_layer.json().boxed() } else { file_layer.boxed() };
            layers.push(boxed);
            Some(guard)
        } else {
            None
        };

        if layers.is_empty() {
            return Err(LoggerError::invalid(
                "No logging outputs enabled; enable console or a file path",
            ));
        }

        tracing_subscriber::registry().with(env_filter).with(layers).try_init()?;
        tracing::debug!(name = %self.name, file = guard.is_some(), "Logger initialized");

        Ok(Logger { guard })
    }
}

/// Handle to the installed logging system.
#[must_use = "Dropping this handle will stop background logging threads."]
#[derive(Debug)]
pub struct Logger {
    guard: Option<WorkerGuard>,
}

impl Logger {
    /// Starts a builder. `name` prefixes rolling log files (e.g. `mcf.2026-10-16.log`).
    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub fn builder(name: impl Into<String>) -> LoggerBuilder {
        LoggerBuilder { name: name.into(), outputs: Outputs::default(), file: PhantomData }
    }

    /// Installs the subscriber described by a deserialized [`LoggingConfig`].
    ///
    /// # Errors
    /// * [`LoggerError::InvalidConfiguration`] If `level` is not a known level name.
    /// * Everything [`LoggerBuilder::init`] returns.
    pub fn from_config(config: &LoggingConfig) -> Result<Self, LoggerError> {
        let level = LevelFilter::from_str(&config.level)
            .map_err(|e| LoggerError::invalid(format!("Invalid level '{}': {e}", config.level)))?;

        let mut builder = Self::builder(config.name.clone()).level(level).console(config.console);
        if let Some(filter) = &config.filter {
            builder = builder.filter(filter.clone());
        }

        match &config.path {
            Some(path) => builder
                .path(path.clone())
                .rotation(config.rotation.into())
                .max_files(config.max_files)
                .json(config.json)
                .init(),
            None => builder.init(),
        }
    }

    /// Returns `true` when file output is active.
    #[must_use]
    pub const fn has_file_output(&self) -> bool {
        self.guard.is_some()
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        if self.guard.is_some() {
            tracing::info!("Logging system shutting down, flushing buffers...");
        }
    }
}

fn validate(name: &str, outputs: &Outputs) -> Result<(), LoggerError> {
    if name.trim().is_empty() {
        return Err(LoggerError::invalid("Logger name cannot be empty"));
    }
    if outputs.path.is_some() && outputs.max_files == 0 {
        return Err(LoggerError::invalid("max_files must be greater than zero"));
    }
    Ok(())
}

fn build_env_filter(outputs: &Outputs) -> Result<EnvFilter, LoggerError> {
    let builder = EnvFilter::builder().with_default_directive(outputs.level.into());
    outputs.filter.as_ref().map_or_else(
        || Ok(builder.from_env_lossy()),
        |filter| {
            builder
                .parse(filter)
                .map_err(|e| LoggerError::invalid(format!("Invalid filter '{filter}': {e}")))
        },
    )
}
