//! # Logger
//!
//! Installs the process-wide `tracing` subscriber for the server.
//!
//! Output goes to the console (compact lines during development, one JSON object per
//! event in production) and, when a directory is given, to daily-rotated files written
//! off the request path. `RUST_LOG` refines the base level; `hyper`, `h2` and
//! `axum_server` stay at `warn` unless a filter names them.
//!
//! ```rust
//! use keel_logger::{ConsoleFormat, Logger, parse_level};
//!
//! let _logger = Logger::builder()
//!     .name("keel-server")
//!     .level(parse_level("warning").unwrap())
//!     .console_format(ConsoleFormat::Json)
//!     .init()
//!     .unwrap();
//! ```

mod error;

pub use crate::error::{LoggerError, LoggerErrorExt};
pub use tracing::level_filters::LevelFilter;

use std::fs;
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, fmt};

/// Daily files kept in the log directory.
const RETAINED_LOG_FILES: usize = 14;

const NOISY_TARGETS: [&str; 3] = ["hyper", "h2", "axum_server"];

/// Rendering of console output.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleFormat {
    #[default]
    Compact,
    Json,
}

/// Configures the global subscriber. Obtained from [`Logger::builder`].
#[derive(Debug)]
#[must_use = "call .init() to install the subscriber"]
pub struct LoggerBuilder {
    name: String,
    level: LevelFilter,
    console: bool,
    console_format: ConsoleFormat,
    directives: Option<String>,
    log_dir: Option<PathBuf>,
    json_files: bool,
}

impl LoggerBuilder {
    /// Prefix of the rotated log files.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub const fn level(mut self, level: LevelFilter) -> Self {
        self.level = level;
        self
    }

    pub const fn console(mut self, enabled: bool) -> Self {
        self.console = enabled;
        self
    }

    pub const fn console_format(mut self, format: ConsoleFormat) -> Self {
        self.console_format = format;
        self
    }

    /// Filter directives such as `keel_items=debug`. They replace `RUST_LOG`.
    pub fn env_filter(mut self, directives: impl Into<String>) -> Self {
        self.directives = Some(directives.into());
        self
    }

    /// Also writes to daily files under `dir`, created if missing.
    pub fn path(mut self, dir: impl Into<PathBuf>) -> Self {
        self.log_dir = Some(dir.into());
        self
    }

    /// Writes the log files as JSON lines.
    pub const fn json(mut self) -> Self {
        self.json_files = true;
        self
    }

    /// Installs the subscriber.
    ///
    /// # Errors
    /// [`LoggerError::InvalidConfiguration`] for a blank name, bad directives or no output;
    /// [`LoggerError::Subscriber`] when a global subscriber is already installed.
    pub fn init(self) -> Result<Logger, LoggerError> {
        if self.name.trim().is_empty() {
            return Err(invalid("Logger name cannot be empty".to_owned()));
        }
        if !self.console && self.log_dir.is_none() {
            return Err(invalid("Enable console or file output".to_owned()));
        }

        let filter = self.filter()?;
        let mut layers = Vec::with_capacity(2);

        if self.console {
            layers.push(match self.console_format {
                ConsoleFormat::Compact => fmt::layer().compact().boxed(),
                ConsoleFormat::Json => fmt::layer().json().with_current_span(false).boxed(),
            });
        }

        let file_guard = match &self.log_dir {
            Some(dir) => {
                fs::create_dir_all(dir)
                    .context(format!("Failed to create log directory {}", dir.display()))?;
                let appender = RollingFileAppender::builder()
                    .rotation(Rotation::DAILY)
                    .filename_prefix(&self.name)
                    .filename_suffix("log")
                    .max_log_files(RETAINED_LOG_FILES)
                    .build(dir)?;
                let (writer, guard) = tracing_appender::non_blocking(appender);
                let file = fmt::layer().with_writer(writer).with_ansi(false);
                layers.push(if self.json_files { file.json().boxed() } else { file.boxed() });
                Some(guard)
            },
            None => None,
        };

        tracing_subscriber::registry().with(filter).with(layers).try_init()?;
        Ok(Logger { file_guard })
    }

    fn filter(&self) -> Result<EnvFilter, LoggerError> {
        let builder = EnvFilter::builder().with_default_directive(self.level.into());
        let mut filter = match &self.directives {
            Some(directives) => builder
                .parse(directives)
                .map_err(|e| invalid(format!("Invalid filter '{directives}': {e}")))?,
            None => builder.from_env_lossy(),
        };

        if self.level > LevelFilter::WARN {
            let named = self.directives.as_deref().unwrap_or_default();
            for target in NOISY_TARGETS.into_iter().filter(|t| !named.contains(*t)) {
                let directive = format!("{target}=warn")
                    .parse()
                    .map_err(|e| invalid(format!("Invalid directive for '{target}': {e}")))?;
                filter = filter.add_directive(directive);
            }
        }
        Ok(filter)
    }
}

/// Keeps the file writer alive. Buffered lines are flushed when it is dropped.
#[derive(Debug)]
#[must_use = "dropping the handle stops file logging"]
pub struct Logger {
    file_guard: Option<WorkerGuard>,
}

impl Logger {
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder {
            name: "keel".to_owned(),
            level: LevelFilter::INFO,
            console: true,
            console_format: ConsoleFormat::Compact,
            directives: None,
            log_dir: None,
            json_files: false,
        }
    }

    #[must_use]
    pub const fn writes_files(&self) -> bool {
        self.file_guard.is_some()
    }
}

/// Parses a `LOG_LEVEL` value, case-insensitively. `warning` and `critical` map to
/// `warn` and `error`.
///
/// # Errors
/// [`LoggerError::InvalidConfiguration`] for unknown names.
pub fn parse_level(value: &str) -> Result<LevelFilter, LoggerError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "trace" => Ok(LevelFilter::TRACE),
        "debug" => Ok(LevelFilter::DEBUG),
        "info" => Ok(LevelFilter::INFO),
        "warn" | "warning" => Ok(LevelFilter::WARN),
        "error" | "critical" => Ok(LevelFilter::ERROR),
        "off" => Ok(LevelFilter::OFF),
        other => Err(invalid(format!("Unknown log level '{other}'"))),
    }
}

fn invalid(message: String) -> LoggerError {
    LoggerError::InvalidConfiguration { message: message.into(), context: None }
}
