//! # Logging Setup
//!
//! The library itself only emits `tracing` events. Binaries call
//! [`init_logging`] once at startup to install a subscriber: a console layer
//! and, optionally, a JSON layer writing to daily rolling files.

use std::io;
use std::path::PathBuf;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::{non_blocking, rolling};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Options for [`init_logging`].
#[derive(Debug, Clone)]
pub struct LoggingOptions {
    /// Filter used when `RUST_LOG` is unset, e.g. `info` or `lib_marvel=debug`.
    pub level: String,
    /// Directory for JSON log files. `None` disables file output.
    pub log_dir: Option<PathBuf>,
    /// Base name of the rolling log files.
    pub file_prefix: String,
    /// Colorize console output.
    pub ansi: bool,
}

impl Default for LoggingOptions {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            log_dir: None,
            file_prefix: "marvel".to_string(),
            ansi: true,
        }
    }
}

/// Installs the global subscriber.
///
/// The returned guard flushes the file writer when dropped; keep it alive
/// for the lifetime of the program. It is `None` when file output is off.
///
/// # Errors
/// Fails when the log directory cannot be created, the filter is malformed,
/// or a global subscriber is already installed.
pub fn init_logging(options: &LoggingOptions) -> io::Result<Option<WorkerGuard>> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&options.level))
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;

    let console_layer = fmt::layer().with_target(true).with_ansi(options.ansi);

    let (file_layer, guard) = match &options.log_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)?;
            let file_appender = rolling::daily(dir, &options.file_prefix);
            let (writer, guard) = non_blocking(file_appender);
            let layer = fmt::layer().with_ansi(false).with_writer(writer).json();
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| io::Error::new(io::ErrorKind::AlreadyExists, e))?;

    info!(level = %options.level, file_output = guard.is_some(), "logging initialized");
    Ok(guard)
}
