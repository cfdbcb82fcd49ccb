use std::io;
use std::sync::OnceLock;

use tracing::Level;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt::time::UtcTime;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::{runtime_dir, LogLevel};

const LOG_PREFIX: &str = "batinfo";
const KEPT_LOG_FILES: usize = 7;

static INIT: OnceLock<()> = OnceLock::new();

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogMode {
    /// Daily-rotated files under the runtime dir, named by `prefix`.
    File { prefix: String },
    Stderr,
}

impl LogMode {
    /// File logging for a `watch` of `device`, one set of files per device.
    pub fn watch(device: Option<&str>) -> Self {
        LogMode::File {
            prefix: file_prefix(device),
        }
    }
}

pub struct LogGuard {
    _guard: Option<WorkerGuard>,
}

/// Installs the global subscriber. Only the first call has any effect.
///
/// File logging that cannot be set up falls back to stderr.
pub fn init(level: LogLevel, mode: LogMode, cli_override: Option<LogLevel>) -> LogGuard {
    let mut guard = None;

    INIT.get_or_init(|| {
        let Some(level) = cli_override.unwrap_or(level).as_tracing_level() else {
            return;
        };

        let to_file = match mode {
            LogMode::File { prefix } => match file_writer(&prefix) {
                Ok((writer, file_guard)) => {
                    guard = Some(file_guard);
                    Some(writer)
                }
                Err(e) => {
                    eprintln!("batinfo: logging to stderr, log file unavailable: {}", e);
                    None
                }
            },
            LogMode::Stderr => None,
        };

        let layer = fmt::layer()
            .with_timer(UtcTime::rfc_3339())
            .with_target(true);
        let layer = match to_file {
            Some(writer) => layer
                .with_writer(BoxMakeWriter::new(writer))
                .with_ansi(false)
                .with_file(true)
                .with_line_number(true),
            None => layer
                .with_writer(BoxMakeWriter::new(io::stderr))
                .with_ansi(true)
                .with_file(false)
                .with_line_number(false),
        };

        tracing_subscriber::registry()
            .with(build_env_filter(level))
            .with(layer)
            .init();
    });

    LogGuard { _guard: guard }
}

fn build_env_filter(level: Level) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy()
}

fn file_writer(prefix: &str) -> io::Result<(NonBlocking, WorkerGuard)> {
    let log_dir = runtime_dir();
    std::fs::create_dir_all(&log_dir)?;

    let appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(prefix)
        .filename_suffix("log")
        .max_log_files(KEPT_LOG_FILES)
        .build(&log_dir)
        .map_err(io::Error::other)?;

    Ok(tracing_appender::non_blocking(appender))
}

/// Log file prefix for a device: the last segment of its identifier, e.g.
/// `batinfo-battery_BAT0`. Without a device the plain `batinfo` prefix is used.
pub fn file_prefix(device: Option<&str>) -> String {
    let name = device
        .and_then(|d| d.trim_end_matches('/').rsplit('/').next())
        .map(|name| {
            name.chars()
                .map(|c| if c.is_ascii_alphanumeric() || c == '_' || c == '-' { c } else { '_' })
                .collect::<String>()
        })
        .unwrap_or_default();

    if name.is_empty() {
        LOG_PREFIX.to_string()
    } else {
        format!("{}-{}", LOG_PREFIX, name)
    }
}
