use std::process::ExitStatus;

/// Why an invocation of the power tool failed.
#[derive(Debug, thiserror::Error)]
pub enum CommandFailure {
    #[error("could not start process: {0}")]
    Spawn(#[from] std::io::Error),

    #[error("exited with {status}{}", stderr_suffix(.stderr))]
    Exit { status: ExitStatus, stderr: String },
}

fn stderr_suffix(stderr: &str) -> String {
    if stderr.is_empty() {
        String::new()
    } else {
        format!(": {}", stderr)
    }
}

/// An invocation of the power tool that did not complete successfully.
#[derive(Debug, thiserror::Error)]
#[error("there was an error running the command `{command}`: {cause}")]
pub struct CommandError {
    /// Rendered command line, e.g. `upower -i /org/freedesktop/UPower/devices/battery_BAT0`.
    pub command: String,

    #[source]
    pub cause: CommandFailure,
}

/// Errors returned by [`crate::BatteryQuery`].
#[derive(Debug, thiserror::Error)]
pub enum QueryError {
    #[error(transparent)]
    Command(#[from] CommandError),

    #[error("invalid device: {0:?}")]
    InvalidDevice(String),

    #[error("default {pattern} device not found")]
    DefaultDeviceNotFound { pattern: String },

    #[error("wrong or unknown upower command present in system: {0:?}")]
    UnsupportedTool(String),
}

pub type Result<T> = std::result::Result<T, QueryError>;
