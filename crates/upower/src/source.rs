//! Invocation of the `upower` command-line tool.

use std::ffi::OsStr;
use std::path::PathBuf;
use std::process::Command;

use tracing::debug;

use crate::error::{CommandError, CommandFailure};

/// Program name looked up on `PATH` when no explicit path is configured.
pub const UPOWER_PROGRAM: &str = "upower";

/// Supplies raw report text for the query layer.
///
/// Every method returns the tool's captured output split into lines, with
/// leading and trailing blank lines removed.
pub trait ReportSource {
    /// Output of the detailed report for one device (`upower -i <device>`).
    fn report(&self, device: &str) -> Result<Vec<String>, CommandError>;

    /// Identifiers of every known power device (`upower -e`).
    fn devices(&self) -> Result<Vec<String>, CommandError>;

    /// Version banner of the tool (`upower -v`).
    fn version(&self) -> Result<Vec<String>, CommandError>;
}

/// [`ReportSource`] backed by the real `upower` executable.
#[derive(Debug, Clone)]
pub struct UpowerCli {
    program: PathBuf,
}

impl Default for UpowerCli {
    fn default() -> Self {
        Self::new(UPOWER_PROGRAM)
    }
}

impl UpowerCli {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &PathBuf {
        &self.program
    }

    fn run<I, S>(&self, args: I) -> Result<Vec<String>, CommandError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let mut cmd = Command::new(&self.program);
        cmd.args(args);
        let command = render_command(&cmd);
        debug!(%command, "Running power tool");

        let output = cmd.output().map_err(|e| CommandError {
            command: command.clone(),
            cause: CommandFailure::Spawn(e),
        })?;

        if !output.status.success() {
            return Err(CommandError {
                command,
                cause: CommandFailure::Exit {
                    status: output.status,
                    stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
                },
            });
        }

        Ok(split_output(&String::from_utf8_lossy(&output.stdout)))
    }
}

impl ReportSource for UpowerCli {
    fn report(&self, device: &str) -> Result<Vec<String>, CommandError> {
        self.run(["-i", device])
    }

    fn devices(&self) -> Result<Vec<String>, CommandError> {
        self.run(["-e"])
    }

    fn version(&self) -> Result<Vec<String>, CommandError> {
        self.run(["-v"])
    }
}

fn render_command(cmd: &Command) -> String {
    std::iter::once(cmd.get_program())
        .chain(cmd.get_args())
        .map(|part| part.to_string_lossy())
        .collect::<Vec<_>>()
        .join(" ")
}

fn split_output(stdout: &str) -> Vec<String> {
    stdout.trim().split('\n').map(str::to_string).collect()
}
