//! External command execution
//!
//! Every binutils and package-manager call goes through [`ExternalTool`] so
//! the resolvers can be exercised with canned output in tests.

use log::debug;
use std::io::{Read, Seek, SeekFrom};
use std::process::{Command, ExitStatus, Stdio};

use crate::domain::BacktraceError;

/// Synchronous access to external programs
///
/// Both methods block until the program exits. A non-zero exit is an error;
/// there are no retries and no timeouts.
pub trait ExternalTool {
    /// Run a program with inherited stdio.
    ///
    /// # Errors
    /// Fails if the program cannot be started or exits unsuccessfully.
    fn run(&self, program: &str, args: &[&str]) -> Result<(), BacktraceError>;

    /// Run a program and return everything it wrote to stdout.
    ///
    /// # Errors
    /// Fails if the program cannot be started or exits unsuccessfully.
    fn capture(&self, program: &str, args: &[&str]) -> Result<String, BacktraceError>;
}

/// [`ExternalTool`] backed by real processes found on `PATH`
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemTool;

impl SystemTool {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    fn status(
        program: &str,
        args: &[&str],
        stdout: Stdio,
    ) -> Result<ExitStatus, BacktraceError> {
        debug!("running {:?}", command_line(program, args));
        Command::new(program).args(args).stdout(stdout).status().map_err(|source| {
            BacktraceError::CommandSpawnFailed { command: command_line(program, args), source }
        })
    }
}

impl ExternalTool for SystemTool {
    fn run(&self, program: &str, args: &[&str]) -> Result<(), BacktraceError> {
        let status = Self::status(program, args, Stdio::inherit())?;
        check_status(program, args, status)
    }

    fn capture(&self, program: &str, args: &[&str]) -> Result<String, BacktraceError> {
        // Removed by the OS as soon as the handle is dropped
        let mut buffer = tempfile::tempfile()?;
        let status = Self::status(program, args, Stdio::from(buffer.try_clone()?))?;
        check_status(program, args, status)?;

        buffer.seek(SeekFrom::Start(0))?;
        let mut output = Vec::new();
        buffer.read_to_end(&mut output)?;
        Ok(String::from_utf8_lossy(&output).into_owned())
    }
}

fn check_status(program: &str, args: &[&str], status: ExitStatus) -> Result<(), BacktraceError> {
    if status.success() {
        Ok(())
    } else {
        Err(BacktraceError::CommandFailed { command: command_line(program, args), status })
    }
}

/// Full argv, used in diagnostics
#[must_use]
pub fn command_line(program: &str, args: &[&str]) -> Vec<String> {
    std::iter::once(program).chain(args.iter().copied()).map(str::to_string).collect()
}
