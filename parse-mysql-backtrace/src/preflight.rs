//! Pre-flight checks for parse-mysql-backtrace
//!
//! Validates the environment before installing packages or reading logs.
//! Provides clear, actionable error messages when requirements aren't met.

#![allow(unsafe_code)] // geteuid() requires unsafe

use anyhow::{bail, Result};
use std::env;
use std::ffi::OsString;
use std::path::PathBuf;

use crate::domain::BacktraceError;

/// binutils programs used during resolution
pub const REQUIRED_TOOLS: [&str; 3] = ["nm", "c++filt", "addr2line"];

/// Check that package installation can succeed
pub fn check_privileges() -> Result<()> {
    if unsafe { libc::geteuid() } == 0 {
        return Ok(());
    }

    Err(BacktraceError::RequiresRoot.into())
}

/// Check that every log file named on the command line exists
pub fn check_inputs_exist(inputs: &[PathBuf]) -> Result<()> {
    for input in inputs {
        if input.as_os_str() == "-" {
            continue;
        }
        if !input.exists() {
            bail!(
                "Log file not found: {}\n\n\
                 Make sure the path is correct, or pipe the log on stdin.",
                input.display()
            );
        }
        if input.is_dir() {
            bail!("Not a file: {}", input.display());
        }
    }
    Ok(())
}

/// Warn about binutils programs missing from `PATH`.
///
/// Not fatal: logs without Groonga or mysqld frames never need them.
pub fn warn_missing_tools(quiet: bool) {
    if quiet {
        return;
    }
    for tool in missing_tools() {
        eprintln!("warning: {tool} not found in PATH, frames needing it will fail");
    }
}

/// [`REQUIRED_TOOLS`] with no executable in any `PATH` directory
#[must_use]
pub fn missing_tools() -> Vec<&'static str> {
    missing_tools_in(env::var_os("PATH"))
}

fn missing_tools_in(paths: Option<OsString>) -> Vec<&'static str> {
    let cwd = env::current_dir().unwrap_or_default();
    REQUIRED_TOOLS
        .into_iter()
        .filter(|tool| which::which_in(*tool, paths.as_ref(), &cwd).is_err())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_privilege_check() {
        // Depends on who runs the tests; just make sure the error is typed
        if let Err(err) = check_privileges() {
            assert!(matches!(
                err.downcast_ref::<BacktraceError>(),
                Some(BacktraceError::RequiresRoot)
            ));
            assert!(err.to_string().contains("--no-install"));
        }
    }

    #[test]
    fn test_input_not_found() {
        let result = check_inputs_exist(&[PathBuf::from("/nonexistent/mysqld.log")]);
        let err = result.unwrap_err().to_string();
        assert!(err.contains("Log file not found"));
    }

    #[test]
    fn test_stdin_and_directory_inputs() {
        assert!(check_inputs_exist(&[PathBuf::from("-")]).is_ok());
        let dir = tempfile::tempdir().unwrap();
        assert!(check_inputs_exist(&[dir.path().to_path_buf()]).is_err());
    }

    #[test]
    fn test_missing_tools_requires_executables() {
        use std::fs::{self, File, Permissions};
        use std::os::unix::fs::PermissionsExt;

        let bin = tempfile::tempdir().unwrap();
        for (tool, mode) in [("nm", 0o755), ("c++filt", 0o755), ("addr2line", 0o644)] {
            let path = bin.path().join(tool);
            File::create(&path).unwrap();
            fs::set_permissions(&path, Permissions::from_mode(mode)).unwrap();
        }

        let paths = Some(bin.path().as_os_str().to_os_string());
        assert_eq!(missing_tools_in(paths), vec!["addr2line"]);
    }

    #[test]
    fn test_missing_tools_without_path() {
        let empty = tempfile::tempdir().unwrap();
        let paths = Some(empty.path().as_os_str().to_os_string());
        assert_eq!(missing_tools_in(paths), REQUIRED_TOOLS.to_vec());
    }
}
