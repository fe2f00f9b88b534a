//! # parse-mysql-backtrace - Main Entry Point
//!
//! 1. Identify the host (`--system` or `/etc/system-release-cpe`)
//! 2. Install matching debuginfo packages (skipped with `--no-install`)
//! 3. Resolve every frame of the given logs, or of stdin, to stdout

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::Path;

use parse_mysql_backtrace::cli::Args;
use parse_mysql_backtrace::domain::{BacktraceError, SystemVersion};
use parse_mysql_backtrace::driver::{BacktraceParser, ParseStats};
use parse_mysql_backtrace::preflight::{check_inputs_exist, check_privileges, warn_missing_tools};
use parse_mysql_backtrace::provision::{detect_system_version, prepare_system};
use parse_mysql_backtrace::symbolization::SystemTool;

// Exit codes
const EXIT_SUCCESS: i32 = 0;
const EXIT_ERROR: i32 = 1;
const EXIT_NOPERM: i32 = 77;

fn main() {
    env_logger::init();
    std::process::exit(match run() {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => {
            let code = exit_code_for(&e);
            eprintln!("error: {e:#}");
            code
        }
    });
}

fn exit_code_for(err: &anyhow::Error) -> i32 {
    let requires_root = err.chain().any(|cause| {
        matches!(cause.downcast_ref::<BacktraceError>(), Some(BacktraceError::RequiresRoot))
    });
    if requires_root {
        EXIT_NOPERM
    } else {
        EXIT_ERROR
    }
}

fn run() -> Result<()> {
    let args = Args::parse();
    check_inputs_exist(&args.inputs)?;

    let system = match &args.system {
        Some(system) => system.clone(),
        None => detect_system_version()?,
    };
    if !system.is_rpm_family() {
        return Err(BacktraceError::UnsupportedSystem(system.to_string()).into());
    }
    info!("system: {system}");

    let tool = SystemTool::new();
    if args.no_install {
        info!("skipping package installation");
    } else {
        check_privileges()?;
        prepare_system(&tool, &system.variant(), &args.provision_config())
            .context("Failed to install debug packages")?;
    }
    warn_missing_tools(args.quiet);

    let stats = resolve_inputs(&tool, &system, &args.inputs)?;
    info!(
        "{} lines, {} frames, {} resolved, {} undecodable",
        stats.lines, stats.frames, stats.resolved, stats.undecodable
    );
    Ok(())
}

/// Feed every input, in order, through one parser writing to stdout
fn resolve_inputs(
    tool: &SystemTool,
    system: &SystemVersion,
    inputs: &[impl AsRef<Path>],
) -> Result<ParseStats> {
    let parser = BacktraceParser::new(tool, system);
    let mut out = io::stdout().lock();
    let mut stats = ParseStats::default();

    if inputs.is_empty() {
        stats += parser.process(io::stdin().lock(), &mut out)?;
    }
    for input in inputs {
        let input = input.as_ref();
        if input.as_os_str() == "-" {
            stats += parser.process(io::stdin().lock(), &mut out)?;
            continue;
        }
        let file =
            File::open(input).with_context(|| format!("Failed to open {}", input.display()))?;
        stats += parser
            .process(BufReader::new(file), &mut out)
            .with_context(|| format!("Failed to resolve {}", input.display()))?;
    }

    out.flush()?;
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_root_exits_noperm() {
        let err = anyhow::Error::from(BacktraceError::RequiresRoot);
        assert_eq!(exit_code_for(&err), EXIT_NOPERM);

        let err = err.context("Failed to install debug packages");
        assert_eq!(exit_code_for(&err), EXIT_NOPERM);
    }

    #[test]
    fn test_io_permission_error_exits_error() {
        let err = anyhow::Error::from(io::Error::from(io::ErrorKind::PermissionDenied))
            .context("Failed to open /var/log/mysqld.log");
        assert_eq!(exit_code_for(&err), EXIT_ERROR);

        let err = anyhow::Error::from(BacktraceError::CommandSpawnFailed {
            command: vec!["addr2line".to_string()],
            source: io::Error::from(io::ErrorKind::PermissionDenied),
        });
        assert_eq!(exit_code_for(&err), EXIT_ERROR);
    }
}
