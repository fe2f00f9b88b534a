//! Structured error types for parse-mysql-backtrace
//!
//! Using thiserror for automatic Display implementation and error chaining.

use std::path::PathBuf;
use std::process::ExitStatus;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BacktraceError {
    #[error("unsupported system: {0}")]
    UnsupportedSystem(String),

    #[error("unsupported MySQL: {0}")]
    UnsupportedMysql(String),

    #[error(
        "installing debug packages requires root privileges\n\n\
         Run with: sudo parse-mysql-backtrace ...\n\
         or pass --no-install if the debuginfo packages are already installed"
    )]
    RequiresRoot,

    #[error("failed to run: {command:?}: {source}")]
    CommandSpawnFailed { command: Vec<String>, source: std::io::Error },

    #[error("failed to run: {command:?}: {status}")]
    CommandFailed { command: Vec<String>, status: ExitStatus },

    #[error(
        "can't resolve relative address: {location}: {function}: {offset:#x}: {}",
        .path.display()
    )]
    UnresolvedSymbol { location: String, function: String, offset: u64, path: PathBuf },

    #[error("invalid relative address: {0}")]
    InvalidLocation(String),

    #[error("invalid address: {0}")]
    InvalidAddress(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Why a log line is not a stack frame
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FrameParseError {
    #[error("frame must start with an absolute path")]
    MissingPath,

    #[error("binary path is not followed by '('")]
    MissingLocation,

    #[error("location is not followed by '[address]'")]
    MissingAddress,
}

/// Why a symbol table line carries no usable entry
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SymbolLineError {
    #[error("symbol line has no hex address")]
    MissingAddress,

    #[error("symbol line has no type flag")]
    MissingFlag,

    #[error("symbol address {0} is out of range")]
    AddressOverflow(String),
}
