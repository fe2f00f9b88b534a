//! Domain model for parse-mysql-backtrace
//!
//! This module contains core domain types and errors that provide:
//! - Typed stack frames and symbol table entries instead of regex captures
//! - An explicit system variant instead of string matching
//! - Structured error handling

pub mod errors;
pub mod types;

// Re-export common types for convenience
pub use types::{
    BinaryKind, DebugBinary, RawLocation, StackFrame, SymbolTableEntry, SystemVariant,
    SystemVersion,
};

pub use errors::{BacktraceError, FrameParseError, SymbolLineError};
