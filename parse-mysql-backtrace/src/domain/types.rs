//! Core domain types
//!
//! Everything here is built once per log line (or per resolution call) and
//! dropped as soon as the line has been printed. Nothing is cached.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use super::errors::BacktraceError;
use crate::parsing::number::{parse_hex, parse_integer};

/// One frame from a crash log: `<binary_path>(<raw_location>)[<absolute_address>]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StackFrame {
    pub binary_path: String,
    /// `<symbol>+<hexoffset>` or `+<hexoffset>`
    pub raw_location: String,
    /// Address text exactly as it appeared between the brackets
    pub absolute_address: String,
}

impl StackFrame {
    /// Integer value of the bracketed address (`0x` prefix means hex)
    ///
    /// # Errors
    /// Returns [`BacktraceError::InvalidAddress`] if the text is not an integer literal.
    pub fn parse_absolute_address(&self) -> Result<u64, BacktraceError> {
        parse_integer(&self.absolute_address)
            .ok_or_else(|| BacktraceError::InvalidAddress(self.absolute_address.clone()))
    }

    /// Which known binary produced this frame
    #[must_use]
    pub fn kind(&self) -> BinaryKind {
        BinaryKind::from_path(&self.binary_path)
    }
}

/// Decoded form of [`StackFrame::raw_location`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawLocation<'a> {
    /// `+<hexoffset>`: offset from the binary's own load base
    Offset(u64),
    /// `<function>+<hexoffset>`: offset from a named function
    Symbol { function: &'a str, offset: u64 },
}

impl<'a> RawLocation<'a> {
    /// Split a raw location on its first `+`.
    ///
    /// # Errors
    /// Returns [`BacktraceError::InvalidLocation`] when there is no `+` or the
    /// offset is not hexadecimal.
    pub fn parse(text: &'a str) -> Result<Self, BacktraceError> {
        let invalid = || BacktraceError::InvalidLocation(text.to_string());

        if let Some(offset) = text.strip_prefix('+') {
            return parse_hex(offset).map(RawLocation::Offset).ok_or_else(invalid);
        }

        let (function, offset) = text.split_once('+').ok_or_else(invalid)?;
        let offset = parse_hex(offset).ok_or_else(invalid)?;
        Ok(RawLocation::Symbol { function, offset })
    }
}

/// One `<hex-address> <flag> <name>` line of a demangled symbol table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolTableEntry {
    pub address: u64,
    /// Demangled name, `::__FUNCTION__` alias suffix already removed
    pub name: String,
}

/// Binary named in a frame and the debug file actually used for it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DebugBinary {
    pub declared_path: PathBuf,
    pub resolved_path: PathBuf,
}

impl DebugBinary {
    /// Path to hand to `nm` and `addr2line`
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.resolved_path
    }

    /// True when no separate debug file was found
    #[must_use]
    pub fn is_fallback(&self) -> bool {
        self.declared_path == self.resolved_path
    }
}

/// Binaries whose frames get symbolicated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryKind {
    /// Groonga or the Mroonga storage engine plugin; frames use symbol+offset
    Library,
    /// `mysqld` itself; frames carry a usable absolute address
    Server,
    /// Anything else is echoed only
    Other,
}

impl BinaryKind {
    #[must_use]
    pub fn from_path(path: &str) -> Self {
        if path.contains("libgroonga") || path.contains("ha_mroonga") {
            BinaryKind::Library
        } else if path.contains("mysqld") {
            BinaryKind::Server
        } else {
            BinaryKind::Other
        }
    }
}

/// OS fingerprint rendered as `<id>-<version>`, e.g. `centos-7`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemVersion {
    pub id: String,
    pub version: String,
}

impl SystemVersion {
    #[must_use]
    pub fn new(id: impl Into<String>, version: impl Into<String>) -> Self {
        Self { id: id.into(), version: version.into() }
    }

    /// CentOS or Amazon Linux of any release; these share the
    /// `/usr/lib/debug` layout of `-debuginfo` packages.
    #[must_use]
    pub fn is_rpm_family(&self) -> bool {
        let rendered = self.to_string();
        rendered.starts_with("centos-") || rendered.starts_with("amazon-")
    }

    #[must_use]
    pub fn variant(&self) -> SystemVariant {
        SystemVariant::from(self)
    }
}

impl fmt::Display for SystemVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.id, self.version)
    }
}

impl FromStr for SystemVersion {
    type Err = BacktraceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.rsplit_once('-') {
            Some((id, version)) if !id.is_empty() && !version.is_empty() => {
                Ok(Self::new(id, version))
            }
            _ => Err(BacktraceError::UnsupportedSystem(s.to_string())),
        }
    }
}

/// Systems the provisioning collaborator knows how to prepare
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SystemVariant {
    CentOs7,
    Amazon2,
    Unsupported(String),
}

impl From<&SystemVersion> for SystemVariant {
    fn from(system: &SystemVersion) -> Self {
        match (system.id.as_str(), system.version.as_str()) {
            ("centos", "7") => SystemVariant::CentOs7,
            ("amazon", "2") => SystemVariant::Amazon2,
            _ => SystemVariant::Unsupported(system.to_string()),
        }
    }
}
