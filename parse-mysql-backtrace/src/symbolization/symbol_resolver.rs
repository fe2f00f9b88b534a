//! Symbol+offset to address translation
//!
//! Library frames are printed relative to a function (`ns::foo(int)+0x20`).
//! `addr2line` needs an address in the debug binary instead, so the function
//! is looked up in the debug binary's symbol table and the offset added.

use log::debug;
use std::path::Path;

use super::demangle::{demangle, match_function};
use super::tool::ExternalTool;
use crate::domain::{BacktraceError, RawLocation, SymbolTableEntry};
use crate::parsing::parse_symbol_line;

/// Resolves raw frame locations against a binary's symbol table
pub struct SymbolResolver<'a, T: ExternalTool + ?Sized> {
    tool: &'a T,
}

impl<'a, T: ExternalTool + ?Sized> SymbolResolver<'a, T> {
    pub fn new(tool: &'a T) -> Self {
        Self { tool }
    }

    /// Translate `raw_location` into an address inside `path`.
    ///
    /// `+<hex>` locations are already offsets and are returned as is, without
    /// touching the symbol table. `<function>+<hex>` locations resolve to the
    /// address of the first symbol table entry matching `function` plus the
    /// offset. When several entries normalize to the same name the first one
    /// listed by `nm` wins.
    ///
    /// # Errors
    /// - [`BacktraceError::InvalidLocation`] if `raw_location` cannot be split
    /// - [`BacktraceError::UnresolvedSymbol`] if no entry matches
    /// - any failure running `c++filt` or `nm`
    pub fn resolve_relative_address(
        &self,
        raw_location: &str,
        path: &Path,
    ) -> Result<u64, BacktraceError> {
        match RawLocation::parse(raw_location)? {
            RawLocation::Offset(offset) => Ok(offset),
            RawLocation::Symbol { function, offset } => {
                let base_function = demangle(self.tool, function)?;
                let Some(entry) = self.find_symbol(&base_function, path)? else {
                    return Err(BacktraceError::UnresolvedSymbol {
                        location: raw_location.to_string(),
                        function: base_function,
                        offset,
                        path: path.to_path_buf(),
                    });
                };
                debug!("{base_function} is {} at {:#x}", entry.name, entry.address);
                entry.address.checked_add(offset).ok_or_else(|| {
                    BacktraceError::InvalidAddress(format!("{:#x}+{offset:#x}", entry.address))
                })
            }
        }
    }

    /// First entry of `nm --demangle <path>` naming `base_function`
    fn find_symbol(
        &self,
        base_function: &str,
        path: &Path,
    ) -> Result<Option<SymbolTableEntry>, BacktraceError> {
        let path = path.to_string_lossy();
        let symbols = self.tool.capture("nm", &["--demangle", &*path])?;
        Ok(symbols
            .lines()
            .filter_map(|line| parse_symbol_line(line).ok())
            .find(|entry| match_function(&entry.name, base_function)))
    }
}
