//! Locating installed `-debuginfo` files
//!
//! RPM debuginfo packages mirror the installed tree under `/usr/lib/debug`,
//! so `/usr/lib64/libgroonga.so.0` is described by something like
//! `/usr/lib/debug/usr/lib64/libgroonga.so.0.0.0-10.0.9-1.el7.x86_64.debug`.
//! The lookup is the glob `<root><path>*.debug`.

use log::{debug, warn};
use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::{BacktraceError, DebugBinary, SystemVersion};

/// Where RPM-based systems install separate debug files
pub const DEFAULT_DEBUG_ROOT: &str = "/usr/lib/debug";

const DEBUG_SUFFIX: &str = ".debug";

/// Find the debug file for `path` under [`DEFAULT_DEBUG_ROOT`].
///
/// # Errors
/// Returns [`BacktraceError::UnsupportedSystem`] for systems whose debug
/// layout is unknown.
pub fn resolve_debug_path(
    path: &str,
    system: &SystemVersion,
) -> Result<DebugBinary, BacktraceError> {
    resolve_debug_path_in(Path::new(DEFAULT_DEBUG_ROOT), path, system)
}

/// Find the debug file for `path` under `root`.
///
/// The first match in lexical order wins. Without a match the declared
/// path itself is used, which still works for unstripped binaries.
///
/// # Errors
/// Returns [`BacktraceError::UnsupportedSystem`] for systems whose debug
/// layout is unknown.
pub fn resolve_debug_path_in(
    root: &Path,
    path: &str,
    system: &SystemVersion,
) -> Result<DebugBinary, BacktraceError> {
    if !system.is_rpm_family() {
        return Err(BacktraceError::UnsupportedSystem(system.to_string()));
    }

    let declared_path = PathBuf::from(path);
    let resolved_path = find_debug_file(root, path).unwrap_or_else(|| {
        warn!("no debug file for {path} under {}", root.display());
        declared_path.clone()
    });
    debug!("{path} -> {}", resolved_path.display());

    Ok(DebugBinary { declared_path, resolved_path })
}

/// `<root><path>*.debug`: same directory, file name starting with the
/// binary's file name and ending in `.debug`
fn find_debug_file(root: &Path, path: &str) -> Option<PathBuf> {
    let (directory, prefix) = path.rsplit_once('/')?;
    if prefix.is_empty() {
        return None;
    }
    let directory = root.join(directory.trim_start_matches('/'));

    let mut matches: Vec<PathBuf> = fs::read_dir(&directory)
        .ok()?
        .flatten()
        .map(|entry| entry.file_name())
        .filter(|name| is_debug_file_for(name, prefix))
        .map(|name| directory.join(name))
        .collect();
    matches.sort();
    matches.into_iter().next()
}

fn is_debug_file_for(name: &OsStr, prefix: &str) -> bool {
    name.to_str().is_some_and(|name| {
        name.len() >= prefix.len() + DEBUG_SUFFIX.len()
            && name.starts_with(prefix)
            && name.ends_with(DEBUG_SUFFIX)
    })
}
