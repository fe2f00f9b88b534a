//! Host OS identification from `/etc/system-release-cpe`
//!
//! The file holds a single CPE name such as `cpe:/o:centos:centos:7` or
//! `cpe:2.3:o:amazon:amazon_linux:2`. The version is the last field and the
//! vendor id the third from last.

use log::info;
use std::fs;
use std::path::Path;

use crate::domain::{BacktraceError, SystemVersion};

pub const SYSTEM_RELEASE_CPE: &str = "/etc/system-release-cpe";

/// Identify the running system.
///
/// # Errors
/// Returns [`BacktraceError::UnsupportedSystem`] when the system publishes no
/// CPE name, or an I/O error if it cannot be read.
pub fn detect_system_version() -> Result<SystemVersion, BacktraceError> {
    detect_system_version_from(Path::new(SYSTEM_RELEASE_CPE))
}

/// Identify the system described by the CPE file at `path`.
///
/// # Errors
/// Same as [`detect_system_version`].
pub fn detect_system_version_from(path: &Path) -> Result<SystemVersion, BacktraceError> {
    if !path.exists() {
        return Err(BacktraceError::UnsupportedSystem(format!("{} not found", path.display())));
    }
    let system = parse_cpe(&fs::read_to_string(path)?)?;
    info!("detected system {system}");
    Ok(system)
}

/// Extract `<id>-<version>` from a CPE name.
///
/// # Errors
/// Returns [`BacktraceError::UnsupportedSystem`] when there are fewer than
/// three fields.
pub fn parse_cpe(cpe: &str) -> Result<SystemVersion, BacktraceError> {
    let cpe = cpe.trim_end_matches(['\r', '\n']);
    let components: Vec<&str> = cpe.split(':').collect();
    match components.as_slice() {
        [.., id, _, version] => Ok(SystemVersion::new(*id, *version)),
        _ => Err(BacktraceError::UnsupportedSystem(cpe.to_string())),
    }
}
