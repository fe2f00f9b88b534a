//! Address to `file:line` via binutils `addr2line`

use std::io::Write;
use std::path::Path;

use super::tool::ExternalTool;
use crate::domain::BacktraceError;

/// Run `addr2line --exe=<path> <address>` and copy its output to `out` unchanged.
///
/// # Errors
/// Fails if `addr2line` fails or `out` cannot be written.
pub fn addr2line<T, W>(
    tool: &T,
    path: &Path,
    address: u64,
    out: &mut W,
) -> Result<(), BacktraceError>
where
    T: ExternalTool + ?Sized,
    W: Write + ?Sized,
{
    let exe = format!("--exe={}", path.display());
    let address = format!("{address:#x}");
    let location = tool.capture("addr2line", &[exe.as_str(), address.as_str()])?;
    out.write_all(location.as_bytes())?;
    Ok(())
}
