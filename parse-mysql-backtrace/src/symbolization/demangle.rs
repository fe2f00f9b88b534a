//! C++ name demangling and comparison
//!
//! Crash logs sometimes carry mangled names (`_ZN2ns3fooEi`) and sometimes
//! demangled ones, while `nm --demangle` always prints demangled names with
//! their argument lists. Comparison therefore ignores the trailing argument
//! list so `ns::foo(int)` and `ns::foo(double)` are the same function.

use super::tool::ExternalTool;
use crate::domain::BacktraceError;

/// Demangle `function` with `c++filt`. Already readable names come back unchanged.
///
/// # Errors
/// Fails if `c++filt` cannot be run.
pub fn demangle<T: ExternalTool + ?Sized>(
    tool: &T,
    function: &str,
) -> Result<String, BacktraceError> {
    let output = tool.capture("c++filt", &[function])?;
    let output = output.strip_suffix('\n').unwrap_or(&output);
    let output = output.strip_suffix('\r').unwrap_or(output);
    Ok(output.to_string())
}

/// Strip a trailing parenthesized argument list.
///
/// Everything from the first `(` on the last line is dropped when the name
/// ends in `)`. Names without a trailing `)` are returned unchanged.
#[must_use]
pub fn normalize_function(function: &str) -> &str {
    if !function.ends_with(')') {
        return function;
    }
    let line_start = function.rfind('\n').map_or(0, |newline| newline + 1);
    match function[line_start..].find('(') {
        Some(open) => &function[..line_start + open],
        None => function,
    }
}

/// Exact match, or match once both argument lists are stripped
#[must_use]
pub fn match_function(function: &str, base_function: &str) -> bool {
    function == base_function || normalize_function(function) == normalize_function(base_function)
}
