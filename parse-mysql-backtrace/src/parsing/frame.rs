//! Stack frame lines as written by `backtrace_symbols_fd(3)` into the MySQL error log
//!
//! ```text
//! frame    := path "(" location ")" space* "[" address "]" anything
//! path     := "/" pathchar+            pathchar: anything but ' ', '(' and '['
//! location := char+                    shortest run that lets the rest match
//! address  := char+                    shortest run up to the next ']'
//! char     := anything but '\n'
//! ```
//!
//! `location` may itself contain parentheses (`ns::foo(int)+0x20`), so every
//! `)` is tried in turn until one is followed by a bracketed address.

use crate::domain::{FrameParseError, StackFrame};

fn is_space(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\r' | '\n' | '\x0B' | '\x0C')
}

/// Parse one log line into a [`StackFrame`].
///
/// # Errors
/// Returns which part of the grammar the line failed to satisfy.
pub fn parse_frame(line: &str) -> Result<StackFrame, FrameParseError> {
    let after_slash = line.strip_prefix('/').ok_or(FrameParseError::MissingPath)?;
    let path_len = after_slash.find([' ', '(', '[']).unwrap_or(after_slash.len());
    if path_len == 0 {
        return Err(FrameParseError::MissingPath);
    }
    let binary_path = &line[..=path_len];

    let rest = after_slash[path_len..]
        .strip_prefix('(')
        .ok_or(FrameParseError::MissingLocation)?;

    for (close, _) in rest.match_indices(')') {
        if close == 0 {
            continue;
        }
        let raw_location = &rest[..close];
        if raw_location.contains('\n') {
            break;
        }
        if let Some(absolute_address) = bracketed(&rest[close + 1..]) {
            return Ok(StackFrame {
                binary_path: binary_path.to_string(),
                raw_location: raw_location.to_string(),
                absolute_address: absolute_address.to_string(),
            });
        }
    }

    Err(FrameParseError::MissingAddress)
}

/// `space* "[" address "]"` at the start of `text`, returning `address`
fn bracketed(text: &str) -> Option<&str> {
    let inner = text.trim_start_matches(is_space).strip_prefix('[')?;
    let first = inner.chars().next()?;
    let close = first.len_utf8() + inner[first.len_utf8()..].find(']')?;
    let address = &inner[..close];
    (!address.contains('\n')).then_some(address)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_frame() {
        let frame =
            parse_frame("/usr/lib64/libgroonga.so.0(ns::foo(int)+0x20)[0x7f0000001234]\n").unwrap();
        assert_eq!(frame.binary_path, "/usr/lib64/libgroonga.so.0");
        assert_eq!(frame.raw_location, "ns::foo(int)+0x20");
        assert_eq!(frame.absolute_address, "0x7f0000001234");
    }

    #[test]
    fn test_server_frame_without_symbol() {
        let frame = parse_frame("/usr/sbin/mysqld(+0x500)[0x55d000002000]").unwrap();
        assert_eq!(frame.binary_path, "/usr/sbin/mysqld");
        assert_eq!(frame.raw_location, "+0x500");
        assert_eq!(frame.absolute_address, "0x55d000002000");
    }

    #[test]
    fn test_space_before_address() {
        let frame = parse_frame("/usr/sbin/mysqld(handle_fatal_signal+0x2a) [0x1234]").unwrap();
        assert_eq!(frame.raw_location, "handle_fatal_signal+0x2a");
        assert_eq!(frame.absolute_address, "0x1234");
    }

    #[test]
    fn test_trailing_text_is_ignored() {
        let frame = parse_frame("/lib64/libc.so.6(clone+0x6d)[0x7f00] extra").unwrap();
        assert_eq!(frame.binary_path, "/lib64/libc.so.6");
        assert_eq!(frame.absolute_address, "0x7f00");
    }

    #[test]
    fn test_not_a_frame() {
        assert_eq!(
            parse_frame("2020-10-10T00:00:00Z 0 [ERROR] mysqld got signal 11 ;"),
            Err(FrameParseError::MissingPath)
        );
        assert_eq!(parse_frame("/(x)[0x1]"), Err(FrameParseError::MissingPath));
        assert_eq!(parse_frame("/usr/sbin/mysqld [0x1]"), Err(FrameParseError::MissingLocation));
        assert_eq!(parse_frame("/usr/sbin/mysqld()[0x1]"), Err(FrameParseError::MissingAddress));
        assert_eq!(parse_frame("/usr/sbin/mysqld(+0x1)"), Err(FrameParseError::MissingAddress));
        assert_eq!(parse_frame("/usr/sbin/mysqld(+0x1)[]"), Err(FrameParseError::MissingAddress));
    }

    #[test]
    fn test_empty_location_is_not_a_match() {
        // the location must be at least one character long, so the first ')' is skipped
        let frame = parse_frame("/bin/x())[0x1]").unwrap();
        assert_eq!(frame.raw_location, ")");
    }
}
