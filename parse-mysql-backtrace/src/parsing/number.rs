//! Integer literals found in crash logs
//!
//! ```text
//! hex     := ("0x" | "0X")? hexdigit+
//! integer := "0x" hexdigit+ | "0o" octdigit+ | "0b" bindigit+
//!          | "0" octdigit+ | digit+
//! ```
//!
//! A bare leading `0` means octal, as in C: `0755` is 493 and `08` is invalid.
//!
//! `u64::from_str_radix` alone would also accept a leading `+`, which must
//! not be read as part of an offset.

fn parse_digits(digits: &str, radix: u32) -> Option<u64> {
    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return None;
    }
    u64::from_str_radix(digits, radix).ok()
}

/// Parse a hexadecimal number with an optional `0x` prefix.
#[must_use]
pub fn parse_hex(text: &str) -> Option<u64> {
    let digits = text
        .strip_prefix("0x")
        .or_else(|| text.strip_prefix("0X"))
        .unwrap_or(text);
    parse_digits(digits, 16)
}

/// Parse an integer literal whose radix is given by its prefix.
#[must_use]
pub fn parse_integer(text: &str) -> Option<u64> {
    let text = text.trim();
    let lower = text.get(..2).map(str::to_ascii_lowercase);
    match lower.as_deref() {
        Some("0x") => parse_digits(&text[2..], 16),
        Some("0o") => parse_digits(&text[2..], 8),
        Some("0b") => parse_digits(&text[2..], 2),
        _ if text.len() > 1 && text.starts_with('0') => parse_digits(&text[1..], 8),
        _ => parse_digits(text, 10),
    }
}
