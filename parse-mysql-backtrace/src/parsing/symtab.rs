//! Lines of `nm --demangle` output
//!
//! ```text
//! line := hexdigit+ " " flag " " name
//! flag := any single non-space character (T, t, W, ...)
//! name := rest of the line, surrounding whitespace trimmed
//! ```
//!
//! Undefined symbols (`                 U foo`) have no address and are rejected.

use crate::domain::{SymbolLineError, SymbolTableEntry};

/// GCC emits `fn::__FUNCTION__` objects for `__FUNCTION__` uses; the debug
/// binary never names a function that way.
const FUNCTION_ALIAS_SUFFIX: &str = "::__FUNCTION__";

/// Parse one symbol table line.
///
/// # Errors
/// Returns why the line does not describe a symbol with an address.
pub fn parse_symbol_line(line: &str) -> Result<SymbolTableEntry, SymbolLineError> {
    let digits = line.find(|c: char| !c.is_ascii_hexdigit()).unwrap_or(line.len());
    if digits == 0 {
        return Err(SymbolLineError::MissingAddress);
    }
    let (address, rest) = line.split_at(digits);

    let mut chars = rest.chars();
    let flag = match (chars.next(), chars.next(), chars.next()) {
        (Some(' '), Some(flag), Some(' ')) if !flag.is_whitespace() => flag,
        _ => return Err(SymbolLineError::MissingFlag),
    };
    let name = rest[2 + flag.len_utf8()..].trim();
    let name = name.strip_suffix(FUNCTION_ALIAS_SUFFIX).unwrap_or(name);

    let address = u64::from_str_radix(address, 16)
        .map_err(|_| SymbolLineError::AddressOverflow(address.to_string()))?;

    Ok(SymbolTableEntry { address, name: name.to_string() })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_function_symbol() {
        let entry = parse_symbol_line("0000000000001000 T ns::foo(double)\n").unwrap();
        assert_eq!(entry.address, 0x1000);
        assert_eq!(entry.name, "ns::foo(double)");
    }

    #[test]
    fn test_function_alias_suffix_removed() {
        let entry =
            parse_symbol_line("00000000000a2b40 r grn_ctx_init::__FUNCTION__").unwrap();
        assert_eq!(entry.address, 0xa2b40);
        assert_eq!(entry.name, "grn_ctx_init");
    }

    #[test]
    fn test_name_with_spaces() {
        let line = "0000000000002000 W std::vector<int, std::allocator<int> >::~vector()";
        let entry = parse_symbol_line(line).unwrap();
        assert_eq!(entry.name, "std::vector<int, std::allocator<int> >::~vector()");
    }

    #[test]
    fn test_undefined_symbol_rejected() {
        assert_eq!(
            parse_symbol_line("                 U malloc"),
            Err(SymbolLineError::MissingAddress)
        );
    }

    #[test]
    fn test_malformed_flag_rejected() {
        assert_eq!(parse_symbol_line("0000000000001000"), Err(SymbolLineError::MissingFlag));
        assert_eq!(parse_symbol_line("0000000000001000 T"), Err(SymbolLineError::MissingFlag));
        assert_eq!(parse_symbol_line("0000000000001000  T foo"), Err(SymbolLineError::MissingFlag));
        assert_eq!(parse_symbol_line("0000000000001000 Tx foo"), Err(SymbolLineError::MissingFlag));
    }

    #[test]
    fn test_address_overflow() {
        assert!(matches!(
            parse_symbol_line("10000000000000000 T foo"),
            Err(SymbolLineError::AddressOverflow(_))
        ));
    }
}
