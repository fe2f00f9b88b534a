//! Hand-written tokenizers for crash log and symbol table text
//!
//! Each parser documents its grammar at the top of its module and returns a
//! typed value or a structured reason the input did not match.

pub mod frame;
pub mod number;
pub mod symtab;

pub use frame::parse_frame;
pub use number::{parse_hex, parse_integer};
pub use symtab::parse_symbol_line;
