//! # Address Resolution
//!
//! Turns a crash-log frame into the `file:line` that produced it, using the
//! binutils found on the host rather than parsing DWARF in-process.
//!
//! ## Two Addressing Conventions
//!
//! `backtrace_symbols_fd(3)` prints every frame as
//! `<binary>(<symbol>+<offset>)[<address>]`, but what is actually usable
//! differs per binary:
//!
//! ```text
//! /usr/lib64/libgroonga.so.0(grn_ctx_init+0x20)[0x7f3c2a1b1234]
//!                            └── symbol+offset ──┘ └ runtime address, randomized ┘
//!
//! /usr/sbin/mysqld(+0x1c2f00)[0x55d0001c2f00]
//!                  └ no symbol ┘ └ address usable as is ┘
//! ```
//!
//! - **Library frames** (Groonga, Mroonga): the runtime address depends on
//!   where the library was mapped, so it is discarded. The symbol is looked
//!   up in the debug binary's symbol table and the offset added.
//! - **Server frames** (`mysqld`): the bracketed address goes straight to
//!   `addr2line`.
//!
//! ```text
//! 1. ns::foo(int)+0x20 ──c++filt──▶ ns::foo(int)
//! 2. nm --demangle libgroonga...debug
//!      0000000000001000 T ns::foo(double)   ◀── argument lists ignored
//! 3. 0x1000 + 0x20 = 0x1020
//! 4. addr2line --exe=libgroonga...debug 0x1020
//!      /build/groonga/lib/ctx.c:123
//! ```
//!
//! ## Module Structure
//!
//! - **`tool`**: [`ExternalTool`] capability and the process-backed [`SystemTool`]
//! - **`demangle`**: `c++filt` wrapper and argument-list-insensitive comparison
//! - **`symbol_resolver`**: symbol+offset to address
//! - **`debug_path`**: locating `/usr/lib/debug/...*.debug` files
//! - **`line_resolver`**: `addr2line` invocation
//!
//! ## Limitations
//!
//! - When several symbols normalize to the same name, the first one `nm`
//!   prints is used. Overloads that differ only in argument types can
//!   therefore resolve to the wrong body.
//! - Nothing is cached: the symbol table is dumped again for every library frame.

pub mod debug_path;
pub mod demangle;
pub mod line_resolver;
pub mod symbol_resolver;
pub mod tool;

pub use debug_path::{resolve_debug_path, resolve_debug_path_in, DEFAULT_DEBUG_ROOT};
pub use demangle::{demangle, match_function, normalize_function};
pub use line_resolver::addr2line;
pub use symbol_resolver::SymbolResolver;
pub use tool::{ExternalTool, SystemTool};
