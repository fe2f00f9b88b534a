//! # parse-mysql-backtrace - MySQL Crash Backtrace Resolver
//!
//! When `mysqld` crashes it writes a raw backtrace to its error log. Frames
//! from the Mroonga storage engine and the Groonga library look like this:
//!
//! ```text
//! /usr/lib64/mysql/plugin/ha_mroonga.so(_ZN10ha_mroonga5writeEPh+0x12)[0x7f3c2a1b1234]
//! /usr/lib64/libgroonga.so.0(grn_ctx_init+0x20)[0x7f3c2a0a1020]
//! /usr/sbin/mysqld(+0x1c2f00)[0x55d0001c2f00]
//! ```
//!
//! This crate echoes each frame followed by the `file:line` it came from.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                 Provisioning (startup only)                  │
//! │  /etc/system-release-cpe ──▶ SystemVersion ──▶ yum install   │
//! │                                   *-debuginfo packages       │
//! └──────────────────────────────┬───────────────────────────────┘
//!                                │ debug files under /usr/lib/debug
//!                                ▼
//! ┌──────────────────────────────────────────────────────────────┐
//! │                     Driver (per line)                        │
//! │                                                              │
//! │  ┌──────────┐   ┌────────────┐   ┌──────────────────┐        │
//! │  │  Frame   │──▶│ Debug path │──▶│ Library?  Symbol │──┐     │
//! │  │  parser  │   │  resolver  │   │ Resolver (nm)    │  │     │
//! │  └──────────┘   └────────────┘   └──────────────────┘  ▼     │
//! │                                  ┌──────────────────────────┐│
//! │                                  │ Line Resolver (addr2line)││
//! │                                  └──────────────────────────┘│
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Structure
//!
//! - [`parsing`]: hand-written tokenizers for frame lines and `nm` output
//! - [`symbolization`]: symbol+offset lookup, debug file lookup, `addr2line`
//! - [`driver`]: the line loop tying the resolvers together
//! - [`provision`]: OS detection and debuginfo package installation
//! - [`preflight`]: privilege, input and toolchain checks
//! - [`cli`]: command-line argument parsing and configuration
//! - [`domain`]: core domain types and errors
//!
//! ## Typical Usage
//!
//! ```bash
//! # Install matching debug packages and resolve a log
//! sudo parse-mysql-backtrace --mysql=mysql-8.0.22 /var/log/mysqld.log
//!
//! # Debug packages already installed
//! parse-mysql-backtrace --no-install < /var/log/mysqld.log
//! ```

pub mod cli;
pub mod domain;
pub mod driver;
pub mod parsing;
pub mod preflight;
pub mod provision;
pub mod symbolization;
