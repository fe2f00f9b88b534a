//! Crash log processing loop
//!
//! Every line is handled on its own: frames are echoed and, for known
//! binaries, followed by what `addr2line` says about them. Everything else
//! is dropped from the output.

use log::trace;
use std::io::{BufRead, Write};
use std::ops::AddAssign;
use std::path::PathBuf;

use crate::domain::{BacktraceError, BinaryKind, SystemVersion};
use crate::parsing::parse_frame;
use crate::symbolization::{
    addr2line, resolve_debug_path_in, ExternalTool, SymbolResolver, DEFAULT_DEBUG_ROOT,
};

/// What happened to one input line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineOutcome {
    /// Not a stack frame; nothing written
    NotAFrame,
    /// Frame of an unknown binary; echoed only
    Echoed,
    /// Frame echoed and followed by its source location
    Resolved,
}

/// Counters for one run
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ParseStats {
    pub lines: usize,
    pub undecodable: usize,
    pub frames: usize,
    pub resolved: usize,
}

impl ParseStats {
    fn record(&mut self, outcome: LineOutcome) {
        match outcome {
            LineOutcome::NotAFrame => {}
            LineOutcome::Echoed => self.frames += 1,
            LineOutcome::Resolved => {
                self.frames += 1;
                self.resolved += 1;
            }
        }
    }
}

impl AddAssign for ParseStats {
    fn add_assign(&mut self, other: Self) {
        self.lines += other.lines;
        self.undecodable += other.undecodable;
        self.frames += other.frames;
        self.resolved += other.resolved;
    }
}

/// Reads a crash log and writes the resolved backtrace
pub struct BacktraceParser<'a, T: ExternalTool + ?Sized> {
    tool: &'a T,
    system: &'a SystemVersion,
    debug_root: PathBuf,
}

impl<'a, T: ExternalTool + ?Sized> BacktraceParser<'a, T> {
    pub fn new(tool: &'a T, system: &'a SystemVersion) -> Self {
        Self { tool, system, debug_root: PathBuf::from(DEFAULT_DEBUG_ROOT) }
    }

    /// Look for debug files somewhere other than `/usr/lib/debug`
    #[must_use]
    pub fn with_debug_root(mut self, debug_root: impl Into<PathBuf>) -> Self {
        self.debug_root = debug_root.into();
        self
    }

    /// Process `input` line by line until EOF.
    ///
    /// Lines that are not valid UTF-8 are skipped. Any other failure stops
    /// the run; whatever was already written to `out` stays there.
    ///
    /// # Errors
    /// The first resolution, command or I/O failure.
    pub fn process<R, W>(&self, mut input: R, out: &mut W) -> Result<ParseStats, BacktraceError>
    where
        R: BufRead,
        W: Write + ?Sized,
    {
        let mut stats = ParseStats::default();
        let mut buffer = Vec::new();

        loop {
            buffer.clear();
            if input.read_until(b'\n', &mut buffer)? == 0 {
                break;
            }
            stats.lines += 1;

            let Ok(line) = std::str::from_utf8(&buffer) else {
                trace!("skipping undecodable line {}", stats.lines);
                stats.undecodable += 1;
                continue;
            };
            stats.record(self.process_line(line, out)?);
        }

        Ok(stats)
    }

    /// Echo and resolve a single line.
    ///
    /// # Errors
    /// The first resolution, command or I/O failure.
    pub fn process_line<W>(&self, line: &str, out: &mut W) -> Result<LineOutcome, BacktraceError>
    where
        W: Write + ?Sized,
    {
        let Ok(frame) = parse_frame(line) else {
            return Ok(LineOutcome::NotAFrame);
        };
        let binary = resolve_debug_path_in(&self.debug_root, &frame.binary_path, self.system)?;

        out.write_all(line.as_bytes())?;
        if !line.ends_with('\n') {
            out.write_all(b"\n")?;
        }

        let address = match frame.kind() {
            BinaryKind::Library => SymbolResolver::new(self.tool)
                .resolve_relative_address(&frame.raw_location, binary.path())?,
            BinaryKind::Server => frame.parse_absolute_address()?,
            BinaryKind::Other => return Ok(LineOutcome::Echoed),
        };
        addr2line(self.tool, binary.path(), address, out)?;

        Ok(LineOutcome::Resolved)
    }
}
