//! Explicit diagnostic logger.
//!
//! Every analysis owns one [`Tracer`] and hands it to the components that
//! may hit a non-fatal resolution miss. Misses are always recorded so callers
//! can inspect them; they are forwarded to `tracing` only when the tracer is
//! verbose.

use std::cell::RefCell;
use std::fmt;

use compact_str::CompactString;

/// Why a reference contributed nothing to the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MissKind {
    /// The module specifier could not be mapped to a candidate file.
    UnresolvedSpecifier,
    /// The resolved file does not exist.
    FileNotFound,
    /// The file exists but could not be read.
    Unreadable,
    /// A dependency failed to parse.
    ParseFailed,
    /// The module has no matching export.
    ExportNotFound,
    /// The declaration exists but its shape is not a supported literal.
    UnsupportedShape,
    /// The reference re-enters a `(module, export)` pair already on the chain.
    Cycle,
}

impl MissKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::UnresolvedSpecifier => "unresolved-specifier",
            Self::FileNotFound => "file-not-found",
            Self::Unreadable => "unreadable",
            Self::ParseFailed => "parse-failed",
            Self::ExportNotFound => "export-not-found",
            Self::UnsupportedShape => "unsupported-shape",
            Self::Cycle => "cycle",
        }
    }
}

impl fmt::Display for MissKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A recorded resolution miss.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolveMiss {
    pub kind: MissKind,
    pub detail: CompactString,
}

/// Per-analysis logger.
#[derive(Debug, Default)]
pub struct Tracer {
    verbose: bool,
    misses: RefCell<Vec<ResolveMiss>>,
}

impl Tracer {
    pub fn new(verbose: bool) -> Self {
        Self {
            verbose,
            misses: RefCell::new(Vec::new()),
        }
    }

    /// A tracer that records misses without emitting log events.
    pub fn quiet() -> Self {
        Self::new(false)
    }

    /// Record a non-fatal miss.
    pub fn miss(&self, kind: MissKind, detail: impl Into<CompactString>) {
        let detail = detail.into();
        if self.verbose {
            tracing::debug!(target: "sinopia", kind = kind.as_str(), "{}", detail);
        }
        self.misses.borrow_mut().push(ResolveMiss { kind, detail });
    }

    /// Emit a debug event for a successful step. No-op unless verbose.
    pub fn step(&self, message: fmt::Arguments<'_>) {
        if self.verbose {
            tracing::debug!(target: "sinopia", "{}", message);
        }
    }

    /// Emit a warning. Warnings are not gated on verbosity.
    pub fn warn(&self, message: fmt::Arguments<'_>) {
        tracing::warn!(target: "sinopia", "{}", message);
    }

    /// Snapshot of every miss recorded so far.
    pub fn misses(&self) -> Vec<ResolveMiss> {
        self.misses.borrow().clone()
    }

    /// Whether any recorded miss has the given kind.
    pub fn has_miss(&self, kind: MissKind) -> bool {
        self.misses.borrow().iter().any(|m| m.kind == kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_misses_when_quiet() {
        let tracer = Tracer::quiet();
        tracer.miss(MissKind::FileNotFound, "./missing.ts");
        tracer.miss(MissKind::Cycle, "./a.ts#events");
        let misses = tracer.misses();
        assert_eq!(misses.len(), 2);
        assert_eq!(misses[0].kind, MissKind::FileNotFound);
        assert_eq!(misses[0].detail, "./missing.ts");
        assert!(tracer.has_miss(MissKind::Cycle));
        assert!(!tracer.has_miss(MissKind::ParseFailed));
    }

    #[test]
    fn test_miss_kind_display() {
        assert_eq!(MissKind::ExportNotFound.to_string(), "export-not-found");
    }
}
