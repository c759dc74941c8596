//! Terminal outcomes, one per fetch request, and the run summary.
//!
//! The core never prints; callers render reports (`symbol()` + `Display`).

use std::fmt;
use std::path::PathBuf;

/// One input URL. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub url: String,
}

impl FetchRequest {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

/// How processing of a single URL ended. Produced exactly once per request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// Written to this path.
    Success(PathBuf),
    /// URL already processed in this run.
    DuplicateSkip,
    /// A file with the resolved name already exists; nothing written.
    CollisionSkip(PathBuf),
    /// Declared `Content-Type` matched no supported marker.
    RejectedType(String),
    /// Declared (or streamed) size exceeded the ceiling.
    RejectedSize(u64),
    NetworkError(String),
    UnexpectedError(String),
}

impl FetchOutcome {
    /// Success and the two skips are fine; everything else is a failure.
    pub fn is_ok(&self) -> bool {
        matches!(
            self,
            FetchOutcome::Success(_) | FetchOutcome::DuplicateSkip | FetchOutcome::CollisionSkip(_)
        )
    }

    /// Status marker for console output: `✓` or `✗`.
    pub fn symbol(&self) -> char {
        if self.is_ok() {
            '✓'
        } else {
            '✗'
        }
    }

    /// Short stable label, used as a log field.
    pub fn label(&self) -> &'static str {
        match self {
            FetchOutcome::Success(_) => "success",
            FetchOutcome::DuplicateSkip => "duplicate",
            FetchOutcome::CollisionSkip(_) => "collision",
            FetchOutcome::RejectedType(_) => "rejected-type",
            FetchOutcome::RejectedSize(_) => "rejected-size",
            FetchOutcome::NetworkError(_) => "network-error",
            FetchOutcome::UnexpectedError(_) => "unexpected-error",
        }
    }
}

impl fmt::Display for FetchOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchOutcome::Success(path) => write!(f, "saved to {}", path.display()),
            FetchOutcome::DuplicateSkip => write!(f, "already fetched"),
            FetchOutcome::CollisionSkip(path) => {
                write!(f, "a file named {} already exists", path.display())
            }
            FetchOutcome::RejectedType(ct) => {
                if ct.is_empty() {
                    write!(f, "not a supported image type (no Content-Type)")
                } else {
                    write!(f, "not a supported image type ({})", ct)
                }
            }
            FetchOutcome::RejectedSize(n) => write!(f, "file size {} bytes exceeds the limit", n),
            FetchOutcome::NetworkError(d) => write!(f, "connection error: {}", d),
            FetchOutcome::UnexpectedError(d) => write!(f, "unexpected error: {}", d),
        }
    }
}

/// Outcome paired with the URL it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchReport {
    pub url: String,
    pub outcome: FetchOutcome,
}

impl fmt::Display for FetchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}: {}", self.outcome.symbol(), self.url, self.outcome)
    }
}

/// Per-run tallies over all reports.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub succeeded: usize,
    pub duplicates: usize,
    pub collisions: usize,
    pub rejected: usize,
    pub failed: usize,
    /// URLs never started because the run was aborted.
    pub not_started: usize,
}

impl RunSummary {
    pub fn from_reports(reports: &[FetchReport], not_started: usize) -> Self {
        let mut s = RunSummary {
            not_started,
            ..Default::default()
        };
        for r in reports {
            match r.outcome {
                FetchOutcome::Success(_) => s.succeeded += 1,
                FetchOutcome::DuplicateSkip => s.duplicates += 1,
                FetchOutcome::CollisionSkip(_) => s.collisions += 1,
                FetchOutcome::RejectedType(_) | FetchOutcome::RejectedSize(_) => s.rejected += 1,
                FetchOutcome::NetworkError(_) | FetchOutcome::UnexpectedError(_) => s.failed += 1,
            }
        }
        s
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} saved, {} duplicate, {} already on disk, {} rejected, {} failed",
            self.succeeded, self.duplicates, self.collisions, self.rejected, self.failed
        )?;
        if self.not_started > 0 {
            write!(f, ", {} not started", self.not_started)?;
        }
        Ok(())
    }
}
