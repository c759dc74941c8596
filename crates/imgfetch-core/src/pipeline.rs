//! Per-URL orchestrator.
//!
//! Runs one request through the stages in strict order, stopping at the first
//! one that yields a terminal outcome:
//!
//! dedup check → prevalidate → fetch → resolve filename → persist → report.
//!
//! No stage is retried and no stage runs twice. Every failure is converted to
//! a [`FetchOutcome`] here; nothing escapes to the caller.

use std::fmt;
use std::sync::Arc;

use crate::config::FetchConfig;
use crate::dedup::DedupStore;
use crate::error::{classify, FetchError};
use crate::outcome::{FetchOutcome, FetchReport, FetchRequest};
use crate::prevalidate::{self, Prevalidation};
use crate::storage::{self, OutputDir, PersistOutcome};
use crate::transport::Transport;

/// Pipeline stage, used to record where processing of a URL stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    DedupCheck,
    Prevalidate,
    Fetch,
    ResolveFilename,
    Persist,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Stage::DedupCheck => "dedup",
            Stage::Prevalidate => "prevalidate",
            Stage::Fetch => "fetch",
            Stage::ResolveFilename => "resolve-filename",
            Stage::Persist => "persist",
        };
        f.write_str(s)
    }
}

/// Sequences the stages for one URL at a time. Shareable across workers:
/// all state it mutates (the dedup store, the filesystem) is synchronized.
pub struct Orchestrator<T> {
    cfg: Arc<FetchConfig>,
    transport: T,
    dedup: Arc<DedupStore>,
}

impl<T: Transport> Orchestrator<T> {
    /// `dedup` is passed in so callers can share it, pre-populate it, or
    /// inspect it after the run.
    pub fn new(cfg: Arc<FetchConfig>, transport: T, dedup: Arc<DedupStore>) -> Self {
        Self {
            cfg,
            transport,
            dedup,
        }
    }

    pub fn dedup(&self) -> &DedupStore {
        &self.dedup
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Processes one request to its terminal outcome.
    pub fn process(&self, request: &FetchRequest) -> FetchReport {
        let url = request.url.as_str();
        let (stage, outcome) = self.run_stages(url);
        match &outcome {
            FetchOutcome::Success(path) => {
                tracing::info!(url = %url, path = %path.display(), "fetched");
            }
            FetchOutcome::DuplicateSkip | FetchOutcome::CollisionSkip(_) => {
                tracing::info!(url = %url, %stage, outcome = outcome.label(), "skipped: {}", outcome);
            }
            _ => {
                tracing::warn!(url = %url, %stage, outcome = outcome.label(), "{}", outcome);
            }
        }
        FetchReport {
            url: request.url.clone(),
            outcome,
        }
    }

    fn run_stages(&self, url: &str) -> (Stage, FetchOutcome) {
        // The claim marks the URL seen for the rest of the run, whatever the
        // outcome below turns out to be.
        let Some(ticket) = self.dedup.claim(url) else {
            return (Stage::DedupCheck, FetchOutcome::DuplicateSkip);
        };

        let (metadata, filename) =
            match prevalidate::prevalidate(&self.transport, url, &self.cfg, ticket) {
                Ok(Prevalidation::Accepted { metadata, filename }) => (metadata, filename),
                Ok(Prevalidation::RejectedType(ct)) => {
                    return (Stage::Prevalidate, FetchOutcome::RejectedType(ct))
                }
                Ok(Prevalidation::RejectedSize(n)) => {
                    return (Stage::Prevalidate, FetchOutcome::RejectedSize(n))
                }
                Err(e) => return (Stage::Prevalidate, classify(&e)),
            };

        let body = match self.transport.get(url, self.cfg.max_file_size_bytes) {
            Ok(body) => body,
            Err(e) => return (Stage::Fetch, classify(&e)),
        };
        if metadata.content_length_bytes != 0
            && metadata.content_length_bytes != body.len() as u64
        {
            tracing::debug!(
                url = %url,
                declared = metadata.content_length_bytes,
                received = body.len(),
                "declared length differs from body; persisting body"
            );
        }

        tracing::debug!(url = %url, filename = %filename, "resolved filename");

        match self.persist(&filename, &body) {
            Ok(PersistOutcome::Written(path)) => (Stage::Persist, FetchOutcome::Success(path)),
            Ok(PersistOutcome::Collision(path)) => {
                (Stage::Persist, FetchOutcome::CollisionSkip(path))
            }
            Err(e) => (Stage::Persist, classify(&e)),
        }
    }

    /// Acquires the output directory (created on first use) and writes.
    /// Directory failures surface per URL rather than aborting the run.
    fn persist(&self, filename: &str, body: &[u8]) -> Result<PersistOutcome, FetchError> {
        let dir = OutputDir::acquire(self.cfg.output_directory.clone())?;
        storage::persist(&dir, filename, body)
    }
}
