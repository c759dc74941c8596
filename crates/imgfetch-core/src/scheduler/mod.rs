//! Run scheduler.
//!
//! Feeds a list of URLs through the orchestrator on a bounded pool of worker
//! threads: dedup store → orchestrator → worker pool → reports in input order.
//! One worker reproduces plain sequential processing exactly.

mod parallel;

use std::sync::Arc;

use crate::config::FetchConfig;
use crate::control::RunControl;
use crate::dedup::DedupStore;
use crate::outcome::{FetchReport, FetchRequest, RunSummary};
use crate::pipeline::Orchestrator;
use crate::transport::{CurlOptions, CurlTransport};

pub use parallel::run_pool;

/// Everything a run produced.
#[derive(Debug, Clone, Default)]
pub struct FetchRun {
    /// One report per processed request, in input order.
    pub reports: Vec<FetchReport>,
    pub summary: RunSummary,
}

/// Fetches `urls` with a fresh dedup store and the curl transport, using
/// `cfg.workers` threads. Blocks until every URL is processed or the run is
/// aborted through `control`.
pub fn fetch_all<I, S>(cfg: Arc<FetchConfig>, urls: I, control: &RunControl) -> FetchRun
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let transport = CurlTransport::new(CurlOptions::from_config(&cfg), control.clone());
    let workers = cfg.workers;
    let orchestrator = Orchestrator::new(cfg, transport, Arc::new(DedupStore::new()));
    let requests: Vec<FetchRequest> = urls.into_iter().map(FetchRequest::new).collect();
    run_pool(&orchestrator, requests, workers, control)
}
