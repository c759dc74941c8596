//! Bounded worker pool over a shared request queue.
//!
//! Up to `workers` threads pop requests from a shared queue and run the
//! orchestrator on each; results come back over a channel tagged with their
//! input index. Workers check the run's abort token before taking the next
//! request. A panic while processing one URL is caught and reported as an
//! unexpected error for that URL only.

use std::collections::VecDeque;
use std::panic::{self, AssertUnwindSafe};
use std::sync::mpsc;
use std::sync::Mutex;

use super::FetchRun;
use crate::control::RunControl;
use crate::outcome::{FetchOutcome, FetchReport, FetchRequest, RunSummary};
use crate::pipeline::Orchestrator;
use crate::transport::Transport;

/// Runs `requests` through `orchestrator` on at most `workers` threads.
///
/// Reports are returned in input order. Requests not started before the run
/// was aborted produce no report and are counted in `summary.not_started`.
pub fn run_pool<T: Transport>(
    orchestrator: &Orchestrator<T>,
    requests: Vec<FetchRequest>,
    workers: usize,
    control: &RunControl,
) -> FetchRun {
    let count = requests.len();
    if count == 0 {
        return FetchRun::default();
    }

    let work: Mutex<VecDeque<(usize, FetchRequest)>> =
        Mutex::new(requests.into_iter().enumerate().collect());
    let (tx, rx) = mpsc::channel::<(usize, FetchReport)>();
    let num_workers = workers.max(1).min(count);
    tracing::debug!(requests = count, workers = num_workers, "starting fetch run");

    std::thread::scope(|scope| {
        for worker in 0..num_workers {
            let tx = tx.clone();
            let work = &work;
            scope.spawn(move || loop {
                if control.is_aborted() {
                    tracing::debug!(worker, "abort requested; worker stopping");
                    break;
                }
                let next = work.lock().unwrap_or_else(|e| e.into_inner()).pop_front();
                let Some((index, request)) = next else {
                    break;
                };
                let report = process_isolated(orchestrator, &request);
                if tx.send((index, report)).is_err() {
                    break;
                }
            });
        }
    });
    drop(tx);

    let mut indexed: Vec<(usize, FetchReport)> = rx.into_iter().collect();
    indexed.sort_by_key(|(index, _)| *index);
    let reports: Vec<FetchReport> = indexed.into_iter().map(|(_, r)| r).collect();

    let not_started = count - reports.len();
    if not_started > 0 {
        tracing::warn!(not_started, "run aborted before all URLs were started");
    }
    let summary = RunSummary::from_reports(&reports, not_started);
    tracing::info!(%summary, "fetch run finished");
    FetchRun { reports, summary }
}

fn process_isolated<T: Transport>(
    orchestrator: &Orchestrator<T>,
    request: &FetchRequest,
) -> FetchReport {
    match panic::catch_unwind(AssertUnwindSafe(|| orchestrator.process(request))) {
        Ok(report) => report,
        Err(payload) => {
            let msg = payload
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "worker panicked".to_string());
            tracing::error!(url = %request.url, "panic while processing: {}", msg);
            FetchReport {
                url: request.url.clone(),
                outcome: FetchOutcome::UnexpectedError(format!("panic: {}", msg)),
            }
        }
    }
}
