//! Image fetching pipeline: dedup, HEAD prevalidation, bounded GET, safe
//! filenames, and no-clobber persistence, run over a bounded worker pool.

pub mod config;
pub mod logging;

pub mod control;
pub mod dedup;
pub mod error;
pub mod fetch_head;
pub mod fetcher;
pub mod outcome;
pub mod pipeline;
pub mod prevalidate;
pub mod scheduler;
pub mod storage;
pub mod transport;
pub mod url_model;

pub use outcome::{FetchOutcome, FetchReport, FetchRequest, RunSummary};
