//! Network seam for the pipeline.
//!
//! The orchestrator only needs two calls: a header-only probe and a bounded
//! GET. `CurlTransport` implements them with libcurl; tests substitute their
//! own implementation to count calls or script responses.

use std::time::Duration;

use crate::config::FetchConfig;
use crate::control::RunControl;
use crate::error::FetchError;
use crate::fetch_head::{self, HeadResult};
use crate::fetcher;

/// Maximum redirects followed by both the probe and the GET.
pub const MAX_REDIRECTIONS: u32 = 10;

/// Below this rate for `timeout`, a transfer counts as stalled.
const STALL_BYTES_PER_SEC: u32 = 1;

/// Curl settings shared by the probe and the full GET.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurlOptions {
    pub user_agent: String,
    /// Connect timeout, and the longest a transfer may stall (under one byte
    /// per second) before it is dropped. Steady transfers may run longer.
    pub timeout: Duration,
}

impl CurlOptions {
    pub fn from_config(cfg: &FetchConfig) -> Self {
        Self {
            user_agent: cfg.user_agent.clone(),
            timeout: cfg.timeout(),
        }
    }

    pub(crate) fn apply(&self, easy: &mut curl::easy::Easy) -> Result<(), curl::Error> {
        easy.useragent(&self.user_agent)?;
        easy.follow_location(true)?;
        easy.max_redirections(MAX_REDIRECTIONS)?;
        easy.connect_timeout(self.timeout)?;
        easy.low_speed_limit(STALL_BYTES_PER_SEC)?;
        easy.low_speed_time(self.timeout)?;
        // Needed for the progress callback that watches the abort token.
        easy.progress(true)?;
        Ok(())
    }
}

/// Network operations used by the orchestrator. Implementations must be
/// shareable across worker threads.
pub trait Transport: Send + Sync {
    /// Header-only probe. Non-2xx is an error.
    fn head(&self, url: &str) -> Result<HeadResult, FetchError>;

    /// Full GET, aborting with `FetchError::TooLarge` once the body exceeds `max_bytes`.
    fn get(&self, url: &str, max_bytes: u64) -> Result<Vec<u8>, FetchError>;
}

/// libcurl-backed transport. One `Easy` handle per request.
#[derive(Debug, Clone)]
pub struct CurlTransport {
    opts: CurlOptions,
    control: RunControl,
}

impl CurlTransport {
    pub fn new(opts: CurlOptions, control: RunControl) -> Self {
        Self { opts, control }
    }
}

impl Transport for CurlTransport {
    fn head(&self, url: &str) -> Result<HeadResult, FetchError> {
        fetch_head::probe(url, &self.opts, &self.control)
    }

    fn get(&self, url: &str, max_bytes: u64) -> Result<Vec<u8>, FetchError> {
        fetcher::fetch_body(url, &self.opts, max_bytes, &self.control)
    }
}
