//! Stage error type and its classification into terminal outcomes.

use std::path::PathBuf;

use crate::outcome::FetchOutcome;

/// Error returned by a single pipeline stage (probe, fetch, or persist).
/// Kept typed so the orchestrator can classify it before reporting.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// Curl reported an error (timeout, DNS, connection reset, bad URL, ...).
    #[error("{0}")]
    Curl(#[from] curl::Error),
    /// Response had a non-2xx status.
    #[error("{method} returned HTTP {code}")]
    Http { method: &'static str, code: u32 },
    /// Body grew past the configured ceiling while streaming in.
    #[error("body exceeded {limit} bytes (received {received})")]
    TooLarge { limit: u64, received: u64 },
    /// Transfer stopped because the run was aborted.
    #[error("transfer aborted")]
    Aborted,
    /// Filesystem failure (permission denied, disk full, ...). Not a network problem.
    #[error("storage {}: {source}", path.display())]
    Storage {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl FetchError {
    pub(crate) fn storage(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        FetchError::Storage {
            path: path.into(),
            source,
        }
    }
}

/// Coarse network failure kind, used as a log field and detail prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetworkKind {
    Timeout,
    /// DNS, refused connection, reset, or empty reply.
    Connection,
    Http(u32),
    Aborted,
    Other,
}

impl std::fmt::Display for NetworkKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NetworkKind::Timeout => write!(f, "timeout"),
            NetworkKind::Connection => write!(f, "connection"),
            NetworkKind::Http(code) => write!(f, "http {}", code),
            NetworkKind::Aborted => write!(f, "aborted"),
            NetworkKind::Other => write!(f, "other"),
        }
    }
}

/// Classify a curl error.
pub fn classify_curl_error(e: &curl::Error) -> NetworkKind {
    if e.is_operation_timedout() {
        return NetworkKind::Timeout;
    }
    if e.is_aborted_by_callback() {
        return NetworkKind::Aborted;
    }
    if e.is_couldnt_connect()
        || e.is_couldnt_resolve_host()
        || e.is_couldnt_resolve_proxy()
        || e.is_read_error()
        || e.is_recv_error()
        || e.is_send_error()
        || e.is_got_nothing()
    {
        return NetworkKind::Connection;
    }
    NetworkKind::Other
}

/// Map a stage error to the terminal outcome reported for its URL.
pub fn classify(e: &FetchError) -> FetchOutcome {
    match e {
        FetchError::Curl(ce) => {
            let kind = classify_curl_error(ce);
            FetchOutcome::NetworkError(format!("{}: {}", kind, ce))
        }
        FetchError::Http { code, .. } => {
            FetchOutcome::NetworkError(format!("{}: {}", NetworkKind::Http(*code), e))
        }
        FetchError::Aborted => {
            FetchOutcome::NetworkError(format!("{}: {}", NetworkKind::Aborted, e))
        }
        FetchError::TooLarge { received, .. } => FetchOutcome::RejectedSize(*received),
        FetchError::Storage { .. } => FetchOutcome::UnexpectedError(e.to_string()),
    }
}
