//! Prevalidation: decide from headers alone whether a URL is worth fetching.
//!
//! Content-type matching is a plain substring test of each configured marker
//! against the raw `Content-Type` value. It is deliberately loose (`png` also
//! matches `text/png-notes`) and case-sensitive; no MIME parsing is done.

use crate::config::FetchConfig;
use crate::error::FetchError;
use crate::fetch_head::HeadResult;
use crate::transport::Transport;
use crate::url_model;

/// Metadata taken from the probe's headers. Never holds body bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrevalidationResult {
    /// Empty when the server sent no `Content-Type`.
    pub content_type: String,
    /// 0 when the server sent no usable `Content-Length`.
    pub content_length_bytes: u64,
}

/// Verdict of the prevalidation stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Prevalidation {
    /// Eligible for the full fetch; `filename` is the resolved candidate name.
    Accepted {
        metadata: PrevalidationResult,
        filename: String,
    },
    RejectedType(String),
    RejectedSize(u64),
}

/// True if any marker occurs in `content_type`.
pub fn is_supported_content_type(content_type: &str, markers: &[String]) -> bool {
    markers.iter().any(|m| content_type.contains(m.as_str()))
}

/// Applies the type and size policy to probe headers.
///
/// Type is checked first, so an unsupported type is reported as such even
/// when it is also too large.
pub fn evaluate(url: &str, head: &HeadResult, cfg: &FetchConfig, ticket: u64) -> Prevalidation {
    let metadata = PrevalidationResult {
        content_type: head.content_type.clone().unwrap_or_default(),
        content_length_bytes: head.content_length.unwrap_or(0),
    };

    if !is_supported_content_type(&metadata.content_type, &cfg.supported_extensions) {
        return Prevalidation::RejectedType(metadata.content_type);
    }
    if metadata.content_length_bytes > cfg.max_file_size_bytes {
        return Prevalidation::RejectedSize(metadata.content_length_bytes);
    }

    Prevalidation::Accepted {
        metadata,
        filename: url_model::derive_filename(url, ticket),
    }
}

/// Probes `url` through `transport` and evaluates the headers.
/// Probe failures (including non-2xx) are returned as errors.
pub fn prevalidate<T: Transport + ?Sized>(
    transport: &T,
    url: &str,
    cfg: &FetchConfig,
    ticket: u64,
) -> Result<Prevalidation, FetchError> {
    let head = transport.head(url)?;
    tracing::debug!(
        url = %url,
        content_type = head.content_type.as_deref().unwrap_or(""),
        content_length = ?head.content_length,
        "probe complete"
    );
    Ok(evaluate(url, &head, cfg, ticket))
}
