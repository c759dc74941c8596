//! HTTP HEAD / metadata probing.
//!
//! Uses the curl crate (libcurl) to fetch response headers only, so the
//! declared `Content-Type` and `Content-Length` can be checked before any body
//! bytes are transferred.

mod parse;

use std::str;

use crate::control::RunControl;
use crate::error::FetchError;
use crate::transport::CurlOptions;

pub(crate) use parse::{parse_headers, parse_status_line};

/// Result of a HEAD request: the headers prevalidation looks at.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeadResult {
    /// Final status code (after redirects).
    pub status: u32,
    /// `Content-Type` value if present, untouched (parameters included).
    pub content_type: Option<String>,
    /// Declared size in bytes, if `Content-Length` is present and numeric.
    pub content_length: Option<u64>,
}

/// Performs a HEAD request and returns parsed metadata.
///
/// Follows redirects; only the headers of the final response are kept.
/// Blocks the current thread for at most `opts.timeout`. A non-2xx final
/// status is returned as `FetchError::Http`.
pub fn probe(url: &str, opts: &CurlOptions, control: &RunControl) -> Result<HeadResult, FetchError> {
    let mut headers: Vec<String> = Vec::new();

    let mut easy = curl::easy::Easy::new();
    easy.url(url)?;
    easy.nobody(true)?; // HEAD request
    opts.apply(&mut easy)?;

    {
        let mut transfer = easy.transfer();
        transfer.header_function(|data| {
            if let Ok(s) = str::from_utf8(data) {
                headers.push(s.trim_end().to_string());
            }
            true
        })?;
        transfer.progress_function(|_, _, _, _| !control.is_aborted())?;
        if let Err(e) = transfer.perform() {
            if control.is_aborted() {
                return Err(FetchError::Aborted);
            }
            return Err(e.into());
        }
    }

    let code = easy.response_code()?;
    if !(200..300).contains(&code) {
        return Err(FetchError::Http {
            method: "HEAD",
            code,
        });
    }

    let mut head = parse_headers(&headers);
    head.status = code;
    Ok(head)
}
