//! Full-body HTTP GET with a size ceiling.
//!
//! The body returned here is the only thing ever persisted; the HEAD length is
//! advisory. Bytes are buffered in memory, which the ceiling keeps bounded.

use std::cell::Cell;
use std::str;

use crate::control::RunControl;
use crate::error::FetchError;
use crate::fetch_head::parse_status_line;
use crate::transport::CurlOptions;

/// Downloads `url` with a single GET and returns the body.
///
/// A non-2xx final status is `FetchError::Http`; the transfer stops at the
/// first body byte of such a response, so error pages are never buffered or
/// measured against the ceiling. Otherwise aborts as soon as more than
/// `max_bytes` have arrived (`FetchError::TooLarge`), or when `control` is
/// aborted (`FetchError::Aborted`).
pub fn fetch_body(
    url: &str,
    opts: &CurlOptions,
    max_bytes: u64,
    control: &RunControl,
) -> Result<Vec<u8>, FetchError> {
    let mut body: Vec<u8> = Vec::new();
    let mut received: u64 = 0;
    let mut over_limit = false;
    let mut error_status: Option<u32> = None;
    // Status of the response currently being received; redirects reset it.
    let status: Cell<Option<u32>> = Cell::new(None);

    let mut easy = curl::easy::Easy::new();
    easy.url(url)?;
    opts.apply(&mut easy)?;

    let result = {
        let mut transfer = easy.transfer();
        transfer.header_function(|line| {
            if let Some(code) = str::from_utf8(line).ok().and_then(parse_status_line) {
                status.set(Some(code));
            }
            true
        })?;
        transfer.write_function(|data| {
            if let Some(code) = status.get().filter(|c| !(200..300).contains(c)) {
                error_status = Some(code);
                return Ok(0); // abort transfer
            }
            received += data.len() as u64;
            if received > max_bytes {
                over_limit = true;
                return Ok(0);
            }
            body.extend_from_slice(data);
            Ok(data.len())
        })?;
        transfer.progress_function(|_, _, _, _| !control.is_aborted())?;
        transfer.perform()
    };

    if let Some(code) = error_status {
        return Err(FetchError::Http { method: "GET", code });
    }
    if over_limit {
        return Err(FetchError::TooLarge {
            limit: max_bytes,
            received,
        });
    }
    if let Err(e) = result {
        if control.is_aborted() {
            return Err(FetchError::Aborted);
        }
        return Err(e.into());
    }

    // Error responses without a body never reach the write callback.
    let code = easy.response_code()?;
    if !(200..300).contains(&code) {
        return Err(FetchError::Http { method: "GET", code });
    }

    tracing::debug!(url = %url, bytes = body.len(), "GET complete");
    Ok(body)
}
