//! Parse HTTP response header lines into HeadResult.

use super::HeadResult;

/// Parse collected header lines into HeadResult.
///
/// A status line (`HTTP/...`) starts a new response, so with redirects only
/// the last response's headers survive.
pub(crate) fn parse_headers(lines: &[String]) -> HeadResult {
    let mut content_type = None;
    let mut content_length = None;

    for line in lines {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if parse_status_line(line).is_some() {
            content_type = None;
            content_length = None;
            continue;
        }
        if let Some((name, value)) = line.split_once(':') {
            let name = name.trim();
            let value = value.trim();
            if name.eq_ignore_ascii_case("content-type") {
                content_type = Some(value.to_string());
            }
            if name.eq_ignore_ascii_case("content-length") {
                content_length = value.parse::<u64>().ok();
            }
        }
    }

    HeadResult {
        status: 0,
        content_type,
        content_length,
    }
}

/// Status code from a response status line such as `HTTP/1.1 404 Not Found`.
/// `None` for any other header line.
pub(crate) fn parse_status_line(line: &str) -> Option<u32> {
    let rest = line.trim().strip_prefix("HTTP/")?;
    rest.split_whitespace().nth(1)?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_line_codes() {
        assert_eq!(parse_status_line("HTTP/1.1 200 OK\r\n"), Some(200));
        assert_eq!(parse_status_line("HTTP/2 404"), Some(404));
        assert_eq!(parse_status_line("Content-Type: image/png"), None);
        assert_eq!(parse_status_line("HTTP/1.1"), None);
    }

    #[test]
    fn parse_headers_type_and_length() {
        let lines = [
            "HTTP/1.1 200 OK".to_string(),
            "Content-Type: image/png".to_string(),
            "Content-Length: 2048".to_string(),
        ];
        let r = parse_headers(&lines);
        assert_eq!(r.content_type.as_deref(), Some("image/png"));
        assert_eq!(r.content_length, Some(2048));
    }

    #[test]
    fn parse_headers_case_insensitive_names() {
        let lines = [
            "content-type: image/jpeg; charset=binary".to_string(),
            "CONTENT-LENGTH:  77 ".to_string(),
        ];
        let r = parse_headers(&lines);
        assert_eq!(r.content_type.as_deref(), Some("image/jpeg; charset=binary"));
        assert_eq!(r.content_length, Some(77));
    }

    #[test]
    fn parse_headers_missing_or_bad_length() {
        let r = parse_headers(&["Content-Type: image/gif".to_string()]);
        assert_eq!(r.content_length, None);
        let r = parse_headers(&["Content-Length: lots".to_string()]);
        assert_eq!(r.content_length, None);
        assert!(r.content_type.is_none());
    }

    #[test]
    fn parse_headers_keeps_final_response_after_redirect() {
        let lines = [
            "HTTP/1.1 301 Moved Permanently".to_string(),
            "Content-Type: text/html".to_string(),
            "Content-Length: 120".to_string(),
            "Location: /real.png".to_string(),
            "".to_string(),
            "HTTP/1.1 200 OK".to_string(),
            "Content-Type: image/png".to_string(),
        ];
        let r = parse_headers(&lines);
        assert_eq!(r.content_type.as_deref(), Some("image/png"));
        assert_eq!(r.content_length, None);
    }
}
