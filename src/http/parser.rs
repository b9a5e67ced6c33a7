use std::collections::HashMap;

use crate::http::request::{Method, Request};

/// Upper bound on the request line plus header block.
pub const MAX_HEADER_BYTES: usize = 8 * 1024;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ParseError {
    /// More bytes are needed before a full request is buffered.
    #[error("incomplete request")]
    Incomplete,
    #[error("malformed request line")]
    InvalidRequestLine,
    #[error("invalid Content-Length header")]
    InvalidContentLength,
    #[error("request header block too large")]
    HeadersTooLarge,
}

/// Parses one request from the front of `buf`.
///
/// On success returns the request and the number of bytes it occupied, so
/// the caller can drain them and keep any bytes of a following request.
/// The body is exactly `Content-Length` bytes; without that header it is
/// empty.
pub fn parse_http_request(buf: &[u8]) -> Result<(Request, usize), ParseError> {
    let headers_end = match find_headers_end(buf) {
        Some(end) if end > MAX_HEADER_BYTES => return Err(ParseError::HeadersTooLarge),
        Some(end) => end,
        // Leave room for a terminator that is only partly buffered.
        None if buf.len() > MAX_HEADER_BYTES + 3 => return Err(ParseError::HeadersTooLarge),
        None => return Err(ParseError::Incomplete),
    };

    let head = String::from_utf8_lossy(&buf[..headers_end]);
    let mut lines = head.split("\r\n");

    let (method, path, version) = parse_request_line(lines.next().unwrap_or_default())?;
    let headers = parse_headers(lines);

    let content_length = headers
        .get("content-length")
        .map(|v| v.parse::<usize>().map_err(|_| ParseError::InvalidContentLength))
        .transpose()?
        .unwrap_or(0);

    let body_start = headers_end + 4;
    let total = body_start
        .checked_add(content_length)
        .ok_or(ParseError::InvalidContentLength)?;

    if buf.len() < total {
        return Err(ParseError::Incomplete);
    }

    let request = Request {
        method,
        path,
        version,
        headers,
        body: buf[body_start..total].to_vec(),
    };

    Ok((request, total))
}

/// Number of whitespace bytes (stray CRLFs included) in front of the next
/// request. A buffer made only of whitespace is "no request yet".
pub fn leading_whitespace(buf: &[u8]) -> usize {
    buf.iter().take_while(|b| b.is_ascii_whitespace()).count()
}

fn parse_request_line(line: &str) -> Result<(Method, String, String), ParseError> {
    let mut parts = line.splitn(3, ' ');

    let method = parts.next().unwrap_or_default();
    let path = parts.next().unwrap_or_default();
    let version = parts.next().unwrap_or_default().trim();

    if method.is_empty() || path.is_empty() || !version.starts_with("HTTP/") {
        return Err(ParseError::InvalidRequestLine);
    }

    Ok((Method::parse(method), path.to_string(), version.to_string()))
}

fn parse_headers<'a>(lines: impl Iterator<Item = &'a str>) -> HashMap<String, String> {
    let mut headers = HashMap::new();

    for line in lines {
        if line.is_empty() {
            break;
        }

        // Lines without a colon are skipped rather than rejected.
        if let Some((key, value)) = line.split_once(':') {
            headers.insert(key.trim().to_ascii_lowercase(), value.trim().to_string());
        }
    }

    headers
}

fn find_headers_end(buf: &[u8]) -> Option<usize> {
    buf.windows(4).position(|w| w == b"\r\n\r\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_simple_get() {
        let req = b"GET / HTTP/1.1\r\nHost: example.com\r\n\r\n";

        let (parsed, consumed) = parse_http_request(req).unwrap();

        assert_eq!(parsed.path, "/");
        assert_eq!(parsed.header("host"), Some("example.com"));
        assert_eq!(consumed, req.len());
    }

    #[test]
    fn leaves_following_request_in_buffer() {
        let req = b"GET /a HTTP/1.1\r\n\r\nGET /b HTTP/1.1\r\n\r\n";

        let (first, consumed) = parse_http_request(req).unwrap();
        assert_eq!(first.path, "/a");

        let (second, _) = parse_http_request(&req[consumed..]).unwrap();
        assert_eq!(second.path, "/b");
    }

    #[test]
    fn whitespace_prefix_is_measured() {
        assert_eq!(leading_whitespace(b"\r\n\r\nGET"), 4);
        assert_eq!(leading_whitespace(b"  \t"), 3);
        assert_eq!(leading_whitespace(b"GET"), 0);
    }
}
