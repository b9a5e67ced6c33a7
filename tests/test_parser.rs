use skiff::http::parser::{MAX_HEADER_BYTES, ParseError, parse_http_request};
use skiff::http::request::Method;

#[test]
fn test_parse_simple_get_request() {
    let req = b"GET / HTTP/1.1\r\nHost: example.com\r\n\r\n";
    let (parsed, consumed) = parse_http_request(req).unwrap();

    assert_eq!(parsed.method, Method::GET);
    assert_eq!(parsed.path, "/");
    assert_eq!(parsed.version, "HTTP/1.1");
    assert_eq!(parsed.header("Host"), Some("example.com"));
    assert!(parsed.body.is_empty());
    assert_eq!(consumed, req.len());
}

#[test]
fn test_parse_post_request_with_body() {
    let req = b"POST /files/test.txt HTTP/1.1\r\nHost: x\r\nContent-Length: 5\r\n\r\nhello";
    let (parsed, consumed) = parse_http_request(req).unwrap();

    assert_eq!(parsed.method, Method::POST);
    assert_eq!(parsed.path, "/files/test.txt");
    assert_eq!(parsed.body, b"hello".to_vec());
    assert_eq!(consumed, req.len());
}

#[test]
fn test_header_names_are_lowercased_and_values_trimmed() {
    let req = b"GET / HTTP/1.1\r\nUSER-AGENT:   curl/8.0  \r\nAccept-Encoding:gzip\r\n\r\n";
    let (parsed, _) = parse_http_request(req).unwrap();

    assert_eq!(parsed.headers.get("user-agent").unwrap(), "curl/8.0");
    assert_eq!(parsed.headers.get("accept-encoding").unwrap(), "gzip");
    assert!(!parsed.headers.contains_key("USER-AGENT"));
}

#[test]
fn test_duplicate_header_last_one_wins() {
    let req = b"GET / HTTP/1.1\r\nX-Thing: one\r\nx-thing: two\r\n\r\n";
    let (parsed, _) = parse_http_request(req).unwrap();

    assert_eq!(parsed.header("X-Thing"), Some("two"));
}

#[test]
fn test_header_line_without_colon_is_ignored() {
    let req = b"GET / HTTP/1.1\r\nBrokenHeader\r\nHost: a\r\n\r\n";
    let (parsed, _) = parse_http_request(req).unwrap();

    assert_eq!(parsed.headers.len(), 1);
    assert_eq!(parsed.header("host"), Some("a"));
}

#[test]
fn test_header_value_keeps_later_colons() {
    let req = b"GET / HTTP/1.1\r\nHost: localhost:4221\r\n\r\n";
    let (parsed, _) = parse_http_request(req).unwrap();

    assert_eq!(parsed.header("host"), Some("localhost:4221"));
}

#[test]
fn test_path_is_not_decoded() {
    let req = b"GET /echo/a%20b?q=1 HTTP/1.1\r\n\r\n";
    let (parsed, _) = parse_http_request(req).unwrap();

    assert_eq!(parsed.path, "/echo/a%20b?q=1");
}

#[test]
fn test_unknown_method_is_kept() {
    let req = b"BREW /pot HTTP/1.1\r\n\r\n";
    let (parsed, _) = parse_http_request(req).unwrap();

    assert_eq!(parsed.method, Method::Other("BREW".to_string()));
    assert_eq!(parsed.method.as_str(), "BREW");
}

#[test]
fn test_parse_incomplete_request_missing_blank_line() {
    let req = b"GET / HTTP/1.1\r\nHost: example.com\r\n";

    assert_eq!(parse_http_request(req).unwrap_err(), ParseError::Incomplete);
}

#[test]
fn test_parse_incomplete_request_partial_body() {
    let req = b"POST /files/a HTTP/1.1\r\nContent-Length: 10\r\n\r\nhello";

    assert_eq!(parse_http_request(req).unwrap_err(), ParseError::Incomplete);
}

#[test]
fn test_body_bounded_by_content_length() {
    let req = b"POST /files/a HTTP/1.1\r\nContent-Length: 3\r\n\r\nabcGET / HTTP/1.1\r\n\r\n";
    let (parsed, consumed) = parse_http_request(req).unwrap();

    assert_eq!(parsed.body, b"abc".to_vec());
    assert_eq!(&req[consumed..], b"GET / HTTP/1.1\r\n\r\n");
}

#[test]
fn test_body_without_content_length_is_empty() {
    let req = b"POST /files/a HTTP/1.1\r\n\r\n";
    let (parsed, consumed) = parse_http_request(req).unwrap();

    assert!(parsed.body.is_empty());
    assert_eq!(consumed, req.len());
}

#[test]
fn test_parse_request_with_binary_body() {
    let req = b"POST /files/bin HTTP/1.1\r\nContent-Length: 4\r\n\r\n\x00\x01\xff\x03";
    let (parsed, _) = parse_http_request(req).unwrap();

    assert_eq!(parsed.body, vec![0, 1, 255, 3]);
}

#[test]
fn test_invalid_content_length() {
    let req = b"POST /files/a HTTP/1.1\r\nContent-Length: lots\r\n\r\n";

    assert_eq!(
        parse_http_request(req).unwrap_err(),
        ParseError::InvalidContentLength
    );
}

#[test]
fn test_request_line_with_too_few_tokens() {
    for req in [
        &b"GET /\r\n\r\n"[..],
        &b"GET\r\n\r\n"[..],
        &b"GET / FTP/1.0\r\n\r\n"[..],
        &b" / HTTP/1.1\r\n\r\n"[..],
    ] {
        assert_eq!(
            parse_http_request(req).unwrap_err(),
            ParseError::InvalidRequestLine,
            "{:?}",
            String::from_utf8_lossy(req)
        );
    }
}

#[test]
fn test_http_10_request_line() {
    let (parsed, _) = parse_http_request(b"GET / HTTP/1.0\r\n\r\n").unwrap();

    assert_eq!(parsed.version, "HTTP/1.0");
}

#[test]
fn test_oversized_header_block() {
    let mut req = b"GET / HTTP/1.1\r\nX-Pad: ".to_vec();
    req.extend(std::iter::repeat_n(b'a', MAX_HEADER_BYTES));

    assert_eq!(parse_http_request(&req).unwrap_err(), ParseError::HeadersTooLarge);

    req.extend_from_slice(b"\r\n\r\n");
    assert_eq!(parse_http_request(&req).unwrap_err(), ParseError::HeadersTooLarge);
}

/// A request whose header block (terminator excluded) is `head_len` bytes.
fn request_with_header_block(head_len: usize) -> Vec<u8> {
    let mut req = b"GET / HTTP/1.1\r\nX-Pad: ".to_vec();
    let pad = head_len - req.len();
    req.extend(std::iter::repeat_n(b'a', pad));
    req.extend_from_slice(b"\r\n\r\n");
    req
}

#[test]
fn test_header_block_near_limit_split_before_terminator() {
    for head_len in [MAX_HEADER_BYTES - 2, MAX_HEADER_BYTES] {
        let req = request_with_header_block(head_len);

        let (_, consumed) = parse_http_request(&req).unwrap();
        assert_eq!(consumed, head_len + 4);

        for cut in 1..=3 {
            assert_eq!(
                parse_http_request(&req[..req.len() - cut]).unwrap_err(),
                ParseError::Incomplete,
                "header block of {head_len} bytes missing {cut} terminator bytes"
            );
        }
    }
}

#[test]
fn test_header_block_one_past_limit() {
    let req = request_with_header_block(MAX_HEADER_BYTES + 1);

    assert_eq!(parse_http_request(&req).unwrap_err(), ParseError::HeadersTooLarge);
    assert_eq!(
        parse_http_request(&req[..req.len() - 1]).unwrap_err(),
        ParseError::HeadersTooLarge
    );
}
