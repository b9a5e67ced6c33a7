use std::collections::HashMap;

use crate::http::encoding;

/// HTTP request methods.
///
/// Only GET and POST carry meaning for the router. Any other token is kept
/// verbatim in [`Method::Other`] so routes that ignore the method still work.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Method {
    GET,
    POST,
    PUT,
    DELETE,
    HEAD,
    OPTIONS,
    PATCH,
    /// Any other method token, stored as received
    Other(String),
}

impl Method {
    /// Parses an HTTP method token. Matching is case-sensitive, so `get`
    /// becomes `Method::Other("get")`.
    ///
    /// ```
    /// # use skiff::http::request::Method;
    /// assert_eq!(Method::parse("GET"), Method::GET);
    /// assert_eq!(Method::parse("BREW"), Method::Other("BREW".to_string()));
    /// ```
    pub fn parse(s: &str) -> Self {
        match s {
            "GET" => Method::GET,
            "POST" => Method::POST,
            "PUT" => Method::PUT,
            "DELETE" => Method::DELETE,
            "HEAD" => Method::HEAD,
            "OPTIONS" => Method::OPTIONS,
            "PATCH" => Method::PATCH,
            other => Method::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Method::GET => "GET",
            Method::POST => "POST",
            Method::PUT => "PUT",
            Method::DELETE => "DELETE",
            Method::HEAD => "HEAD",
            Method::OPTIONS => "OPTIONS",
            Method::PATCH => "PATCH",
            Method::Other(s) => s,
        }
    }
}

/// A parsed HTTP request.
///
/// Header names are stored lower-cased and values trimmed, so lookups via
/// [`Request::header`] are case-insensitive. On duplicate names the last
/// occurrence wins.
#[derive(Debug, Clone)]
pub struct Request {
    pub method: Method,
    /// Raw request target, not percent-decoded
    pub path: String,
    /// Version token from the request line, e.g. "HTTP/1.1"
    pub version: String,
    pub headers: HashMap<String, String>,
    pub body: Vec<u8>,
}

/// Builder for constructing Request objects.
#[derive(Debug, Default)]
pub struct RequestBuilder {
    method: Option<Method>,
    path: Option<String>,
    version: Option<String>,
    headers: HashMap<String, String>,
    body: Vec<u8>,
}

impl RequestBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn method(mut self, method: Method) -> Self {
        self.method = Some(method);
        self
    }

    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Adds a header, normalizing the name the same way the parser does.
    pub fn header(mut self, key: &str, value: &str) -> Self {
        self.headers
            .insert(key.trim().to_ascii_lowercase(), value.trim().to_string());
        self
    }

    pub fn body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = body.into();
        self
    }

    pub fn build(self) -> Result<Request, &'static str> {
        Ok(Request {
            method: self.method.ok_or("method missing")?,
            path: self.path.ok_or("path missing")?,
            version: self.version.unwrap_or_else(|| "HTTP/1.1".to_string()),
            headers: self.headers,
            body: self.body,
        })
    }
}

impl Request {
    /// Retrieves a header value by name, case-insensitively.
    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers
            .get(&key.to_ascii_lowercase())
            .map(|v| v.as_str())
    }

    /// Whether the connection must be torn down after this request's
    /// response: the client sent `Connection: close` or spoke HTTP/1.0.
    pub fn should_close(&self) -> bool {
        let close_requested = self
            .header("Connection")
            .is_some_and(|v| v.eq_ignore_ascii_case("close"));

        close_requested || self.version == "HTTP/1.0"
    }

    /// Whether the client advertised gzip in `Accept-Encoding`.
    pub fn accepts_gzip(&self) -> bool {
        self.header("Accept-Encoding")
            .is_some_and(encoding::accepts_gzip)
    }
}
