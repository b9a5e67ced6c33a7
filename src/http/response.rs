/// HTTP status codes the server can emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCode {
    /// 200 OK
    Ok,
    /// 201 Created
    Created,
    /// 400 Bad Request
    BadRequest,
    /// 404 Not Found
    NotFound,
    /// 500 Internal Server Error
    InternalServerError,
}

impl StatusCode {
    /// Returns the numeric HTTP status code.
    ///
    /// ```
    /// # use skiff::http::response::StatusCode;
    /// assert_eq!(StatusCode::Created.as_u16(), 201);
    /// ```
    pub fn as_u16(&self) -> u16 {
        match self {
            StatusCode::Ok => 200,
            StatusCode::Created => 201,
            StatusCode::BadRequest => 400,
            StatusCode::NotFound => 404,
            StatusCode::InternalServerError => 500,
        }
    }

    pub fn reason_phrase(&self) -> &'static str {
        match self {
            StatusCode::Ok => "OK",
            StatusCode::Created => "Created",
            StatusCode::BadRequest => "Bad Request",
            StatusCode::NotFound => "Not Found",
            StatusCode::InternalServerError => "Internal Server Error",
        }
    }
}

/// Lenient conversion: codes outside the table fall back to 200 OK.
impl From<u16> for StatusCode {
    fn from(code: u16) -> Self {
        match code {
            200 => StatusCode::Ok,
            201 => StatusCode::Created,
            400 => StatusCode::BadRequest,
            404 => StatusCode::NotFound,
            500 => StatusCode::InternalServerError,
            other => {
                tracing::warn!(code = other, "Unknown status code, sending 200 OK");
                StatusCode::Ok
            }
        }
    }
}

/// Body media types. A response without a content type uses `None` at the
/// `Option<ContentType>` level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentType {
    TextPlain,
    OctetStream,
    Json,
    Html,
}

impl ContentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::TextPlain => "text/plain",
            ContentType::OctetStream => "application/octet-stream",
            ContentType::Json => "application/json",
            ContentType::Html => "text/html",
        }
    }
}

/// An HTTP response before serialization.
///
/// Framing headers (`Content-Type`, `Content-Encoding`, `Content-Length`,
/// `Connection`) are derived by the writer from these fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: StatusCode,
    pub content_type: Option<ContentType>,
    pub body: Vec<u8>,
    /// Compress the body with gzip when it is written
    pub gzip: bool,
}

/// Builder for constructing HTTP responses in a fluent style.
///
/// ```
/// # use skiff::http::response::{ContentType, ResponseBuilder, StatusCode};
/// let response = ResponseBuilder::new(StatusCode::Ok)
///     .content_type(ContentType::TextPlain)
///     .body("hi")
///     .gzip(true)
///     .build();
/// assert!(response.gzip);
/// ```
#[derive(Debug)]
pub struct ResponseBuilder {
    status: StatusCode,
    content_type: Option<ContentType>,
    body: Vec<u8>,
    gzip: bool,
}

impl ResponseBuilder {
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            content_type: None,
            body: Vec::new(),
            gzip: false,
        }
    }

    pub fn content_type(mut self, content_type: ContentType) -> Self {
        self.content_type = Some(content_type);
        self
    }

    pub fn body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = body.into();
        self
    }

    pub fn gzip(mut self, gzip: bool) -> Self {
        self.gzip = gzip;
        self
    }

    pub fn build(self) -> Response {
        Response {
            status: self.status,
            content_type: self.content_type,
            body: self.body,
            gzip: self.gzip,
        }
    }
}

impl Response {
    /// 200 OK with no content type and an empty body.
    pub fn ok() -> Self {
        ResponseBuilder::new(StatusCode::Ok).build()
    }

    /// 200 OK, `text/plain`, optionally gzip-encoded on the wire.
    pub fn text(body: impl Into<Vec<u8>>, gzip: bool) -> Self {
        ResponseBuilder::new(StatusCode::Ok)
            .content_type(ContentType::TextPlain)
            .body(body)
            .gzip(gzip)
            .build()
    }

    /// 200 OK, `application/octet-stream`. Never compressed.
    pub fn octet_stream(body: impl Into<Vec<u8>>) -> Self {
        ResponseBuilder::new(StatusCode::Ok)
            .content_type(ContentType::OctetStream)
            .body(body)
            .build()
    }

    pub fn created() -> Self {
        ResponseBuilder::new(StatusCode::Created).build()
    }

    pub fn bad_request() -> Self {
        ResponseBuilder::new(StatusCode::BadRequest).build()
    }

    pub fn not_found() -> Self {
        ResponseBuilder::new(StatusCode::NotFound).build()
    }

    pub fn internal_error() -> Self {
        ResponseBuilder::new(StatusCode::InternalServerError).build()
    }
}
