use std::collections::HashMap;

pub const CONTENT_TYPE: &str = "Content-Type";
pub const CONTENT_LENGTH: &str = "Content-Length";
pub const CONTENT_ENCODING: &str = "Content-Encoding";

pub const TEXT_PLAIN: &str = "text/plain";
pub const OCTET_STREAM: &str = "application/octet-stream";

/// HTTP status codes produced by the server.
///
/// - `Ok` (200): Request successful
/// - `Created` (201): File written
/// - `BadRequest` (400): Request could not be parsed
/// - `NotFound` (404): Unknown path or missing file
/// - `InternalServerError` (500): Filesystem or encoding fault
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
    /// # Example
    ///
    /// ```
    /// # use courier::http::response::StatusCode;
    /// assert_eq!(StatusCode::Ok.as_u16(), 200);
    /// assert_eq!(StatusCode::NotFound.as_u16(), 404);
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

    /// Returns the standard HTTP reason phrase for this status code.
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

/// A complete HTTP response ready to be serialized.
///
/// When `Content-Length` is present it equals `body.len()`.
#[derive(Debug, Clone)]
pub struct Response {
    /// The HTTP status code
    pub status: StatusCode,
    /// HTTP headers as key-value pairs
    pub headers: HashMap<String, String>,
    /// Response body as bytes
    pub body: Vec<u8>,
}

/// Builder for constructing HTTP responses in a fluent style.
///
/// # Example
///
/// ```
/// # use courier::http::response::{ResponseBuilder, StatusCode};
/// let response = ResponseBuilder::new(StatusCode::Ok)
///     .header("Content-Type", "text/plain")
///     .body(b"pong".to_vec())
///     .build();
/// assert_eq!(response.header("Content-Length"), Some("4"));
/// ```
pub struct ResponseBuilder {
    status: StatusCode,
    headers: HashMap<String, String>,
    body: Vec<u8>,
}

impl ResponseBuilder {
    /// Creates a new response builder with the specified status code.
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            headers: HashMap::new(),
            body: Vec::new(),
        }
    }

    /// Adds or replaces a header.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Sets the response body.
    pub fn body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = body.into();
        self
    }

    /// Builds the final Response.
    ///
    /// A non-empty body always gets a `Content-Length` matching its size. An
    /// empty body only carries one if it was asked for explicitly. Any value
    /// set by hand is replaced with the real length.
    pub fn build(mut self) -> Response {
        if !self.body.is_empty() || self.headers.contains_key(CONTENT_LENGTH) {
            self.headers
                .insert(CONTENT_LENGTH.to_string(), self.body.len().to_string());
        }

        Response {
            status: self.status,
            headers: self.headers,
            body: self.body,
        }
    }
}

impl Response {
    /// A plain-text response with the given status and body.
    pub fn text(status: StatusCode, body: impl Into<Vec<u8>>) -> Self {
        ResponseBuilder::new(status)
            .header(CONTENT_TYPE, TEXT_PLAIN)
            .body(body)
            .build()
    }

    /// Creates a 200 OK plain-text response with the given body.
    pub fn ok(body: impl Into<Vec<u8>>) -> Self {
        Self::text(StatusCode::Ok, body)
    }

    /// Like [`Response::ok`] but always carries `Content-Length`, even when
    /// the body is empty.
    pub fn ok_sized(body: impl Into<Vec<u8>>) -> Self {
        let body = body.into();
        ResponseBuilder::new(StatusCode::Ok)
            .header(CONTENT_TYPE, TEXT_PLAIN)
            .header(CONTENT_LENGTH, body.len().to_string())
            .body(body)
            .build()
    }

    /// Creates a 400 response for requests that failed to parse.
    pub fn bad_request() -> Self {
        Self::text(StatusCode::BadRequest, "Bad Request")
    }

    /// Creates a 404 Not Found response.
    pub fn not_found(body: &str) -> Self {
        Self::text(StatusCode::NotFound, body)
    }

    /// Creates a 500 Internal Server Error response.
    pub fn internal_error(body: &str) -> Self {
        Self::text(StatusCode::InternalServerError, body)
    }

    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers.get(key).map(|v| v.as_str())
    }
}
