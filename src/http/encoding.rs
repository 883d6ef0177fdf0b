//! Response compression driven by `Accept-Encoding`.
//!
//! Only gzip is supported. Token matching is exact and case-sensitive after
//! trimming whitespace around each comma-separated entry; quality values are
//! not interpreted.

use std::io::Write;

use flate2::Compression;
use flate2::write::GzEncoder;

use crate::http::request::Request;
use crate::http::response::{CONTENT_ENCODING, CONTENT_LENGTH, Response};

pub const ACCEPT_ENCODING: &str = "Accept-Encoding";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentCoding {
    Gzip,
}

impl ContentCoding {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentCoding::Gzip => "gzip",
        }
    }

    fn from_token(token: &str) -> Option<Self> {
        match token {
            "gzip" => Some(ContentCoding::Gzip),
            _ => None,
        }
    }

    pub fn encode(&self, body: &[u8]) -> std::io::Result<Vec<u8>> {
        match self {
            ContentCoding::Gzip => gzip(body),
        }
    }
}

/// First supported coding listed in an `Accept-Encoding` value.
pub fn select_coding(accept_encoding: &str) -> Option<ContentCoding> {
    accept_encoding
        .split(',')
        .find_map(|token| ContentCoding::from_token(token.trim()))
}

/// Coding to apply for this request, if any.
pub fn negotiate(req: &Request) -> Option<ContentCoding> {
    req.header(ACCEPT_ENCODING).and_then(select_coding)
}

/// Compresses `body` into a complete gzip member.
pub fn gzip(body: &[u8]) -> std::io::Result<Vec<u8>> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(body)?;
    encoder.finish()
}

/// Replaces the body of `response` with its encoded form and fixes up the
/// headers. An encoder fault turns the whole response into a 500.
pub fn apply(mut response: Response, coding: ContentCoding) -> Response {
    match coding.encode(&response.body) {
        Ok(encoded) => {
            response
                .headers
                .insert(CONTENT_ENCODING.to_string(), coding.as_str().to_string());
            response
                .headers
                .insert(CONTENT_LENGTH.to_string(), encoded.len().to_string());
            response.body = encoded;
            response
        }
        Err(e) => {
            tracing::error!(error = %e, coding = coding.as_str(), "Failed to encode response");
            Response::internal_error("Error encoding response")
        }
    }
}

/// Applies whatever coding the request negotiates; passes the response
/// through untouched otherwise.
pub fn negotiate_response(req: &Request, response: Response) -> Response {
    match negotiate(req) {
        Some(coding) => apply(response, coding),
        None => response,
    }
}
