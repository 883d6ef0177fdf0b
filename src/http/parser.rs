use crate::http::request::{Method, Request};
use std::collections::HashMap;
use thiserror::Error;

const CRLF: &[u8] = b"\r\n";
const HEADER_SEPARATOR: &str = ": ";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("empty request")]
    Empty,
    #[error("request head is not valid UTF-8")]
    InvalidEncoding,
    #[error("malformed request line")]
    InvalidRequestLine,
    #[error("malformed header line")]
    InvalidHeader,
}

/// Where the parser is within the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    RequestLine,
    Headers,
    Body,
}

struct RequestLine {
    method: Method,
    path: String,
    version: String,
}

/// Byte cursor yielding CRLF-delimited lines.
struct Cursor<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Next line without its terminator. A final line with no CRLF is
    /// returned as-is; `None` once the buffer is exhausted.
    fn next_line(&mut self) -> Option<&'a [u8]> {
        if self.pos >= self.buf.len() {
            return None;
        }

        let rest = &self.buf[self.pos..];
        match find_crlf(rest) {
            Some(end) => {
                self.pos += end + CRLF.len();
                Some(&rest[..end])
            }
            None => {
                self.pos = self.buf.len();
                Some(rest)
            }
        }
    }

    fn rest(&self) -> &'a [u8] {
        &self.buf[self.pos..]
    }
}

/// Parses one request out of a single wire buffer.
///
/// The whole buffer is consumed: everything after the blank line that ends
/// the header block is the body, with no reconciliation against a declared
/// `Content-Length`. A head cut short by the read (no blank line) yields the
/// headers that were present and an empty body.
pub fn parse_http_request(buf: &[u8]) -> Result<Request, ParseError> {
    if buf.is_empty() {
        return Err(ParseError::Empty);
    }

    let mut cursor = Cursor::new(buf);
    let mut state = State::RequestLine;
    let mut request_line = None;
    let mut headers = HashMap::new();

    loop {
        match state {
            State::RequestLine => {
                let line = cursor.next_line().ok_or(ParseError::Empty)?;
                request_line = Some(parse_request_line(line)?);
                state = State::Headers;
            }

            State::Headers => match cursor.next_line() {
                Some(line) if !line.is_empty() => {
                    let (key, value) = parse_header(line)?;
                    headers.insert(key, value);
                }
                _ => state = State::Body,
            },

            State::Body => {
                let RequestLine {
                    method,
                    path,
                    version,
                } = request_line.ok_or(ParseError::InvalidRequestLine)?;

                return Ok(Request {
                    method,
                    path,
                    version,
                    headers,
                    body: cursor.rest().to_vec(),
                });
            }
        }
    }
}

fn parse_request_line(line: &[u8]) -> Result<RequestLine, ParseError> {
    let line = std::str::from_utf8(line).map_err(|_| ParseError::InvalidEncoding)?;

    let mut parts = line.split(' ');
    let (Some(method), Some(path), Some(version), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(ParseError::InvalidRequestLine);
    };

    if method.is_empty() || path.is_empty() || version.is_empty() {
        return Err(ParseError::InvalidRequestLine);
    }

    Ok(RequestLine {
        method: Method::parse(method),
        path: path.to_string(),
        version: version.to_string(),
    })
}

fn parse_header(line: &[u8]) -> Result<(String, String), ParseError> {
    let line = std::str::from_utf8(line).map_err(|_| ParseError::InvalidEncoding)?;

    let (key, value) = line
        .split_once(HEADER_SEPARATOR)
        .ok_or(ParseError::InvalidHeader)?;

    if key.is_empty() {
        return Err(ParseError::InvalidHeader);
    }

    Ok((key.to_string(), value.to_string()))
}

fn find_crlf(buf: &[u8]) -> Option<usize> {
    buf.windows(CRLF.len()).position(|w| w == CRLF)
}
