//! Request routing.
//!
//! Rules are checked in order, first match wins:
//!
//! | Path             | Behaviour                                   |
//! |------------------|---------------------------------------------|
//! | `/`              | 200, empty body                             |
//! | `/files/{name}`  | GET reads, POST writes under the directory  |
//! | `/echo/{msg}`    | 200 with `msg`, gzip when negotiated        |
//! | `/user-agent`    | 200 with the `User-Agent` value             |
//! | anything else    | 404 `Path not found`                        |

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::http::encoding;
use crate::http::request::{Method, Request};
use crate::http::response::{
    CONTENT_LENGTH, CONTENT_TYPE, OCTET_STREAM, Response, ResponseBuilder, StatusCode,
};

const FILES_PREFIX: &str = "/files/";
const ECHO_PREFIX: &str = "/echo/";
const USER_AGENT_PATH: &str = "/user-agent";

/// Maps requests to responses. Holds the serving directory; nothing else is
/// shared between connections.
#[derive(Debug, Clone)]
pub struct Router {
    directory: PathBuf,
}

impl Router {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Produces the response for `req`. Never fails: filesystem and encoding
    /// faults come back as 404/500 responses.
    pub async fn handle(&self, req: &Request) -> Response {
        let path = req.path.as_str();

        if path == "/" {
            return Response::ok(Vec::new());
        }

        if let Some(name) = path.strip_prefix(FILES_PREFIX) {
            match req.method {
                Method::GET => return self.read_file(name).await,
                Method::POST => return self.write_file(name, &req.body).await,
                Method::Other(_) => {}
            }
        } else if let Some(message) = path.strip_prefix(ECHO_PREFIX) {
            return encoding::negotiate_response(req, Response::ok_sized(message));
        } else if path == USER_AGENT_PATH {
            return Response::ok_sized(req.user_agent());
        }

        Response::not_found("Path not found")
    }

    /// Location of `name` under the serving directory.
    ///
    /// Leading slashes are dropped so the name can never replace the
    /// directory outright. `..` segments are passed through to the OS.
    pub fn file_path(&self, name: &str) -> PathBuf {
        self.directory.join(name.trim_start_matches('/'))
    }

    async fn read_file(&self, name: &str) -> Response {
        let path = self.file_path(name);

        match tokio::fs::read(&path).await {
            Ok(contents) => ResponseBuilder::new(StatusCode::Ok)
                .header(CONTENT_TYPE, OCTET_STREAM)
                .header(CONTENT_LENGTH, contents.len().to_string())
                .body(contents)
                .build(),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "File not found");
                Response::not_found("File not found")
            }
            Err(e) => {
                tracing::error!(path = %path.display(), error = %e, "Failed to read file");
                Response::internal_error("Error reading file")
            }
        }
    }

    async fn write_file(&self, name: &str, body: &[u8]) -> Response {
        let path = self.file_path(name);

        match tokio::fs::write(&path, body).await {
            Ok(()) => {
                tracing::debug!(path = %path.display(), bytes = body.len(), "File written");
                ResponseBuilder::new(StatusCode::Created).build()
            }
            Err(e) => {
                tracing::error!(path = %path.display(), error = %e, "Failed to write file");
                Response::internal_error("Error writing file")
            }
        }
    }
}
