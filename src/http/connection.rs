use std::sync::Arc;

use bytes::BytesMut;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite};

use crate::http::parser::{ParseError, parse_http_request};
use crate::http::request::Request;
use crate::http::response::Response;
use crate::http::writer::ResponseWriter;
use crate::routes::Router;

/// Default size of the single read made per connection. Bytes beyond it
/// are never read.
pub const MAX_REQUEST_SIZE: usize = 1024;

/// One request/response exchange over a stream.
pub struct Connection<S> {
    stream: S,
    router: Arc<Router>,
    max_request_size: usize,
    state: ConnectionState,
}

pub enum ConnectionState {
    Reading,
    Processing(Request),
    Writing(ResponseWriter),
    Closed,
}

impl<S> Connection<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    pub fn new(stream: S, router: Arc<Router>) -> Self {
        Self::with_max_request_size(stream, router, MAX_REQUEST_SIZE)
    }

    pub fn with_max_request_size(stream: S, router: Arc<Router>, max_request_size: usize) -> Self {
        Self {
            stream,
            router,
            max_request_size,
            state: ConnectionState::Reading,
        }
    }

    pub async fn run(&mut self) -> anyhow::Result<()> {
        loop {
            match &mut self.state {
                ConnectionState::Reading => {
                    self.state = match self.read_request().await? {
                        Some(Ok(req)) => ConnectionState::Processing(req),
                        Some(Err(e)) => {
                            tracing::warn!(error = %e, "Rejecting malformed request");
                            ConnectionState::Writing(ResponseWriter::new(&Response::bad_request()))
                        }
                        None => ConnectionState::Closed,
                    };
                }

                ConnectionState::Processing(req) => {
                    let response = self.router.handle(req).await;

                    tracing::info!(
                        method = %req.method,
                        path = %req.path,
                        status = response.status.as_u16(),
                        "Request served"
                    );

                    self.state = ConnectionState::Writing(ResponseWriter::new(&response));
                }

                ConnectionState::Writing(writer) => {
                    writer.write_to_stream(&mut self.stream).await?;
                    // No keep-alive: one exchange per connection.
                    self.state = ConnectionState::Closed;
                }

                ConnectionState::Closed => {
                    break;
                }
            }
        }

        Ok(())
    }

    /// Makes exactly one read of at most `max_request_size` bytes and parses
    /// it. `None` when the peer closed without sending anything.
    pub async fn read_request(&mut self) -> anyhow::Result<Option<Result<Request, ParseError>>> {
        let mut buffer = BytesMut::zeroed(self.max_request_size);
        let n = self.stream.read(&mut buffer[..]).await?;
        buffer.truncate(n);

        if n == 0 {
            tracing::debug!("Client closed connection before sending a request");
            return Ok(None);
        }

        if n >= self.max_request_size {
            tracing::warn!(
                limit = self.max_request_size,
                "Request filled the read buffer and may be truncated"
            );
        }

        let parsed = parse_http_request(&buffer);

        if let Ok(req) = &parsed {
            let declared = req.content_length();
            if declared > req.body.len() {
                tracing::warn!(
                    declared,
                    received = req.body.len(),
                    "Body shorter than Content-Length"
                );
            }
        }

        Ok(Some(parsed))
    }
}
