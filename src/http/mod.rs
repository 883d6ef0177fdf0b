//! HTTP protocol implementation.
//!
//! A deliberately small HTTP/1.1 subset written directly against byte
//! buffers: one request per connection, no keep-alive, no chunked bodies.
//!
//! # Architecture
//!
//! - **`connection`**: Drives one exchange: read, parse, route, write, close
//! - **`parser`**: Turns a wire buffer into a [`request::Request`]
//! - **`request`**: HTTP request representation
//! - **`response`**: HTTP response representation with builder pattern
//! - **`encoding`**: `Accept-Encoding` negotiation and gzip bodies
//! - **`writer`**: Serializes and writes HTTP responses to the client
//!
//! # Connection State Machine
//!
//! ```text
//!        ┌─────────────┐
//!        │   Reading   │ ← One read of at most max_request_size bytes
//!        └──────┬──────┘
//!               │ Parsed            Parse fault → Writing (400)
//!               ▼                   Nothing read → Closed
//!        ┌──────────────────┐
//!        │   Processing     │ ← Router produces the response
//!        └──────┬───────────┘
//!               ▼
//!        ┌──────────────────┐
//!        │    Writing       │ ← Send response to client
//!        └──────┬───────────┘
//!               ▼
//!             Closed
//! ```
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use courier::http::connection::Connection;
//! use courier::routes::Router;
//! use tokio::net::TcpListener;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let listener = TcpListener::bind("127.0.0.1:4221").await?;
//!     let router = Arc::new(Router::new("/tmp"));
//!
//!     loop {
//!         let (socket, _addr) = listener.accept().await?;
//!         let router = router.clone();
//!         tokio::spawn(async move {
//!             let mut conn = Connection::new(socket, router);
//!             if let Err(e) = conn.run().await {
//!                 eprintln!("Connection error: {}", e);
//!             }
//!         });
//!     }
//! }
//! ```

pub mod request;
pub mod response;
pub mod parser;
pub mod encoding;
pub mod connection;
pub mod writer;
