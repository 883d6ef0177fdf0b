//! Courier - minimal HTTP/1.1 server
//!
//! Parses requests straight off the socket, routes them to a handful of
//! fixed behaviours (ping, echo, user-agent, file read/write) and writes the
//! response back by hand.

pub mod config;
pub mod http;
pub mod routes;
pub mod server;
