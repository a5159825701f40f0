//! An asynchronous minimal HTTP/1.1 request-response engine
//!
//! This crate provides a small, modular HTTP/1.1 server core built on top of
//! tokio. It decodes one request per connection, hands it to a handler, writes
//! the handler's response and closes the connection.
//!
//! # Features
//!
//! - HTTP/1.1 request parsing with zero-copy header handling
//! - Asynchronous I/O using tokio
//! - Content-Length framed request bodies, fully buffered before dispatch
//! - Immutable response values serialized by a dedicated encoder
//! - Clean error handling
//!
//!
//! # Example
//!
//! ```no_run
//! use std::error::Error;
//! use std::sync::Arc;
//! use tokio::net::TcpListener;
//! use tracing::{error, info, warn, Level};
//! use tracing_subscriber::FmtSubscriber;
//! use depot_http::connection::HttpConnection;
//! use depot_http::handler::make_handler;
//! use depot_http::protocol::{Request, Response, Status};
//!
//! #[tokio::main]
//! async fn main() {
//!     // Initialize logging
//!     let subscriber = FmtSubscriber::builder()
//!         .with_max_level(Level::INFO)
//!         .finish();
//!     tracing::subscriber::set_global_default(subscriber)
//!         .expect("setting default subscriber failed");
//!
//!     info!(port = 4221, "start listening");
//!     let tcp_listener = match TcpListener::bind("127.0.0.1:4221").await {
//!         Ok(tcp_listener) => tcp_listener,
//!         Err(e) => {
//!             error!(cause = %e, "bind server error");
//!             return;
//!         }
//!     };
//!
//!     let handler = Arc::new(make_handler(hello_world));
//!
//!     loop {
//!         let (tcp_stream, _remote_addr) = match tcp_listener.accept().await {
//!             Ok(stream_and_addr) => stream_and_addr,
//!             Err(e) => {
//!                 warn!(cause = %e, "failed to accept");
//!                 continue;
//!             }
//!         };
//!
//!         let handler = handler.clone();
//!
//!         tokio::spawn(async move {
//!             let (reader, writer) = tcp_stream.into_split();
//!             let connection = HttpConnection::new(reader, writer);
//!             match connection.process(handler).await {
//!                 Ok(_) => {
//!                     info!("finished process, connection shutdown");
//!                 }
//!                 Err(e) => {
//!                     error!("service has error, cause {}, connection shutdown", e);
//!                 }
//!             }
//!         });
//!     }
//! }
//!
//! async fn hello_world(request: Request) -> Result<Response, Box<dyn Error + Send + Sync>> {
//!     let path = request.uri().path().to_string();
//!     info!("request path {}", path);
//!
//!     Ok(Response::text(Status::Ok, "Hello World!\r\n"))
//! }
//! ```
//!
//!
//! # Architecture
//!
//! The crate is organized into several key modules:
//!
//! - [`connection`]: Core connection handling and lifecycle management
//! - [`protocol`]: Protocol types and abstractions
//! - [`codec`]: Protocol encoding/decoding implementation
//! - [`handler`]: Request handler traits and utilities
//!
//!
//!
//! # Core Components
//!
//! ## Connection Handling
//!
//! The [`connection::HttpConnection`] type is the main entry point for processing
//! HTTP connections. It decodes a single request, dispatches it, sends the
//! response and closes. Parse and send failures are reported to the caller;
//! handler failures are logged and the connection closes without a response.
//!
//! ## Request Processing
//!
//! Requests are processed through handler functions that implement the [`handler::Handler`]
//! trait. The crate provides utilities for creating handlers from async functions through
//! [`handler::make_handler`].
//!
//! ## Responses
//!
//! Responses are immutable [`protocol::Response`] values carrying a status, an
//! optional body and its content metadata. The [`codec::ResponseEncoder`]
//! serializes a value verbatim and never touches the body bytes.
//!
//! ## Error Handling
//!
//! The crate uses custom error types that implement `std::error::Error`:
//!
//! - [`protocol::HttpError`]: Top-level error type
//! - [`protocol::ParseError`]: Request parsing errors
//! - [`protocol::SendError`]: Response sending errors
//!
//! # Limitations
//!
//! - HTTP/1.1 only (no HTTP/2 or HTTP/3)
//! - No TLS support (use a reverse proxy for HTTPS)
//! - One request per connection, no keep-alive
//! - Maximum header size: 8KB
//! - Maximum number of headers: 64
//! - Maximum body size: 1MB
//!
//! # Safety
//!
//! The crate uses unsafe code in a few well-documented places for performance
//! optimization, particularly in header parsing. All unsafe usage is carefully
//! reviewed and tested.

pub mod codec;
pub mod connection;
pub mod handler;
pub mod protocol;

mod utils;
pub(crate) use utils::ensure;
