//! Connection handling.
//!
//! [`HttpConnection`] drives one accepted connection through its whole
//! lifecycle: decode a single request, hand it to the handler, serialize the
//! response, and shut down. There are no persistent connections; one request
//! is served per connection.
//!
//! Every failure stays inside the connection. A parse error or an I/O error
//! ends the connection it happened on and is reported to the caller, a
//! handler error is logged and ends the connection without a response.

mod http_connection;

pub use http_connection::HttpConnection;
