//! Core protocol types shared by the codec and the connection layer.
//!
//! The protocol module holds the data model of the engine:
//!
//! - **Requests** ([`request`]): [`RequestHead`] for a parsed header section
//!   and the [`Request`] alias for a request with its fully buffered body.
//!
//! - **Responses** ([`response`]): the immutable [`Response`] value together
//!   with the closed [`Status`] set and the [`ContentType`] selector.
//!
//! - **Errors** ([`error`]): [`ParseError`] for everything that can go wrong
//!   while reading a request, [`SendError`] for the writing side, and
//!   [`HttpError`] as the umbrella the connection layer reports.
//!
//! Requests are buffered, not streamed. The engine reads one bounded request
//! per connection, so the protocol types stay plain values without payload
//! state machines behind them.

mod request;
pub use request::Request;
pub use request::RequestHead;

mod response;
pub use response::ContentType;
pub use response::Response;
pub use response::Status;

mod error;
pub use error::HttpError;
pub use error::ParseError;
pub use error::SendError;
pub use error::UnsupportedStatus;
