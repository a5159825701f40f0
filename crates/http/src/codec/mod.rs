//! Byte-level codec for the engine.
//!
//! Pairs a [`RequestDecoder`] with a [`ResponseEncoder`], both built on the
//! `tokio_util` codec traits so the connection layer can drive them through
//! `FramedRead` and `FramedWrite`:
//!
//! - [`RequestDecoder`]: raw bytes in, one complete [`Request`] out, with the
//!   body framed by `Content-Length`
//! - [`ResponseEncoder`]: one [`Response`] value in, its exact wire bytes out
//!
//! [`Request`]: crate::protocol::Request
//! [`Response`]: crate::protocol::Response

mod request_decoder;
mod response_encoder;

pub use request_decoder::RequestDecoder;
pub use response_encoder::ResponseEncoder;
