//! HTTP response encoder.
//!
//! Serializes a [`Response`] value into wire bytes. The header set is fixed
//! and derived from the value: `Content-Type`, `Content-Length` and, for
//! gzip-flagged bodies, `Content-Encoding`, emitted in that order and only
//! when a body is present. The body bytes are appended exactly as attached.
//!
//! The engine serves one response per connection, so encoding a second
//! message on the same encoder is an error.

use std::io;
use std::io::Write;

use bytes::{BufMut, BytesMut};
use tokio_util::codec::Encoder;

use crate::ensure;
use crate::protocol::{Response, SendError};

/// Initial buffer size reserved for a serialized response head
const INIT_HEAD_SIZE: usize = 4 * 1024;

/// Encoder for [`Response`] values implementing the [`Encoder`] trait.
#[derive(Debug)]
pub struct ResponseEncoder {
    sent: bool,
}

impl ResponseEncoder {
    /// Creates a new `ResponseEncoder` instance
    pub fn new() -> Self {
        Default::default()
    }
}

impl Default for ResponseEncoder {
    fn default() -> Self {
        Self { sent: false }
    }
}

impl Encoder<Response> for ResponseEncoder {
    type Error = SendError;

    /// Encodes a response into the provided bytes buffer.
    ///
    /// # Errors
    ///
    /// Returns `SendError::ResponseAlreadySent` if a response was already
    /// encoded on this encoder.
    fn encode(&mut self, response: Response, dst: &mut BytesMut) -> Result<(), Self::Error> {
        ensure!(!self.sent, SendError::ResponseAlreadySent);
        self.sent = true;

        dst.reserve(INIT_HEAD_SIZE + response.body().map_or(0, |body| body.len()));

        let status = response.status();
        write!(FastWrite(dst), "HTTP/1.1 {} {}\r\n", status.as_u16(), status.reason())?;

        match response.body() {
            Some(body) => {
                write!(FastWrite(dst), "Content-Type: {}\r\n", response.content_type().as_mime())?;
                write!(FastWrite(dst), "Content-Length: {}\r\n", body.len())?;
                if response.is_gzipped() {
                    dst.put_slice(b"Content-Encoding: gzip\r\n");
                }
                dst.put_slice(b"\r\n");
                dst.put_slice(body);
            }
            None => {
                dst.put_slice(b"\r\n");
            }
        }

        Ok(())
    }
}

/// Fast writer implementation for writing to BytesMut.
///
/// Avoids going through an intermediate `String` when formatting the status
/// line and headers into the already reserved buffer.
struct FastWrite<'a>(&'a mut BytesMut);

impl Write for FastWrite<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.put_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
