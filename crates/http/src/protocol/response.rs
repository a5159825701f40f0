//! Response modeling for the engine.
//!
//! A [`Response`] is an immutable value assembled through its constructors,
//! never mutated afterwards. The status set is closed: only the codes the
//! engine actually emits are representable, every other code is rejected at
//! the type boundary. Header generation is derived from the value at
//! serialization time, so a response cannot be observed in a half-built
//! state.

use std::fmt;

use bytes::Bytes;
use mime::Mime;

use crate::protocol::UnsupportedStatus;

/// The status codes this engine can put on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    Ok,
    Created,
    NotFound,
}

impl Status {
    pub fn as_u16(self) -> u16 {
        match self {
            Status::Ok => 200,
            Status::Created => 201,
            Status::NotFound => 404,
        }
    }

    pub fn reason(self) -> &'static str {
        match self {
            Status::Ok => "OK",
            Status::Created => "Created",
            Status::NotFound => "Not Found",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.as_u16(), self.reason())
    }
}

impl TryFrom<u16> for Status {
    type Error = UnsupportedStatus;

    fn try_from(code: u16) -> Result<Self, Self::Error> {
        match code {
            200 => Ok(Status::Ok),
            201 => Ok(Status::Created),
            404 => Ok(Status::NotFound),
            other => Err(UnsupportedStatus(other)),
        }
    }
}

/// Media type attached to a response body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentType {
    Text,
    OctetStream,
}

impl ContentType {
    pub fn as_mime(self) -> Mime {
        match self {
            ContentType::Text => mime::TEXT_PLAIN,
            ContentType::OctetStream => mime::APPLICATION_OCTET_STREAM,
        }
    }
}

/// An immutable response value.
///
/// The body carried here is exactly what goes on the wire: content encoding
/// happens before the body is attached, never during serialization. When the
/// body is `None` the serialized response has no entity headers at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    status: Status,
    content_type: ContentType,
    gzipped: bool,
    body: Option<Bytes>,
}

impl Response {
    /// A response with no body. No entity headers will be emitted.
    pub fn empty(status: Status) -> Self {
        Self { status, content_type: ContentType::Text, gzipped: false, body: None }
    }

    /// A `text/plain` response carrying `body` verbatim.
    pub fn text(status: Status, body: impl Into<Bytes>) -> Self {
        Self { status, content_type: ContentType::Text, gzipped: false, body: Some(body.into()) }
    }

    /// An `application/octet-stream` response carrying `body` verbatim.
    pub fn octet_stream(status: Status, body: impl Into<Bytes>) -> Self {
        Self { status, content_type: ContentType::OctetStream, gzipped: false, body: Some(body.into()) }
    }

    /// Shorthand for the empty `201 Created` response.
    pub fn created() -> Self {
        Self::empty(Status::Created)
    }

    /// Shorthand for the empty `404 Not Found` response.
    pub fn not_found() -> Self {
        Self::empty(Status::NotFound)
    }

    /// Marks the body as gzip-compressed.
    ///
    /// The flag only drives the `Content-Encoding` header. The caller attaches
    /// a body it has already compressed, the engine never re-encodes.
    pub fn with_gzip(mut self, gzipped: bool) -> Self {
        self.gzipped = gzipped;
        self
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn content_type(&self) -> ContentType {
        self.content_type
    }

    pub fn is_gzipped(&self) -> bool {
        self.gzipped
    }

    pub fn body(&self) -> Option<&Bytes> {
        self.body.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_maps_to_code_and_reason() {
        assert_eq!(Status::Ok.as_u16(), 200);
        assert_eq!(Status::Ok.reason(), "OK");
        assert_eq!(Status::Created.as_u16(), 201);
        assert_eq!(Status::Created.reason(), "Created");
        assert_eq!(Status::NotFound.as_u16(), 404);
        assert_eq!(Status::NotFound.reason(), "Not Found");
    }

    #[test]
    fn status_display_is_code_and_reason() {
        assert_eq!(Status::NotFound.to_string(), "404 Not Found");
    }

    #[test]
    fn supported_codes_round_trip() {
        assert_eq!(Status::try_from(200), Ok(Status::Ok));
        assert_eq!(Status::try_from(201), Ok(Status::Created));
        assert_eq!(Status::try_from(404), Ok(Status::NotFound));
    }

    #[test]
    fn unsupported_code_is_rejected() {
        assert_eq!(Status::try_from(500), Err(UnsupportedStatus(500)));
        assert_eq!(UnsupportedStatus(500).to_string(), "unsupported status code: 500");
    }

    #[test]
    fn content_type_maps_to_mime() {
        assert_eq!(ContentType::Text.as_mime(), mime::TEXT_PLAIN);
        assert_eq!(ContentType::OctetStream.as_mime(), mime::APPLICATION_OCTET_STREAM);
    }

    #[test]
    fn empty_response_has_no_body() {
        let response = Response::empty(Status::Ok);
        assert_eq!(response.status(), Status::Ok);
        assert!(response.body().is_none());
        assert!(!response.is_gzipped());
    }

    #[test]
    fn text_response_keeps_body_verbatim() {
        let response = Response::text(Status::Ok, "abc");
        assert_eq!(response.content_type(), ContentType::Text);
        assert_eq!(response.body().map(|body| &body[..]), Some(&b"abc"[..]));
    }

    #[test]
    fn with_gzip_only_sets_the_flag() {
        let response = Response::octet_stream(Status::Ok, &b"\x1f\x8b fake"[..]).with_gzip(true);
        assert!(response.is_gzipped());
        assert_eq!(response.body().map(|body| &body[..]), Some(&b"\x1f\x8b fake"[..]));
    }

    #[test]
    fn shorthand_constructors() {
        assert_eq!(Response::created().status(), Status::Created);
        assert_eq!(Response::not_found().status(), Status::NotFound);
        assert!(Response::not_found().body().is_none());
    }
}
