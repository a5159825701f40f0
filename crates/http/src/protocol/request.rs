//! Request types produced by the decoder.
//!
//! A request moves through two shapes while it is being read: the head alone,
//! parsed as soon as the header section is complete, and the full [`Request`]
//! once the body bytes declared by `Content-Length` have arrived.

use bytes::Bytes;
use http::request::Parts;
use http::{HeaderMap, Method, Uri, Version};

/// A fully parsed request with its buffered body.
///
/// Bodies are always read to completion before the request is handed to a
/// handler, so the body type is plain [`Bytes`]. A request without a
/// `Content-Length` header carries an empty body.
pub type Request = http::Request<Bytes>;

/// The header portion of a request, before body bytes are attached.
///
/// Produced by the decoder when the header section has been parsed but the
/// body (if any) is still in flight.
#[derive(Debug)]
pub struct RequestHead {
    inner: http::Request<()>,
}

impl RequestHead {
    /// Consumes the head and returns the inner `http::Request<()>`.
    pub fn into_inner(self) -> http::Request<()> {
        self.inner
    }

    /// Attaches body bytes, completing the request.
    pub fn body(self, body: Bytes) -> Request {
        self.inner.map(|()| body)
    }

    pub fn method(&self) -> &Method {
        self.inner.method()
    }

    pub fn uri(&self) -> &Uri {
        self.inner.uri()
    }

    pub fn version(&self) -> Version {
        self.inner.version()
    }

    pub fn headers(&self) -> &HeaderMap {
        self.inner.headers()
    }
}

impl From<Parts> for RequestHead {
    #[inline]
    fn from(parts: Parts) -> Self {
        Self { inner: http::Request::from_parts(parts, ()) }
    }
}

impl From<http::Request<()>> for RequestHead {
    #[inline]
    fn from(inner: http::Request<()>) -> Self {
        Self { inner }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn head_keeps_parts_when_body_attached() {
        let inner = http::Request::builder().method(Method::POST).uri("/files/report").body(()).unwrap();
        let head = RequestHead::from(inner);

        assert_eq!(head.method(), &Method::POST);
        assert_eq!(head.uri().path(), "/files/report");

        let request = head.body(Bytes::from_static(b"contents"));

        assert_eq!(request.method(), &Method::POST);
        assert_eq!(request.uri().path(), "/files/report");
        assert_eq!(&request.body()[..], b"contents");
    }

    #[test]
    fn head_from_parts_round_trips() {
        let (parts, ()) = http::Request::builder().uri("/echo/abc").body(()).unwrap().into_parts();
        let head = RequestHead::from(parts);

        assert_eq!(head.method(), &Method::GET);
        assert_eq!(head.uri().path(), "/echo/abc");
        assert_eq!(head.version(), Version::HTTP_11);
        assert!(head.headers().is_empty());
    }
}
