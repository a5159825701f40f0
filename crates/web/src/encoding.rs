//! Content negotiation for response bodies.
//!
//! The only coding on offer is gzip. A body is compressed before it is
//! attached to a response, so the wire codec never has to touch body bytes.

use std::io;
use std::io::Write;

use bytes::Bytes;
use flate2::Compression;
use flate2::write::GzEncoder;
use http::HeaderMap;
use http::header::ACCEPT_ENCODING;

/// Outcome of negotiating a body against the request headers.
#[derive(Debug)]
pub struct Negotiated {
    pub body: Bytes,
    pub gzipped: bool,
}

/// Compresses the body when the request accepts gzip, otherwise passes it
/// through untouched.
pub fn negotiate(headers: &HeaderMap, body: Bytes) -> io::Result<Negotiated> {
    if accepts_gzip(headers) {
        let compressed = gzip(&body)?;
        Ok(Negotiated { body: compressed.into(), gzipped: true })
    } else {
        Ok(Negotiated { body, gzipped: false })
    }
}

/// Checks whether any comma separated `Accept-Encoding` token is exactly
/// `gzip`, ignoring surrounding whitespace and case. Tokens carrying
/// parameters such as `gzip;q=0` do not count.
fn accepts_gzip(headers: &HeaderMap) -> bool {
    headers
        .get(ACCEPT_ENCODING)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.split(',').any(|token| token.trim().eq_ignore_ascii_case("gzip")))
}

fn gzip(data: &[u8]) -> io::Result<Vec<u8>> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::best());
    encoder.write_all(data)?;
    encoder.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::read::GzDecoder;
    use http::HeaderValue;
    use std::io::Read;

    fn headers_with(value: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT_ENCODING, HeaderValue::from_static(value));
        headers
    }

    #[test]
    fn gzip_token_triggers_compression() {
        assert!(accepts_gzip(&headers_with("gzip")));
        assert!(accepts_gzip(&headers_with(" GZIP ")));
        assert!(accepts_gzip(&headers_with("identity, gzip")));
        assert!(accepts_gzip(&headers_with("deflate,gzip,br")));
    }

    #[test]
    fn other_tokens_do_not_trigger_compression() {
        assert!(!accepts_gzip(&headers_with("identity")));
        assert!(!accepts_gzip(&headers_with("gzip;q=0")));
        assert!(!accepts_gzip(&headers_with("gzipped")));
        assert!(!accepts_gzip(&HeaderMap::new()));
    }

    #[test]
    fn body_passes_through_without_gzip() {
        let body = Bytes::from_static(b"hello");

        let negotiated = negotiate(&HeaderMap::new(), body.clone()).unwrap();

        assert!(!negotiated.gzipped);
        assert_eq!(negotiated.body, body);
    }

    #[test]
    fn gzipped_body_round_trips() {
        let negotiated = negotiate(&headers_with("gzip"), Bytes::from_static(b"hello hello hello")).unwrap();

        assert!(negotiated.gzipped);
        assert_ne!(&negotiated.body[..], b"hello hello hello");

        let mut decoder = GzDecoder::new(&negotiated.body[..]);
        let mut decoded = Vec::new();
        decoder.read_to_end(&mut decoded).unwrap();
        assert_eq!(decoded, b"hello hello hello");
    }
}
