//! HTTP request decoder.
//!
//! Turns raw connection bytes into a complete [`Request`] in two phases:
//!
//! 1. Header section: parsed with `httparse` into a [`RequestHead`], using
//!    recorded byte ranges so header names and values are sliced out of the
//!    read buffer without copying.
//! 2. Body: framed by the `Content-Length` header alone. A request without
//!    the header has an empty body; a request with one is complete only once
//!    exactly that many bytes have arrived.
//!
//! # Limits
//!
//! - Maximum number of headers: 64
//! - Maximum header section size: 8KB
//! - Maximum body size: 1MB
//!
//! A repeated header name keeps only its last occurrence, matching the
//! engine's single-value header model.

use std::io;
use std::mem::MaybeUninit;

use bytes::{Bytes, BytesMut};
use http::{HeaderMap, HeaderName, HeaderValue, Request};
use httparse::{Error, Status};
use tokio_util::codec::Decoder;
use tracing::trace;

use crate::ensure;

use crate::protocol::{ParseError, RequestHead};

/// Maximum number of headers allowed in a request
const MAX_HEADER_NUM: usize = 64;

/// Maximum size in bytes allowed for the entire header section
const MAX_HEADER_BYTES: usize = 8 * 1024;

/// Maximum size in bytes allowed for the request body
const MAX_BODY_BYTES: u64 = 1024 * 1024;

/// Decoder for HTTP requests implementing the [`Decoder`] trait.
///
/// The decoder holds a parsed head in `pending` while waiting for the body
/// bytes announced by `Content-Length` to arrive.
#[derive(Debug)]
pub struct RequestDecoder {
    pending: Option<(RequestHead, u64)>,
}

impl RequestDecoder {
    /// Creates a new `RequestDecoder` instance
    pub fn new() -> Self {
        Default::default()
    }
}

impl Default for RequestDecoder {
    fn default() -> Self {
        Self { pending: None }
    }
}

impl Decoder for RequestDecoder {
    type Item = crate::protocol::Request;
    type Error = ParseError;

    /// Attempts to decode a complete request from the provided bytes buffer.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(request))` once the head and the full body have arrived
    /// - `Ok(None)` if more data is needed
    /// - `Err(ParseError)` if the bytes do not form a valid request
    ///
    /// # Errors
    ///
    /// Returns `ParseError` if:
    /// - The request line or a header line cannot be parsed
    /// - The number of headers exceeds `MAX_HEADER_NUM`
    /// - The header section exceeds `MAX_HEADER_BYTES`
    /// - The HTTP version is not 1.0 or 1.1
    /// - The `Content-Length` value is not a valid `u64` or exceeds
    ///   `MAX_BODY_BYTES`
    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        // a head parsed earlier is waiting for its body
        if let Some((head, content_length)) = self.pending.take() {
            return self.read_body(head, content_length, src);
        }

        // Fast path: minimum valid request is "GET / HTTP/1.1\r\n\r\n"
        if src.len() < 14 {
            return Ok(None);
        }

        // Create an empty request parser and uninitialized headers array
        let mut req = httparse::Request::new(&mut []);
        let mut headers: [MaybeUninit<httparse::Header>; MAX_HEADER_NUM] = unsafe { MaybeUninit::uninit().assume_init() };

        // Parse the header section, return error if exceeds max headers or invalid format
        let parsed_result = req.parse_with_uninit_headers(src, &mut headers).map_err(|e| match e {
            Error::TooManyHeaders => ParseError::too_many_headers(MAX_HEADER_NUM),
            e => ParseError::invalid_header(e.to_string()),
        });

        match parsed_result? {
            Status::Complete(body_offset) => {
                trace!(header_size = body_offset, "parsed header section");
                ensure!(body_offset <= MAX_HEADER_BYTES, ParseError::too_large_header(body_offset, MAX_HEADER_BYTES));

                let header_count = req.headers.len();
                ensure!(header_count <= MAX_HEADER_NUM, ParseError::too_many_headers(header_count));

                // Record byte range indices for each header before the buffer is split
                let mut header_index: [HeaderIndex; MAX_HEADER_NUM] = EMPTY_HEADER_INDEX_ARRAY;
                HeaderIndex::record(src, req.headers, &mut header_index);

                let version = match req.version {
                    Some(0) => http::Version::HTTP_10,
                    Some(1) => http::Version::HTTP_11,
                    // HTTP/2 and HTTP/3 not supported
                    _ => return Err(ParseError::InvalidVersion(req.version)),
                };

                let mut header_builder = Request::builder()
                    .method(req.method.ok_or(ParseError::InvalidMethod)?)
                    .uri(req.path.ok_or(ParseError::InvalidUri)?)
                    .version(version);

                // The builder only fails when httparse let a bad method or uri through
                let headers = header_builder.headers_mut().ok_or(ParseError::InvalidUri)?;
                headers.reserve(header_count);

                // Split the header section off the source buffer
                let header_bytes = src.split_to(body_offset).freeze();
                for index in &header_index[..header_count] {
                    // Safe to unwrap since httparse verified the header name is valid ASCII
                    let name = HeaderName::from_bytes(&header_bytes[index.name.0..index.name.1]).unwrap();

                    // Safe to use from_maybe_shared_unchecked since httparse verified
                    // the header value contains only visible ASCII chars
                    let value = unsafe { HeaderValue::from_maybe_shared_unchecked(header_bytes.slice(index.value.0..index.value.1)) };

                    // insert, not append: a repeated header keeps its last occurrence
                    headers.insert(name, value);
                }

                let head = header_builder.body(()).map(RequestHead::from).map_err(|e| ParseError::invalid_header(e.to_string()))?;

                let content_length = parse_content_length(head.headers())?;
                ensure!(content_length <= MAX_BODY_BYTES, ParseError::too_large_body(content_length, MAX_BODY_BYTES));

                self.read_body(head, content_length, src)
            }
            Status::Partial => {
                ensure!(src.len() <= MAX_HEADER_BYTES, ParseError::too_large_header(src.len(), MAX_HEADER_BYTES));
                Ok(None)
            }
        }
    }

    /// Like `decode`, but called at EOF: a buffered partial request can no
    /// longer complete and is reported as an error.
    fn decode_eof(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        match self.decode(src)? {
            Some(request) => Ok(Some(request)),
            None => {
                ensure!(
                    src.is_empty() && self.pending.is_none(),
                    ParseError::io(io::Error::new(io::ErrorKind::UnexpectedEof, "connection closed before a full request arrived"))
                );
                Ok(None)
            }
        }
    }
}

impl RequestDecoder {
    /// Completes the request once `content_length` body bytes are available,
    /// parking the head in `pending` otherwise.
    fn read_body(&mut self, head: RequestHead, content_length: u64, src: &mut BytesMut) -> Result<Option<Request<Bytes>>, ParseError> {
        if content_length == 0 {
            return Ok(Some(head.body(Bytes::new())));
        }

        let length = content_length as usize;
        if src.len() < length {
            src.reserve(length - src.len());
            self.pending = Some((head, content_length));
            return Ok(None);
        }

        let body = src.split_to(length).freeze();
        Ok(Some(head.body(body)))
    }
}

/// Reads the `Content-Length` header, treating an absent header as a zero
/// length body.
fn parse_content_length(headers: &HeaderMap) -> Result<u64, ParseError> {
    match headers.get(http::header::CONTENT_LENGTH) {
        Some(value) => {
            let value_str = value.to_str().map_err(|_| ParseError::invalid_content_length("value can't to_str"))?;
            value_str.trim().parse::<u64>().map_err(|_| ParseError::invalid_content_length(format!("value {value_str} is not u64")))
        }
        None => Ok(0),
    }
}

/// Stores the byte range positions of a header's name and value within the original buffer.
///
/// This struct is used internally by the decoder to perform zero-copy parsing of headers
/// by recording the positions of header names and values rather than copying the data.
#[derive(Clone, Copy)]
struct HeaderIndex {
    /// Start and end byte positions of the header name
    pub(crate) name: (usize, usize),
    /// Start and end byte positions of the header value
    pub(crate) value: (usize, usize),
}

const EMPTY_HEADER_INDEX: HeaderIndex = HeaderIndex { name: (0, 0), value: (0, 0) };

const EMPTY_HEADER_INDEX_ARRAY: [HeaderIndex; MAX_HEADER_NUM] = [EMPTY_HEADER_INDEX; MAX_HEADER_NUM];

impl HeaderIndex {
    /// Records the byte positions of header names and values from the parsed headers.
    fn record(bytes: &[u8], headers: &[httparse::Header<'_>], indices: &mut [HeaderIndex]) {
        let bytes_ptr = bytes.as_ptr() as usize;
        for (header, indices) in headers.iter().zip(indices.iter_mut()) {
            let name_start = header.name.as_ptr() as usize - bytes_ptr;
            let name_end = name_start + header.name.len();
            indices.name = (name_start, name_end);
            let value_start = header.value.as_ptr() as usize - bytes_ptr;
            let value_end = value_start + header.value.len();
            indices.value = (value_start, value_end);
        }
    }
}
