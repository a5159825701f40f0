//! Request handling module that provides access to HTTP request information and the
//! captured path segment.
//!
//! This module contains the core type for working with HTTP requests in the web layer:
//! - `RequestContext`: Provides access to the request and the route capture, if any

use bytes::Bytes;
use depot_http::protocol::Request;
use http::{HeaderMap, Method, Uri, Version};

/// Represents the context of an HTTP request, providing access to the request
/// itself and to the path segment captured by the matched route.
///
/// The lifetime parameter ensures that the context does not outlive the request
/// data it references.
pub struct RequestContext<'req> {
    request: &'req Request,
    capture: Option<&'req str>,
}

impl<'req> RequestContext<'req> {
    /// Creates a new RequestContext with the given request and route capture
    pub fn new(request: &'req Request, capture: Option<&'req str>) -> Self {
        Self { request, capture }
    }

    /// Returns the HTTP method of the request
    pub fn method(&self) -> &Method {
        self.request.method()
    }

    /// Returns the URI of the request
    pub fn uri(&self) -> &Uri {
        self.request.uri()
    }

    /// Returns the HTTP version of the request
    pub fn version(&self) -> Version {
        self.request.version()
    }

    /// Returns the HTTP headers of the request
    pub fn headers(&self) -> &HeaderMap {
        self.request.headers()
    }

    /// Returns the request body, fully buffered
    pub fn body(&self) -> &Bytes {
        self.request.body()
    }

    /// Returns the path segment captured by the matched route, if the route
    /// pattern contains a capture segment
    pub fn capture(&self) -> Option<&'req str> {
        self.capture
    }
}
