//! The route targets served by the default server.

use std::error::Error;

use async_trait::async_trait;
use bytes::Bytes;
use depot_http::protocol::{Response, Status};
use http::header::USER_AGENT;

use crate::encoding::negotiate;
use crate::handler::RequestHandler;
use crate::request::RequestContext;
use crate::store::{FileStore, StoreError};

/// Answers the bare root path with an empty success.
#[derive(Debug)]
pub struct RootHandler;

#[async_trait]
impl RequestHandler for RootHandler {
    async fn invoke(&self, _context: RequestContext<'_>) -> Result<Response, Box<dyn Error + Send + Sync>> {
        Ok(Response::empty(Status::Ok))
    }
}

/// Echoes the captured path segment back as plain text.
#[derive(Debug)]
pub struct EchoHandler;

#[async_trait]
impl RequestHandler for EchoHandler {
    async fn invoke(&self, context: RequestContext<'_>) -> Result<Response, Box<dyn Error + Send + Sync>> {
        let value = context.capture().unwrap_or_default();
        let negotiated = negotiate(context.headers(), Bytes::copy_from_slice(value.as_bytes()))?;
        Ok(Response::text(Status::Ok, negotiated.body).with_gzip(negotiated.gzipped))
    }
}

/// Reports the request's `User-Agent` header value as plain text.
#[derive(Debug)]
pub struct UserAgentHandler;

#[async_trait]
impl RequestHandler for UserAgentHandler {
    async fn invoke(&self, context: RequestContext<'_>) -> Result<Response, Box<dyn Error + Send + Sync>> {
        let agent = context
            .headers()
            .get(USER_AGENT)
            .and_then(|value| value.to_str().ok())
            .filter(|value| !value.is_empty());

        match agent {
            Some(agent) => Ok(Response::text(Status::Ok, Bytes::copy_from_slice(agent.as_bytes()))),
            None => Ok(Response::not_found()),
        }
    }
}

/// Serves the named entry from the file store as a binary body.
#[derive(Debug)]
pub struct FileFetchHandler {
    store: FileStore,
}

impl FileFetchHandler {
    pub fn new(store: FileStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl RequestHandler for FileFetchHandler {
    async fn invoke(&self, context: RequestContext<'_>) -> Result<Response, Box<dyn Error + Send + Sync>> {
        let name = context.capture().unwrap_or_default();
        match self.store.read(name).await {
            Ok(contents) => Ok(Response::octet_stream(Status::Ok, contents)),
            Err(StoreError::NotFound { .. }) => Ok(Response::not_found()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Stores the request body under the named entry, truncating any previous
/// contents. An empty body reports as not found.
#[derive(Debug)]
pub struct FileSaveHandler {
    store: FileStore,
}

impl FileSaveHandler {
    pub fn new(store: FileStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl RequestHandler for FileSaveHandler {
    async fn invoke(&self, context: RequestContext<'_>) -> Result<Response, Box<dyn Error + Send + Sync>> {
        let name = context.capture().unwrap_or_default();
        if context.body().is_empty() {
            return Ok(Response::not_found());
        }

        self.store.write(name, context.body()).await?;
        Ok(Response::created())
    }
}
