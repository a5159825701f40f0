use crate::RequestContext;
use async_trait::async_trait;
use depot_http::protocol::Response;

use std::error::Error;

/// A routed endpoint. One implementation per route target, invoked with the
/// request context for the matched route.
#[async_trait]
pub trait RequestHandler: Send + Sync {
    async fn invoke(&self, context: RequestContext<'_>) -> Result<Response, Box<dyn Error + Send + Sync>>;
}
