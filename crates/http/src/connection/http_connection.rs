use std::error::Error;
use std::sync::Arc;

use futures::{SinkExt, StreamExt};
use tokio::io::{AsyncRead, AsyncWrite};
use tokio_util::codec::{FramedRead, FramedWrite};
use tracing::{error, info};

use crate::codec::{RequestDecoder, ResponseEncoder};
use crate::handler::Handler;
use crate::protocol::HttpError;

/// An HTTP connection serving exactly one request.
///
/// `HttpConnection` pairs the request decoder with the response encoder over
/// a split stream and runs the read, handle, write sequence once:
///
/// - Reading and decoding the request
/// - Invoking the handler
/// - Serializing and flushing the response
///
/// # Type Parameters
///
/// * `R`: The async readable stream type
/// * `W`: The async writable stream type
pub struct HttpConnection<R, W> {
    framed_read: FramedRead<R, RequestDecoder>,
    framed_write: FramedWrite<W, ResponseEncoder>,
}

impl<R, W> HttpConnection<R, W>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    pub fn new(reader: R, writer: W) -> Self {
        Self {
            framed_read: FramedRead::with_capacity(reader, RequestDecoder::new(), 8 * 1024),
            framed_write: FramedWrite::new(writer, ResponseEncoder::new()),
        }
    }

    /// Serves one request from the connection, then returns.
    ///
    /// Returns `Ok(())` when the response was fully flushed, when the peer
    /// closed before sending a request, or when the handler failed (the
    /// failure is logged and the connection closed without a response).
    /// Returns an error when the request could not be parsed or the response
    /// could not be written; either way nothing partial is left behind, the
    /// connection is simply dropped.
    pub async fn process<H>(mut self, handler: Arc<H>) -> Result<(), HttpError>
    where
        H: Handler,
    {
        match self.framed_read.next().await {
            Some(Ok(request)) => {
                info!(method = %request.method(), path = request.uri().path(), "request received");

                match handler.call(request).await {
                    Ok(response) => {
                        let status = response.status();
                        self.framed_write.send(response).await.map_err(HttpError::from)?;
                        info!(%status, "response sent");
                        Ok(())
                    }
                    Err(e) => {
                        let cause: Box<dyn Error + Send + Sync> = e.into();
                        error!(cause = %cause, "handler error, closing connection without a response");
                        Ok(())
                    }
                }
            }

            Some(Err(e)) => {
                error!(cause = %e, "can't parse request, closing connection");
                Err(e.into())
            }

            None => {
                info!("connection closed before a request arrived");
                Ok(())
            }
        }
    }
}
