use crate::request::RequestContext;
use crate::router::Router;
use std::error::Error;

use depot_http::connection::HttpConnection;
use depot_http::handler::Handler;
use depot_http::protocol::{Request, Response};

use async_trait::async_trait;
use std::net::SocketAddr;
use std::sync::Arc;
use thiserror::Error;
use tokio::net::TcpListener;
use tracing::{error, info, warn};

pub struct ServerBuilder {
    router: Option<Router>,
    address: Option<SocketAddr>,
}

impl ServerBuilder {
    fn new() -> Self {
        Self { router: None, address: None }
    }

    pub fn address(mut self, address: SocketAddr) -> Self {
        self.address = Some(address);
        self
    }

    pub fn router(mut self, router: Router) -> Self {
        self.router = Some(router);
        self
    }

    pub fn build(self) -> Result<Server, ServerBuildError> {
        let router = self.router.ok_or(ServerBuildError::MissingRouter)?;
        let address = self.address.ok_or(ServerBuildError::MissingAddress)?;
        Ok(Server { router, address })
    }
}

pub struct Server {
    router: Router,
    address: SocketAddr,
}

impl std::fmt::Debug for Server {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Server").field("address", &self.address).finish_non_exhaustive()
    }
}

#[derive(Error, Debug)]
pub enum ServerBuildError {
    #[error("router must be set")]
    MissingRouter,
    #[error("address must be set")]
    MissingAddress,
}

impl Server {
    pub fn builder() -> ServerBuilder {
        ServerBuilder::new()
    }

    pub async fn start(self) {
        info!(address = %self.address, "start listening");
        let tcp_listener = match TcpListener::bind(self.address).await {
            Ok(tcp_listener) => tcp_listener,
            Err(e) => {
                error!(cause = %e, "bind server error");
                return;
            }
        };

        let handler = Arc::new(self);
        loop {
            let (tcp_stream, _remote_addr) = match tcp_listener.accept().await {
                Ok(stream_and_addr) => stream_and_addr,
                Err(e) => {
                    warn!(cause = %e, "failed to accept");
                    continue;
                }
            };

            let handler = handler.clone();

            tokio::spawn(async move {
                let (reader, writer) = tcp_stream.into_split();
                let connection = HttpConnection::new(reader, writer);
                match connection.process(handler).await {
                    Ok(_) => {
                        info!("finished process, connection shutdown");
                    }
                    Err(e) => {
                        error!("service has error, cause {}, connection shutdown", e);
                    }
                }
            });
        }
    }
}

#[async_trait]
impl Handler for Server {
    type Error = Box<dyn Error + Send + Sync>;

    async fn call(&self, request: Request) -> Result<Response, Self::Error> {
        let path = request.uri().path();
        match self.router.at(request.method(), path) {
            Some(matched) => {
                let context = RequestContext::new(&request, matched.capture());
                matched.handler().invoke(context).await
            }
            None => {
                info!(path, "no route matched, responding 404");
                Ok(Response::not_found())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::endpoint::{EchoHandler, FileFetchHandler, FileSaveHandler, RootHandler, UserAgentHandler};
    use crate::router::{get, post};
    use crate::store::FileStore;
    use bytes::Bytes;
    use depot_http::protocol::{ContentType, Status};
    use flate2::read::GzDecoder;
    use http::Method;
    use std::io::Read;
    use std::path::Path;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    fn test_server(store_root: &Path) -> Server {
        let store = FileStore::new(store_root);
        let router = Router::builder()
            .route("/", get(RootHandler))
            .route("/echo/{value}", get(EchoHandler))
            .route("/user-agent", get(UserAgentHandler))
            .route("/files/{name}", get(FileFetchHandler::new(store.clone())))
            .route("/files/{name}", post(FileSaveHandler::new(store)))
            .build();

        Server::builder().router(router).address("127.0.0.1:0".parse().unwrap()).build().unwrap()
    }

    fn request(method: Method, uri: &str, body: &'static [u8]) -> Request {
        http::Request::builder().method(method).uri(uri).body(Bytes::from_static(body)).unwrap()
    }

    #[tokio::test]
    async fn root_returns_an_empty_success() {
        let dir = tempfile::tempdir().unwrap();
        let server = test_server(dir.path());

        let response = server.call(request(Method::GET, "/", b"")).await.unwrap();

        assert_eq!(response.status(), Status::Ok);
        assert_eq!(response.body(), None);
    }

    #[tokio::test]
    async fn echo_returns_the_path_value() {
        let dir = tempfile::tempdir().unwrap();
        let server = test_server(dir.path());

        let response = server.call(request(Method::GET, "/echo/abc", b"")).await.unwrap();

        assert_eq!(response.status(), Status::Ok);
        assert_eq!(response.content_type(), ContentType::Text);
        assert_eq!(response.body().unwrap().as_ref(), b"abc");
    }

    #[tokio::test]
    async fn echo_compresses_for_gzip_clients() {
        let dir = tempfile::tempdir().unwrap();
        let server = test_server(dir.path());

        let request = http::Request::builder()
            .method(Method::GET)
            .uri("/echo/abc")
            .header(http::header::ACCEPT_ENCODING, "gzip")
            .body(Bytes::new())
            .unwrap();
        let response = server.call(request).await.unwrap();

        assert!(response.is_gzipped());

        let mut decoder = GzDecoder::new(response.body().unwrap().as_ref());
        let mut decoded = Vec::new();
        decoder.read_to_end(&mut decoded).unwrap();
        assert_eq!(decoded, b"abc");
    }

    #[tokio::test]
    async fn missing_user_agent_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let server = test_server(dir.path());

        let response = server.call(request(Method::GET, "/user-agent", b"")).await.unwrap();

        assert_eq!(response.status(), Status::NotFound);
    }

    #[tokio::test]
    async fn files_round_trip_through_the_store() {
        let dir = tempfile::tempdir().unwrap();
        let server = test_server(dir.path());

        let response = server.call(request(Method::POST, "/files/report.txt", b"hello")).await.unwrap();
        assert_eq!(response.status(), Status::Created);
        assert_eq!(response.body(), None);

        let response = server.call(request(Method::GET, "/files/report.txt", b"")).await.unwrap();
        assert_eq!(response.status(), Status::Ok);
        assert_eq!(response.content_type(), ContentType::OctetStream);
        assert_eq!(response.body().unwrap().as_ref(), b"hello");
    }

    #[tokio::test]
    async fn second_save_truncates_the_first() {
        let dir = tempfile::tempdir().unwrap();
        let server = test_server(dir.path());

        server.call(request(Method::POST, "/files/report.txt", b"a longer first version")).await.unwrap();
        server.call(request(Method::POST, "/files/report.txt", b"short")).await.unwrap();

        let response = server.call(request(Method::GET, "/files/report.txt", b"")).await.unwrap();
        assert_eq!(response.body().unwrap().as_ref(), b"short");
    }

    #[tokio::test]
    async fn unregistered_method_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let server = test_server(dir.path());

        let response = server.call(request(Method::DELETE, "/", b"")).await.unwrap();

        assert_eq!(response.status(), Status::NotFound);
        assert_eq!(response.body(), None);
    }

    #[tokio::test]
    async fn unknown_path_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let server = test_server(dir.path());

        let response = server.call(request(Method::GET, "/nope", b"")).await.unwrap();

        assert_eq!(response.status(), Status::NotFound);
    }

    #[test]
    fn builder_requires_router_and_address() {
        let err = Server::builder().build().unwrap_err();
        assert!(matches!(err, ServerBuildError::MissingRouter));

        let router = Router::builder().route("/", get(RootHandler)).build();
        let err = Server::builder().router(router).build().unwrap_err();
        assert!(matches!(err, ServerBuildError::MissingAddress));
    }

    #[tokio::test]
    async fn serves_a_request_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        let server = Arc::new(test_server(dir.path()));

        let (client, server_side) = tokio::io::duplex(1024);
        let (read_half, write_half) = tokio::io::split(server_side);
        let connection = HttpConnection::new(read_half, write_half);
        let task = tokio::spawn(async move { connection.process(server).await });

        let (mut client_read, mut client_write) = tokio::io::split(client);
        client_write.write_all(b"GET / HTTP/1.1\r\nHost: localhost:4221\r\n\r\n").await.unwrap();
        client_write.shutdown().await.unwrap();

        let mut received = Vec::new();
        client_read.read_to_end(&mut received).await.unwrap();
        task.await.unwrap().unwrap();

        assert_eq!(received, b"HTTP/1.1 200 OK\r\n\r\n");
    }
}
