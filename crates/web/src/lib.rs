mod encoding;
mod endpoint;
mod handler;
mod request;
mod server;
mod store;

pub mod router;

pub use encoding::negotiate;
pub use encoding::Negotiated;
pub use endpoint::EchoHandler;
pub use endpoint::FileFetchHandler;
pub use endpoint::FileSaveHandler;
pub use endpoint::RootHandler;
pub use endpoint::UserAgentHandler;
pub use handler::RequestHandler;
pub use request::RequestContext;
pub use router::Router;
pub use server::Server;
pub use server::ServerBuildError;
pub use store::FileStore;
pub use store::StoreError;
