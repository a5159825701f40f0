use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use tracing::{Level, error};
use tracing_subscriber::FmtSubscriber;

use depot_web::router::{get, post};
use depot_web::{
    EchoHandler, FileFetchHandler, FileSaveHandler, FileStore, RootHandler, Router, Server, UserAgentHandler,
};

#[derive(Debug, Parser)]
#[command(name = "depot", about = "minimal http/1.1 file depot server")]
struct Args {
    /// Directory backing the /files routes
    #[arg(long, default_value = ".")]
    directory: PathBuf,

    /// Address to listen on
    #[arg(long, default_value = "127.0.0.1:4221")]
    address: SocketAddr,
}

#[tokio::main]
async fn main() {
    let subscriber = FmtSubscriber::builder().with_max_level(Level::INFO).finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    let args = Args::parse();

    let store = FileStore::new(args.directory);
    let router = Router::builder()
        .route("/", get(RootHandler))
        .route("/echo/{value}", get(EchoHandler))
        .route("/user-agent", get(UserAgentHandler))
        .route("/files/{name}", get(FileFetchHandler::new(store.clone())))
        .route("/files/{name}", post(FileSaveHandler::new(store)))
        .build();

    let server = match Server::builder().router(router).address(args.address).build() {
        Ok(server) => server,
        Err(e) => {
            error!(cause = %e, "failed to build server");
            return;
        }
    };

    server.start().await;
}
