use std::net::SocketAddr;

use anyhow::Result;
use clap::Parser;
use tokio::net::TcpListener;
use tracing::info;

use punchlist_store::StoreConfig;

#[derive(Parser)]
#[command(name = "punchlist-server")]
struct Cli {
    /// Address to bind.
    #[arg(long, env = "PUNCHLIST_BIND", default_value = "0.0.0.0")]
    bind: String,

    /// Port to listen on.
    #[arg(long, env = "PUNCHLIST_PORT", default_value_t = 8080)]
    port: u16,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let db = punchlist_db::Db::open_default()?;

    // Missing DO_SPACES_KEY / DO_SPACES_SECRET fails here, before any
    // request is served.
    let store_config = StoreConfig::from_env();
    let store = punchlist_store::create_store(&store_config)?;

    let addr = SocketAddr::new(cli.bind.parse()?, cli.port);
    let listener = TcpListener::bind(addr).await?;
    info!("punchlist-server listening on http://{addr}");

    punchlist_server::serve(listener, db, store).await
}
