//! Backend entry point: configuration, tracing, and server bootstrap.

use std::net::SocketAddr;

use clap::Parser;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

use motoyard::outbound::persistence::{DbPool, PoolConfig};
use motoyard::server::{self, ServerConfig};

/// Command-line arguments.
#[derive(Debug, Parser)]
#[command(name = "motoyard", about = "Fleet, yard, and user management API")]
struct Args {
    /// Socket address to bind.
    #[arg(long, default_value = "0.0.0.0:8080")]
    bind: SocketAddr,

    /// PostgreSQL connection URL; without it the server keeps records in
    /// memory only.
    #[arg(long, env = "DATABASE_URL")]
    database_url: Option<String>,
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let args = Args::parse();
    let mut config = ServerConfig::new(args.bind);

    if let Some(url) = args.database_url {
        let pool = DbPool::new(PoolConfig::new(url))
            .await
            .map_err(|e| std::io::Error::other(format!("database pool setup failed: {e}")))?;
        config = config.with_db_pool(pool);
    }

    server::run(config).await
}
