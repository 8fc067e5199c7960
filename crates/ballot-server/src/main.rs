//! ballot-server binary.
//!
//! Reads `config.toml` (or the path specified with `--config`), opens the
//! SQLite database, and serves the candidates API under `/api`.
//!
//! # Seeding parties
//!
//! Parties have no write route. Load them from a SQL script at startup:
//!
//! ```
//! cargo run -p ballot-server -- --seed db/seeds.sql
//! ```

use std::{path::PathBuf, sync::Arc};

use anyhow::Context as _;
use ballot_server::{ServerConfig, expand_tilde};
use ballot_store_sqlite::SqliteStore;
use clap::Parser;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Ballot candidates API server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,

  /// SQL script to execute once the database is open (e.g. party seeds).
  #[arg(long)]
  seed: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  // Initialise tracing.
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  let server_cfg = ServerConfig::load(&cli.config, None)
    .with_context(|| format!("failed to load configuration from {:?}", cli.config))?;

  let db_path = expand_tilde(&server_cfg.database_path);
  let store = SqliteStore::open(&db_path)
    .await
    .with_context(|| format!("failed to open database at {db_path:?}"))?;
  tracing::info!("Database connected.");

  if let Some(seed) = &cli.seed {
    store
      .run_script_file(seed)
      .await
      .with_context(|| format!("failed to run seed script {seed:?}"))?;
    tracing::info!(script = ?seed, "seed script applied");
  }

  let app = ballot_server::app(Arc::new(store), server_cfg.status_policy);
  let address = format!("{}:{}", server_cfg.host, server_cfg.port);

  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;
  tracing::info!("Server running on port {}", server_cfg.port);

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}
