//! cardex-server binary.
//!
//! Reads `config.toml` (or the path given with `--config`), layers
//! `CARDEX__*` environment variables over it, connects to the configured
//! PostgREST store, and serves the contact page over HTTP.
//!
//! ```text
//! CARDEX__STORE__URL=https://xyz.supabase.co \
//! CARDEX__STORE__API_KEY=... \
//!   cargo run -p cardex-web --bin cardex-server
//! ```

use std::{path::PathBuf, sync::Arc};

use anyhow::Context as _;
use cardex_core::store::ContactStore;
use cardex_postgrest::PostgrestStore;
use cardex_web::{AppState, ServerConfig};
use clap::Parser;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Cardex contact page server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,
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

  // Load configuration.
  let settings = config::Config::builder()
    .add_source(config::File::from(cli.config).required(false))
    .add_source(config::Environment::with_prefix("CARDEX").separator("__"))
    .build()
    .context("failed to read config file")?;

  let server_cfg: ServerConfig = settings
    .try_deserialize()
    .context("failed to deserialise ServerConfig")?;

  let store = PostgrestStore::new(&server_cfg.store).context("failed to build store client")?;

  // A failed first read is not fatal; the page shows the error instead.
  match store.list().await {
    Ok(contacts) => {
      tracing::info!(count = contacts.len(), endpoint = store.endpoint(), "store reachable");
    }
    Err(e) => {
      tracing::warn!(error = %e, endpoint = store.endpoint(), "store not reachable yet");
    }
  }

  let state = AppState::new(Arc::new(store), server_cfg.page.clone());
  let app = cardex_web::router(state);
  let address = format!("{}:{}", server_cfg.host, server_cfg.port);

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}
