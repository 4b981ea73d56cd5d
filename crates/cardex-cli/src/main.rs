//! `cardex` — terminal UI for a Cardex contact store.
//!
//! # Usage
//!
//! ```text
//! cardex --url https://xyz.supabase.co --api-key <anon key>
//! cardex --config ~/.config/cardex/config.toml
//! cardex --check            # list contact names and exit
//! ```

mod app;
mod ui;

use std::{fs::File, io, path::PathBuf, sync::Arc, time::Duration};

use anyhow::{Context, Result, bail};
use app::App;
use cardex_core::store::ContactStore;
use cardex_postgrest::{PostgrestConfig, PostgrestStore};
use clap::Parser;
use crossterm::{
  event::{self, Event},
  execute,
  terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use serde::Deserialize;
use tracing_subscriber::EnvFilter;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "cardex", about = "Terminal UI for a Cardex contact store")]
struct Args {
  /// Path to a TOML config file (url, api_key, table, timeout_secs).
  #[arg(short, long, value_name = "FILE")]
  config: Option<PathBuf>,

  /// Base URL of the PostgREST project, e.g. https://xyz.supabase.co.
  #[arg(long, env = "CARDEX_URL")]
  url: Option<String>,

  /// API key sent as `apikey` and bearer token.
  #[arg(long, env = "CARDEX_API_KEY")]
  api_key: Option<String>,

  /// Print every contact's name and exit; verifies the connection.
  #[arg(long)]
  check: bool,

  /// Write logs to this file. Nothing is logged otherwise.
  #[arg(long, value_name = "FILE")]
  log_file: Option<PathBuf>,
}

// ─── Config file ──────────────────────────────────────────────────────────────

/// Shape of the optional TOML config file.
#[derive(Deserialize, Default)]
struct ConfigFile {
  #[serde(default)]
  url:          String,
  #[serde(default)]
  api_key:      String,
  table:        Option<String>,
  timeout_secs: Option<u64>,
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
  let args = Args::parse();

  if let Some(path) = &args.log_file {
    let file = File::create(path).with_context(|| format!("creating log file {}", path.display()))?;
    tracing_subscriber::fmt()
      .with_env_filter(EnvFilter::from_default_env())
      .with_ansi(false)
      .with_writer(std::sync::Mutex::new(file))
      .init();
  }

  // Load config file if provided.
  let file_cfg: ConfigFile = if let Some(path) = &args.config {
    let raw = std::fs::read_to_string(path)
      .with_context(|| format!("reading config file {}", path.display()))?;
    toml::from_str(&raw).context("parsing config file")?
  } else {
    ConfigFile::default()
  };

  // CLI flags override config file, which overrides defaults.
  let url = args
    .url
    .or_else(|| (!file_cfg.url.is_empty()).then(|| file_cfg.url.clone()));
  let Some(url) = url else {
    bail!("no store URL: pass --url, set CARDEX_URL, or add `url` to the config file");
  };
  let api_key = args
    .api_key
    .or_else(|| (!file_cfg.api_key.is_empty()).then(|| file_cfg.api_key.clone()))
    .unwrap_or_default();

  let mut store_cfg = PostgrestConfig::new(url, api_key);
  if let Some(table) = file_cfg.table {
    store_cfg.table = table;
  }
  if let Some(secs) = file_cfg.timeout_secs {
    store_cfg.timeout_secs = secs;
  }
  let store = PostgrestStore::new(&store_cfg).context("building store client")?;

  if args.check {
    return check(&store).await;
  }

  let mut app = App::new(Arc::new(store));

  // Set up the terminal.
  enable_raw_mode().context("enabling raw mode")?;
  let mut stdout = io::stdout();
  execute!(stdout, EnterAlternateScreen).context("entering alternate screen")?;
  let backend = CrosstermBackend::new(stdout);
  let mut terminal = Terminal::new(backend).context("creating terminal")?;

  // Load initial data; a failure is shown in the form pane.
  app.reload().await;

  // Run the event loop; restore terminal even on error.
  let run_result = run_event_loop(&mut terminal, &mut app).await;

  // Restore terminal regardless of result.
  disable_raw_mode().ok();
  execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
  terminal.show_cursor().ok();

  run_result
}

/// List every contact's name, newest first.
async fn check(store: &PostgrestStore) -> Result<()> {
  let contacts = store
    .list()
    .await
    .with_context(|| format!("listing contacts from {}", store.endpoint()))?;
  for contact in &contacts {
    println!("{}", contact.full_name());
  }
  tracing::info!(count = contacts.len(), "connection check passed");
  Ok(())
}

// ─── Event loop ───────────────────────────────────────────────────────────────

async fn run_event_loop<S: ContactStore>(
  terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
  app: &mut App<S>,
) -> Result<()> {
  loop {
    terminal.draw(|f| ui::draw(f, app)).context("drawing frame")?;

    // Poll for an event, yielding control to tokio while waiting.
    let maybe_event = tokio::task::block_in_place(|| {
      if event::poll(Duration::from_millis(50))? {
        Ok::<_, io::Error>(Some(event::read()?))
      } else {
        Ok(None)
      }
    })?;

    // Resize needs no handling; the next iteration redraws.
    if let Some(Event::Key(key)) = maybe_event
      && !app.handle_key(key).await
    {
      break;
    }
  }

  Ok(())
}
