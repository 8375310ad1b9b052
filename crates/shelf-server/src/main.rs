//! shelf-server binary.
//!
//! Reads `shelf.toml` (or the path given with `--config`) layered under
//! `SHELF_*` environment variables, opens the SQLite store if one is
//! configured, and either serves HTTP or runs a single sync and exits.

use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use shelf_core::{noop::NoopStore, store::DocumentStore};
use shelf_github::GithubSource;
use shelf_server::{AppState, ServerConfig};
use shelf_store_sqlite::SqliteStore;
use shelf_sync::Synchronizer;
use tokio::net::TcpListener;
use tracing::{info, level_filters::LevelFilter, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Mirror a GitHub Markdown repository into SQLite")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "shelf.toml")]
  config: PathBuf,

  #[command(subcommand)]
  command: Option<Command>,
}

#[derive(Subcommand, Clone, Copy)]
enum Command {
  /// Serve the HTTP API (default).
  Serve,
  /// Run one sync, print the report and exit.
  Sync,
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
  let command = cli.command.unwrap_or(Command::Serve);

  // Load configuration.
  let settings = config::Config::builder()
    .add_source(config::File::from(cli.config).required(false))
    .add_source(config::Environment::with_prefix("SHELF").try_parsing(true))
    .build()
    .context("failed to read config file")?;

  let server_cfg: ServerConfig = settings
    .try_deserialize()
    .context("failed to deserialise ServerConfig")?;

  match server_cfg.database_path.clone() {
    Some(path) => {
      let store_path = expand_tilde(&path);
      let store = SqliteStore::open(&store_path)
        .await
        .with_context(|| format!("failed to open store at {store_path:?}"))?;
      info!("using database at {store_path:?}");
      run(command, store, server_cfg).await
    }
    None => {
      warn!("no database_path configured; reads are empty and sync is disabled");
      run(command, NoopStore, server_cfg).await
    }
  }
}

async fn run<S>(command: Command, store: S, server_cfg: ServerConfig) -> anyhow::Result<()>
where
  S: DocumentStore + 'static,
{
  let source = GithubSource::new(server_cfg.github()).context("failed to build GitHub client")?;
  let github = source.config();
  info!(
    "content source: {}/{} ({})",
    github.owner,
    github.repo,
    github.branch.as_deref().unwrap_or("default branch")
  );
  let sync = Synchronizer::new(Arc::new(store), Arc::new(source));

  match command {
    Command::Sync => {
      let report = sync.sync().await.context("sync failed")?;
      println!("{}", serde_json::to_string_pretty(&report)?);
      Ok(())
    }
    Command::Serve => {
      let address = format!("{}:{}", server_cfg.host, server_cfg.port);
      let state = AppState::new(sync, server_cfg);
      match state.auth.fingerprint() {
        Some(fp) => info!("sync secret configured (sha256 prefix {fp})"),
        None => warn!("no sync_secret configured; /sync is open"),
      }

      let app = shelf_server::router(state);

      info!("Listening on http://{address}");
      let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("failed to bind {address}"))?;

      axum::serve(listener, app).await.context("server error")?;
      Ok(())
    }
  }
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
