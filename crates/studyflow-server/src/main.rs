//! StudyFlow server binary.
//!
//! Reads `config.toml` (or the path given with `--config`) layered under
//! `STUDYFLOW_*` environment variables, loads the account file and course
//! catalog, opens the assignment database and serves the JSON API over HTTP.

use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use anyhow::Context as _;
use clap::Parser;
use studyflow_engine::{IdentityStore, JsonCatalog, Planner, TokenService};
use studyflow_server::{AppState, ServerConfig};
use studyflow_store_sqlite::SqliteStore;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "StudyFlow API server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  let settings = config::Config::builder()
    .add_source(config::File::from(cli.config).required(false))
    .add_source(config::Environment::with_prefix("STUDYFLOW"))
    .build()
    .context("failed to read config file")?;

  let mut server_cfg: ServerConfig = settings
    .try_deserialize()
    .context("failed to deserialise ServerConfig")?;

  server_cfg.accounts_path = expand_tilde(&server_cfg.accounts_path);
  server_cfg.catalog_path = expand_tilde(&server_cfg.catalog_path);
  server_cfg.assignments_path = expand_tilde(&server_cfg.assignments_path);

  let identity = IdentityStore::open(&server_cfg.accounts_path, &server_cfg.institution_domain)
    .with_context(|| format!("failed to load accounts from {:?}", server_cfg.accounts_path))?;

  let catalog = JsonCatalog::load(&server_cfg.catalog_path)
    .with_context(|| format!("failed to load catalog from {:?}", server_cfg.catalog_path))?;

  let tokens = TokenService::new(
    server_cfg.token_secret.as_bytes(),
    chrono::Duration::minutes(server_cfg.token_ttl_minutes),
  )
  .context("invalid token configuration")?;

  let assignments = SqliteStore::open(&server_cfg.assignments_path)
    .await
    .with_context(|| format!("failed to open store at {:?}", server_cfg.assignments_path))?;

  let state = AppState {
    planner:     Arc::new(Planner::new(identity, Arc::new(catalog), tokens)),
    assignments: Arc::new(assignments),
    config:      Arc::new(server_cfg.clone()),
  };

  let app = studyflow_server::router(state);
  let address = format!("{}:{}", server_cfg.host, server_cfg.port);

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
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
