//! HTTP surface for Shelf: the sync trigger, the read API and a health check.
//!
//! Exposes an axum [`Router`] over any [`DocumentStore`] and
//! [`ContentSource`] pair.

pub mod auth;
pub mod error;

pub use error::Error;

use std::{path::PathBuf, sync::Arc};

use axum::{
  Json, Router,
  extract::State,
  routing::get,
};
use serde::{Deserialize, Serialize};
use shelf_core::{source::ContentSource, store::DocumentStore};
use shelf_github::{DEFAULT_API_BASE, DEFAULT_OWNER, DEFAULT_REPO, GithubConfig};
use shelf_sync::{SyncReport, Synchronizer};
use tower_http::trace::TraceLayer;
use tracing::info;

use auth::{SyncAuth, SyncAuthorized};

// ─── Configuration ───────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `shelf.toml` and `SHELF_*`
/// environment variables.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
  pub host:                String,
  pub port:                u16,
  /// SQLite file. Without it the server runs read-empty and sync is refused.
  pub database_path:       Option<PathBuf>,
  pub github_owner:        String,
  pub github_repo:         String,
  pub github_branch:       Option<String>,
  pub github_token:        Option<String>,
  pub github_api_base:     String,
  /// Bearer secret required by `/sync` when set.
  pub sync_secret:         Option<String>,
  pub use_fulltext_search: bool,
}

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      host:                "127.0.0.1".to_owned(),
      port:                3000,
      database_path:       None,
      github_owner:        DEFAULT_OWNER.to_owned(),
      github_repo:         DEFAULT_REPO.to_owned(),
      github_branch:       None,
      github_token:        None,
      github_api_base:     DEFAULT_API_BASE.to_owned(),
      sync_secret:         None,
      use_fulltext_search: true,
    }
  }
}

impl ServerConfig {
  pub fn github(&self) -> GithubConfig {
    GithubConfig {
      owner:    self.github_owner.clone(),
      repo:     self.github_repo.clone(),
      branch:   self.github_branch.clone().filter(|b| !b.is_empty()),
      token:    self.github_token.clone().filter(|t| !t.is_empty()),
      api_base: self.github_api_base.clone(),
    }
  }
}

// ─── Application state ───────────────────────────────────────────────────────

/// Shared state threaded through the sync handler.
pub struct AppState<S, C> {
  pub sync:   Arc<Synchronizer<S, C>>,
  pub config: Arc<ServerConfig>,
  pub auth:   Arc<SyncAuth>,
}

impl<S, C> Clone for AppState<S, C> {
  fn clone(&self) -> Self {
    Self {
      sync:   self.sync.clone(),
      config: self.config.clone(),
      auth:   self.auth.clone(),
    }
  }
}

impl<S, C> AppState<S, C>
where
  S: DocumentStore,
  C: ContentSource,
{
  pub fn new(sync: Synchronizer<S, C>, config: ServerConfig) -> Self {
    let auth = SyncAuth::new(config.sync_secret.as_deref());
    Self { sync: Arc::new(sync), config: Arc::new(config), auth: Arc::new(auth) }
  }
}

// ─── Router ──────────────────────────────────────────────────────────────────

/// Build the full application router.
pub fn router<S, C>(state: AppState<S, C>) -> Router
where
  S: DocumentStore + 'static,
  C: ContentSource + 'static,
{
  let api = shelf_api::api_router(
    state.sync.store().clone(),
    state.config.use_fulltext_search,
  );

  Router::new()
    .route("/sync", get(sync_handler::<S, C>).post(sync_handler::<S, C>))
    .with_state(state)
    .route("/health", get(|| async { "ok" }))
    .nest("/api", api)
    .layer(TraceLayer::new_for_http())
}

// ─── Sync trigger ────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct SyncResponse {
  pub success: bool,
  pub message: &'static str,
  #[serde(flatten)]
  pub report:  SyncReport,
}

/// `POST /sync` (and `GET /sync`)
async fn sync_handler<S, C>(
  State(state): State<AppState<S, C>>,
  _auth: SyncAuthorized,
) -> Result<Json<SyncResponse>, Error>
where
  S: DocumentStore + 'static,
  C: ContentSource + 'static,
{
  info!("sync requested over HTTP");
  let report = state.sync.sync().await?;
  Ok(Json(SyncResponse {
    success: true,
    message: "Sync completed successfully",
    report,
  }))
}

#[cfg(test)]
mod tests;
