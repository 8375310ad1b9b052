//! Read-only JSON API over a Shelf document store.
//!
//! Exposes an axum [`Router`] backed by any [`DocumentStore`]. Auth, TLS and
//! the sync trigger are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", shelf_api::api_router(store.clone(), true))
//! ```

pub mod categories;
pub mod documents;
pub mod error;
pub mod folders;
pub mod runs;
pub mod search;

use std::sync::Arc;

use axum::{Router, routing::get};
use shelf_core::store::DocumentStore;

pub use error::ApiError;

/// State shared by every API handler.
pub struct ApiState<S> {
  pub store:     Arc<S>,
  /// Whether `/search` asks the store for its full-text index.
  pub full_text: bool,
}

impl<S> Clone for ApiState<S> {
  fn clone(&self) -> Self {
    Self { store: self.store.clone(), full_text: self.full_text }
  }
}

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>, full_text: bool) -> Router<()>
where
  S: DocumentStore + 'static,
{
  Router::new()
    // Categories
    .route("/categories", get(categories::list::<S>))
    .route("/categories/{category}/documents", get(categories::documents::<S>))
    // Documents
    .route("/documents", get(documents::recent::<S>))
    .route("/documents/{*path}", get(documents::get_one::<S>))
    .route("/paths", get(documents::paths::<S>))
    // Folders
    .route("/folders", get(folders::list::<S>))
    .route("/folders/{*path}", get(folders::get_one::<S>))
    // Search
    .route("/search", get(search::handler::<S>))
    // Audit
    .route("/sync-runs", get(runs::list::<S>))
    .with_state(ApiState { store, full_text })
}

#[cfg(test)]
mod tests;
