//! Handlers for document endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/documents` | Recently updated; `?limit=` (default 10) |
//! | `GET`  | `/documents/{*path}` | Full document; 404 if missing or removed |
//! | `GET`  | `/paths` | Every active document path |

use axum::{
  Json,
  extract::{Path, Query, State},
};
use serde::Deserialize;
use shelf_core::{
  document::{Document, DocumentSummary},
  store::DocumentStore,
};

use crate::{ApiState, error::ApiError};

pub const DEFAULT_RECENT_LIMIT: usize = 10;

// ─── Recent ──────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct RecentParams {
  pub limit: Option<usize>,
}

/// `GET /documents[?limit=<n>]`
pub async fn recent<S>(
  State(state): State<ApiState<S>>,
  Query(params): Query<RecentParams>,
) -> Result<Json<Vec<DocumentSummary>>, ApiError>
where
  S: DocumentStore,
{
  let docs = state
    .store
    .recent_documents(params.limit.unwrap_or(DEFAULT_RECENT_LIMIT))
    .await
    .map_err(ApiError::store)?;
  Ok(Json(docs))
}

// ─── Get one ─────────────────────────────────────────────────────────────────

/// `GET /documents/{*path}`
pub async fn get_one<S>(
  State(state): State<ApiState<S>>,
  Path(path): Path<String>,
) -> Result<Json<Document>, ApiError>
where
  S: DocumentStore,
{
  let doc = state
    .store
    .get_document(&path)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| ApiError::NotFound(format!("document {path} not found")))?;
  Ok(Json(doc))
}

// ─── Paths ───────────────────────────────────────────────────────────────────

/// `GET /paths`
pub async fn paths<S>(State(state): State<ApiState<S>>) -> Result<Json<Vec<String>>, ApiError>
where
  S: DocumentStore,
{
  let paths = state.store.all_document_paths().await.map_err(ApiError::store)?;
  Ok(Json(paths))
}
