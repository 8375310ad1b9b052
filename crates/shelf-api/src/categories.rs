//! Handlers for `/categories` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/categories` | Most populated first |
//! | `GET`  | `/categories/{category}/documents` | Sorted by title |

use axum::{
  Json,
  extract::{Path, State},
};
use shelf_core::{
  document::{Category, DocumentSummary},
  store::DocumentStore,
};

use crate::{ApiState, error::ApiError};

/// `GET /categories`
pub async fn list<S>(State(state): State<ApiState<S>>) -> Result<Json<Vec<Category>>, ApiError>
where
  S: DocumentStore,
{
  let categories = state.store.list_categories().await.map_err(ApiError::store)?;
  Ok(Json(categories))
}

/// `GET /categories/{category}/documents`
pub async fn documents<S>(
  State(state): State<ApiState<S>>,
  Path(category): Path<String>,
) -> Result<Json<Vec<DocumentSummary>>, ApiError>
where
  S: DocumentStore,
{
  let docs = state
    .store
    .documents_by_category(&category)
    .await
    .map_err(ApiError::store)?;
  Ok(Json(docs))
}
