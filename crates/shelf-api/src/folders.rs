//! Handlers for `/folders` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/folders` | Every folder as a segment list |
//! | `GET`  | `/folders/{*path}` | One level of the tree; 404 if empty |

use axum::{
  Json,
  extract::{Path, State},
};
use shelf_core::{document::FolderContents, store::DocumentStore};

use crate::{ApiState, error::ApiError};

/// `GET /folders`
pub async fn list<S>(State(state): State<ApiState<S>>) -> Result<Json<Vec<Vec<String>>>, ApiError>
where
  S: DocumentStore,
{
  let folders = state.store.all_folder_paths().await.map_err(ApiError::store)?;
  Ok(Json(folders))
}

/// `GET /folders/{*path}`
pub async fn get_one<S>(
  State(state): State<ApiState<S>>,
  Path(path): Path<String>,
) -> Result<Json<FolderContents>, ApiError>
where
  S: DocumentStore,
{
  let contents = state
    .store
    .folder_contents(&path)
    .await
    .map_err(ApiError::store)?;

  if contents.folders.is_empty() && contents.documents.is_empty() {
    return Err(ApiError::NotFound(format!("folder {path} not found")));
  }
  Ok(Json(contents))
}
