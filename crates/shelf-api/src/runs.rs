//! Handler for `GET /sync-runs`: the audit log, newest first.

use axum::{
  Json,
  extract::{Query, State},
};
use serde::Deserialize;
use shelf_core::{document::SyncRun, store::DocumentStore};

use crate::{ApiState, error::ApiError};

pub const DEFAULT_RUNS_LIMIT: usize = 20;

#[derive(Debug, Deserialize)]
pub struct RunsParams {
  pub limit: Option<usize>,
}

/// `GET /sync-runs[?limit=<n>]`
pub async fn list<S>(
  State(state): State<ApiState<S>>,
  Query(params): Query<RunsParams>,
) -> Result<Json<Vec<SyncRun>>, ApiError>
where
  S: DocumentStore,
{
  let runs = state
    .store
    .list_sync_runs(params.limit.unwrap_or(DEFAULT_RUNS_LIMIT))
    .await
    .map_err(ApiError::store)?;
  Ok(Json(runs))
}
