//! Handler for `GET /search`.

use axum::{
  Json,
  extract::{Query, State},
};
use serde::{Deserialize, Serialize};
use shelf_core::{
  document::DocumentSummary,
  store::{DEFAULT_SEARCH_LIMIT, DocumentStore, SearchQuery},
};

use crate::{ApiState, error::ApiError};

#[derive(Debug, Deserialize, Default)]
pub struct SearchParams {
  /// Free text; blank or missing yields no results.
  pub q:     Option<String>,
  pub limit: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
  pub results: Vec<DocumentSummary>,
}

/// `GET /search?q=<text>[&limit=<n>]`
pub async fn handler<S>(
  State(state): State<ApiState<S>>,
  Query(params): Query<SearchParams>,
) -> Result<Json<SearchResponse>, ApiError>
where
  S: DocumentStore,
{
  let query = SearchQuery {
    text:      params.q.unwrap_or_default(),
    limit:     params.limit.unwrap_or(DEFAULT_SEARCH_LIMIT),
    full_text: state.full_text,
  };

  let results = state.store.search(&query).await.map_err(ApiError::store)?;
  Ok(Json(SearchResponse { results }))
}
