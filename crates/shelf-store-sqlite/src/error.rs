//! Error type for `shelf-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("json error: {0}")]
  Json(#[from] serde_json::Error),

  #[error("uuid parse error: {0}")]
  Uuid(#[from] uuid::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),

  #[error("unknown sync status: {0:?}")]
  UnknownStatus(String),

  /// `update_document` was called for a path that was never inserted.
  #[error("document not found: {0}")]
  DocumentNotFound(String),

  /// `insert_document` was called for a path that already exists.
  #[error("document already exists: {0}")]
  DocumentExists(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
