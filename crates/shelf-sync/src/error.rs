//! Error type for `shelf-sync`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// No database is configured; nothing was attempted.
  #[error("database is not configured")]
  NotConfigured,

  /// Another run holds the synchronizer.
  #[error("a sync run is already in progress")]
  AlreadyRunning,

  /// The store failed mid-run. A failed run record was attempted.
  #[error("store error: {0}")]
  Store(Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
  pub fn store(e: impl std::error::Error + Send + Sync + 'static) -> Self {
    Self::Store(Box::new(e))
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
