//! Error types for `shelf-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// No database is configured; every write on
  /// [`NoopStore`](crate::noop::NoopStore) fails with this.
  #[error("database not configured; set `database_path`")]
  NotConfigured,
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
