//! Error type for `shelf-github`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GithubError {
  #[error("http error: {0}")]
  Http(#[from] reqwest::Error),

  /// The API answered with a non-success status.
  #[error("GitHub API error (status {status}): {message}")]
  Api { status: u16, message: String },

  #[error("not found: {0}")]
  NotFound(String),

  /// A directory listing was requested for a file, or file content for a
  /// directory.
  #[error("unexpected content type at {path}: expected {expected}")]
  UnexpectedKind { path: String, expected: &'static str },

  #[error("failed to decode content of {path}: {message}")]
  Decode { path: String, message: String },
}

pub type Result<T, E = GithubError> = std::result::Result<T, E>;
