//! The `ContentSource` trait: where documents come from.
//!
//! Implemented by `shelf-github`. The synchronizer depends on this
//! abstraction so it can be driven by an in-memory source in tests.

use std::future::Future;

use serde::{Deserialize, Serialize};

/// A document file as listed by the content host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteFile {
  pub name: String,
  /// Full path from the content root, e.g. `ai/llm/rag.md`.
  pub path: String,
  /// Identity token; changes whenever the file content changes.
  pub sha:  String,
}

/// The full body of a remote file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteContent {
  pub path:    String,
  pub content: String,
  pub sha:     String,
}

/// A subtree that could not be listed. Its files are missing from the
/// listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingWarning {
  /// The directory whose listing failed (`""` for the root).
  pub path:    String,
  pub message: String,
}

impl std::fmt::Display for ListingWarning {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    let path = if self.path.is_empty() { "/" } else { &self.path };
    write!(f, "{path}: {}", self.message)
  }
}

/// Result of a recursive enumeration.
///
/// Enumeration is best-effort: a failing subtree contributes no files and one
/// warning, and the rest of the tree is still listed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Listing {
  pub files:    Vec<RemoteFile>,
  pub warnings: Vec<ListingWarning>,
}

/// Abstraction over a remote tree of Markdown documents.
pub trait ContentSource: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Recursively list every document file under the content root, skipping
  /// hidden entries and non-document files. Never fails as a whole; subtree
  /// failures are reported in [`Listing::warnings`].
  fn list_documents(&self) -> impl Future<Output = Listing> + Send + '_;

  /// Fetch the full content of one file.
  fn fetch<'a>(
    &'a self,
    path: &'a str,
  ) -> impl Future<Output = Result<RemoteContent, Self::Error>> + Send + 'a;
}
