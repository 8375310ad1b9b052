//! The `DocumentStore` trait and supporting query types.
//!
//! The trait is implemented by storage backends (`shelf-store-sqlite`) and by
//! [`NoopStore`](crate::noop::NoopStore). The synchronizer and the HTTP layer
//! depend on this abstraction, not on any concrete backend.

use std::future::Future;

use crate::document::{
  Category, Document, DocumentSummary, FolderContents, NewDocument, NewSyncRun,
  StoredDocument, SyncRun,
};

/// Default number of search results.
pub const DEFAULT_SEARCH_LIMIT: usize = 20;

// ─── Query type ──────────────────────────────────────────────────────────────

/// Parameters for [`DocumentStore::search`].
#[derive(Debug, Clone)]
pub struct SearchQuery {
  pub text:      String,
  pub limit:     usize,
  /// Prefer the backend's full-text index over a plain pattern match.
  pub full_text: bool,
}

impl SearchQuery {
  pub fn new(text: impl Into<String>) -> Self {
    Self { text: text.into(), limit: DEFAULT_SEARCH_LIMIT, full_text: true }
  }
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over a Shelf document store.
///
/// Documents are never physically deleted: removal flips `is_active`. All
/// read methods only see active documents.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait DocumentStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Whether this store is backed by a real database.
  fn is_configured(&self) -> bool { true }

  // ── Sync writes ───────────────────────────────────────────────────────

  /// Every persisted document, active or not, as change-detection records.
  fn load_documents(
    &self,
  ) -> impl Future<Output = Result<Vec<StoredDocument>, Self::Error>> + Send + '_;

  /// Insert a new active document. Fails if the path already exists.
  fn insert_document(
    &self,
    doc: NewDocument,
  ) -> impl Future<Output = Result<Document, Self::Error>> + Send + '_;

  /// Overwrite every derived field of the document at `doc.path`, mark it
  /// active and bump `updated_at`. `created_at` and the path are preserved.
  fn update_document(
    &self,
    doc: NewDocument,
  ) -> impl Future<Output = Result<Document, Self::Error>> + Send + '_;

  /// Set the active flag of the document at `path`. Returns `false` if no
  /// document has that path.
  fn set_active<'a>(
    &'a self,
    path: &'a str,
    active: bool,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + 'a;

  /// Store the README body for a folder, keyed by full folder path.
  fn upsert_folder_readme<'a>(
    &'a self,
    folder_path: &'a str,
    readme: &'a str,
    sha: &'a str,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;

  /// Forget the README stored for a folder. A no-op when none is stored.
  fn clear_folder_readme<'a>(
    &'a self,
    folder_path: &'a str,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;

  /// Replace the category table with fresh counts over active documents, in
  /// one transaction. Returns the new rows.
  fn rebuild_categories(
    &self,
  ) -> impl Future<Output = Result<Vec<Category>, Self::Error>> + Send + '_;

  /// Append an audit record.
  fn record_sync_run(
    &self,
    run: NewSyncRun,
  ) -> impl Future<Output = Result<SyncRun, Self::Error>> + Send + '_;

  // ── Reads ─────────────────────────────────────────────────────────────

  /// Category aggregates, most populated first.
  fn list_categories(
    &self,
  ) -> impl Future<Output = Result<Vec<Category>, Self::Error>> + Send + '_;

  fn documents_by_category<'a>(
    &'a self,
    category: &'a str,
  ) -> impl Future<Output = Result<Vec<DocumentSummary>, Self::Error>> + Send + 'a;

  /// Most recently updated documents.
  fn recent_documents(
    &self,
    limit: usize,
  ) -> impl Future<Output = Result<Vec<DocumentSummary>, Self::Error>> + Send + '_;

  /// An active document by path. Returns `None` if missing or inactive.
  fn get_document<'a>(
    &'a self,
    path: &'a str,
  ) -> impl Future<Output = Result<Option<Document>, Self::Error>> + Send + 'a;

  /// Paths of all active documents, for static path generation.
  fn all_document_paths(
    &self,
  ) -> impl Future<Output = Result<Vec<String>, Self::Error>> + Send + '_;

  /// Every folder of the derived tree as a segment list.
  fn all_folder_paths(
    &self,
  ) -> impl Future<Output = Result<Vec<Vec<String>>, Self::Error>> + Send + '_;

  /// One level of the folder tree, with the folder README if stored.
  fn folder_contents<'a>(
    &'a self,
    folder_path: &'a str,
  ) -> impl Future<Output = Result<FolderContents, Self::Error>> + Send + 'a;

  fn search<'a>(
    &'a self,
    query: &'a SearchQuery,
  ) -> impl Future<Output = Result<Vec<DocumentSummary>, Self::Error>> + Send + 'a;

  /// Audit records, newest first.
  fn list_sync_runs(
    &self,
    limit: usize,
  ) -> impl Future<Output = Result<Vec<SyncRun>, Self::Error>> + Send + '_;
}
