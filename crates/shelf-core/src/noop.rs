//! [`NoopStore`] — the store used when no database is configured.
//!
//! Reads return empty results so read-only surfaces keep working; every write
//! fails with [`Error::NotConfigured`].

use crate::{
  document::{
    Category, Document, DocumentSummary, FolderContents, NewDocument,
    NewSyncRun, StoredDocument, SyncRun,
  },
  error::{Error, Result},
  store::{DocumentStore, SearchQuery},
};

#[derive(Debug, Clone, Copy, Default)]
pub struct NoopStore;

impl DocumentStore for NoopStore {
  type Error = Error;

  fn is_configured(&self) -> bool { false }

  async fn load_documents(&self) -> Result<Vec<StoredDocument>> {
    Err(Error::NotConfigured)
  }

  async fn insert_document(&self, _: NewDocument) -> Result<Document> {
    Err(Error::NotConfigured)
  }

  async fn update_document(&self, _: NewDocument) -> Result<Document> {
    Err(Error::NotConfigured)
  }

  async fn set_active(&self, _: &str, _: bool) -> Result<bool> {
    Err(Error::NotConfigured)
  }

  async fn upsert_folder_readme(&self, _: &str, _: &str, _: &str) -> Result<()> {
    Err(Error::NotConfigured)
  }

  async fn clear_folder_readme(&self, _: &str) -> Result<()> {
    Err(Error::NotConfigured)
  }

  async fn rebuild_categories(&self) -> Result<Vec<Category>> {
    Err(Error::NotConfigured)
  }

  async fn record_sync_run(&self, _: NewSyncRun) -> Result<SyncRun> {
    Err(Error::NotConfigured)
  }

  async fn list_categories(&self) -> Result<Vec<Category>> { Ok(Vec::new()) }

  async fn documents_by_category(&self, _: &str) -> Result<Vec<DocumentSummary>> {
    Ok(Vec::new())
  }

  async fn recent_documents(&self, _: usize) -> Result<Vec<DocumentSummary>> {
    Ok(Vec::new())
  }

  async fn get_document(&self, _: &str) -> Result<Option<Document>> { Ok(None) }

  async fn all_document_paths(&self) -> Result<Vec<String>> { Ok(Vec::new()) }

  async fn all_folder_paths(&self) -> Result<Vec<Vec<String>>> { Ok(Vec::new()) }

  async fn folder_contents(&self, _: &str) -> Result<FolderContents> {
    Ok(FolderContents::default())
  }

  async fn search(&self, _: &SearchQuery) -> Result<Vec<DocumentSummary>> {
    Ok(Vec::new())
  }

  async fn list_sync_runs(&self, _: usize) -> Result<Vec<SyncRun>> { Ok(Vec::new()) }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[tokio::test]
  async fn reads_are_empty_and_writes_fail() {
    let store = NoopStore;
    assert!(!store.is_configured());
    assert!(store.list_categories().await.unwrap().is_empty());
    assert!(store.get_document("a/b.md").await.unwrap().is_none());
    assert!(store.search(&SearchQuery::new("rust")).await.unwrap().is_empty());
    assert!(matches!(store.load_documents().await, Err(Error::NotConfigured)));
    assert!(matches!(store.rebuild_categories().await, Err(Error::NotConfigured)));
  }
}
