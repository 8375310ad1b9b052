//! Document, category, folder and sync-run types.
//!
//! A document is one Markdown file mirrored from the content host. Its path is
//! the identity key; everything else is derived from the path or the file
//! body and refreshed whenever the host's identity token changes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::taxonomy::Taxonomy;

// ─── Documents ───────────────────────────────────────────────────────────────

/// A persisted document, including its body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
  pub id:          i64,
  /// Full slash-separated path; unique and immutable once created.
  pub path:        String,
  pub title:       String,
  pub category:    String,
  pub subcategory: Option<String>,
  /// Intermediate folder segments between the category and the filename.
  pub folders:     Vec<String>,
  pub content:     String,
  pub description: String,
  /// Identity token supplied by the content host (git blob SHA).
  pub sha:         String,
  pub is_active:   bool,
  pub created_at:  DateTime<Utc>,
  pub updated_at:  DateTime<Utc>,
}

/// The listing shape of a document: everything except the body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentSummary {
  pub path:        String,
  pub title:       String,
  pub category:    String,
  pub subcategory: Option<String>,
  pub folders:     Vec<String>,
  pub description: String,
  pub updated_at:  DateTime<Utc>,
}

/// The minimal view of a persisted document needed for change detection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredDocument {
  pub path:      String,
  pub sha:       String,
  pub is_active: bool,
}

/// Input to [`DocumentStore::insert_document`] and
/// [`DocumentStore::update_document`].
///
/// Timestamps and the active flag are owned by the store.
///
/// [`DocumentStore::insert_document`]: crate::store::DocumentStore::insert_document
/// [`DocumentStore::update_document`]: crate::store::DocumentStore::update_document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewDocument {
  pub path:        String,
  pub title:       String,
  pub taxonomy:    Taxonomy,
  pub content:     String,
  pub description: String,
  pub sha:         String,
}

// ─── Categories ──────────────────────────────────────────────────────────────

/// Denormalised rollup: one row per category among active documents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
  pub name:  String,
  /// Equal to `name`; kept separate so URLs can diverge later.
  pub slug:  String,
  pub icon:  Option<String>,
  pub count: u64,
}

// ─── Folders ─────────────────────────────────────────────────────────────────

/// A direct subfolder of a folder, with the number of active documents
/// anywhere beneath it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FolderEntry {
  pub name:  String,
  pub path:  String,
  pub count: u64,
}

/// One level of the folder tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FolderContents {
  pub folders:   Vec<FolderEntry>,
  pub documents: Vec<DocumentSummary>,
  /// Body of the folder's README, if one has been synced.
  pub readme:    Option<String>,
}

// ─── Sync runs ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SyncStatus {
  Success,
  Failed,
}

/// Append-only audit entry, one per synchronization run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncRun {
  pub run_id:    Uuid,
  pub status:    SyncStatus,
  pub added:     u64,
  pub updated:   u64,
  pub deleted:   u64,
  pub error:     Option<String>,
  pub synced_at: DateTime<Utc>,
}

/// Input to [`crate::store::DocumentStore::record_sync_run`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSyncRun {
  pub status:  SyncStatus,
  pub added:   u64,
  pub updated: u64,
  pub deleted: u64,
  pub error:   Option<String>,
}

impl NewSyncRun {
  pub fn success(added: u64, updated: u64, deleted: u64) -> Self {
    Self { status: SyncStatus::Success, added, updated, deleted, error: None }
  }

  /// A failed run. Counts are zero: nothing a failed run did is reported.
  pub fn failed(error: impl Into<String>) -> Self {
    Self {
      status:  SyncStatus::Failed,
      added:   0,
      updated: 0,
      deleted: 0,
      error:   Some(error.into()),
    }
  }
}
