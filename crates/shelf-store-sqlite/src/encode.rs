//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! All timestamps are stored as RFC 3339 strings in UTC with microsecond
//! precision. Folder chains are stored as
//! compact JSON arrays. UUIDs are stored as hyphenated lowercase strings.

use chrono::{DateTime, SecondsFormat, Utc};
use shelf_core::document::{Document, DocumentSummary, SyncRun, SyncStatus};
use uuid::Uuid;

use crate::{Error, Result};

// ─── DateTime<Utc>
// ────────────────────────────────────────────────────────────

/// Fixed-width UTC form so `ORDER BY` on the text column is chronological.
pub fn encode_dt(dt: DateTime<Utc>) -> String {
  dt.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Folders ─────────────────────────────────────────────────────────────────

pub fn encode_folders(folders: &[String]) -> Result<String> {
  Ok(serde_json::to_string(folders)?)
}

pub fn decode_folders(s: &str) -> Result<Vec<String>> {
  Ok(serde_json::from_str(s)?)
}

// ─── SyncStatus
// ───────────────────────────────────────────────────────────────

pub fn encode_status(s: SyncStatus) -> &'static str {
  match s {
    SyncStatus::Success => "success",
    SyncStatus::Failed => "failed",
  }
}

pub fn decode_status(s: &str) -> Result<SyncStatus> {
  match s {
    "success" => Ok(SyncStatus::Success),
    "failed" => Ok(SyncStatus::Failed),
    other => Err(Error::UnknownStatus(other.to_owned())),
  }
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Column list matching [`RawDocument::from_row`].
pub const DOCUMENT_COLUMNS: &str = "id, path, title, category, subcategory, folders, \
   content, description, sha, is_active, created_at, updated_at";

/// Column list matching [`RawSummary::from_row`].
pub const SUMMARY_COLUMNS: &str =
  "path, title, category, subcategory, folders, description, updated_at";

/// Raw values read directly from a `documents` row.
pub struct RawDocument {
  pub id:          i64,
  pub path:        String,
  pub title:       String,
  pub category:    String,
  pub subcategory: Option<String>,
  pub folders:     String,
  pub content:     String,
  pub description: String,
  pub sha:         String,
  pub is_active:   bool,
  pub created_at:  String,
  pub updated_at:  String,
}

impl RawDocument {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:          row.get(0)?,
      path:        row.get(1)?,
      title:       row.get(2)?,
      category:    row.get(3)?,
      subcategory: row.get(4)?,
      folders:     row.get(5)?,
      content:     row.get(6)?,
      description: row.get(7)?,
      sha:         row.get(8)?,
      is_active:   row.get(9)?,
      created_at:  row.get(10)?,
      updated_at:  row.get(11)?,
    })
  }

  pub fn into_document(self) -> Result<Document> {
    Ok(Document {
      id:          self.id,
      path:        self.path,
      title:       self.title,
      category:    self.category,
      subcategory: self.subcategory,
      folders:     decode_folders(&self.folders)?,
      content:     self.content,
      description: self.description,
      sha:         self.sha,
      is_active:   self.is_active,
      created_at:  decode_dt(&self.created_at)?,
      updated_at:  decode_dt(&self.updated_at)?,
    })
  }
}

/// Raw values for the listing columns of a `documents` row.
pub struct RawSummary {
  pub path:        String,
  pub title:       String,
  pub category:    String,
  pub subcategory: Option<String>,
  pub folders:     String,
  pub description: String,
  pub updated_at:  String,
}

impl RawSummary {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      path:        row.get(0)?,
      title:       row.get(1)?,
      category:    row.get(2)?,
      subcategory: row.get(3)?,
      folders:     row.get(4)?,
      description: row.get(5)?,
      updated_at:  row.get(6)?,
    })
  }

  pub fn into_summary(self) -> Result<DocumentSummary> {
    Ok(DocumentSummary {
      path:        self.path,
      title:       self.title,
      category:    self.category,
      subcategory: self.subcategory,
      folders:     decode_folders(&self.folders)?,
      description: self.description,
      updated_at:  decode_dt(&self.updated_at)?,
    })
  }
}

/// Raw strings read directly from a `sync_runs` row.
pub struct RawSyncRun {
  pub run_id:    String,
  pub status:    String,
  pub added:     i64,
  pub updated:   i64,
  pub deleted:   i64,
  pub error:     Option<String>,
  pub synced_at: String,
}

impl RawSyncRun {
  pub fn into_run(self) -> Result<SyncRun> {
    Ok(SyncRun {
      run_id:    Uuid::parse_str(&self.run_id)?,
      status:    decode_status(&self.status)?,
      added:     self.added.max(0) as u64,
      updated:   self.updated.max(0) as u64,
      deleted:   self.deleted.max(0) as u64,
      error:     self.error,
      synced_at: decode_dt(&self.synced_at)?,
    })
  }
}
