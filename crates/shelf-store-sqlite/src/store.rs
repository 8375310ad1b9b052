//! [`SqliteStore`] — the SQLite implementation of [`DocumentStore`].

use std::path::Path;

use chrono::Utc;
use rusqlite::OptionalExtension as _;
use shelf_core::{
  document::{
    Category, Document, DocumentSummary, FolderContents, NewDocument,
    NewSyncRun, StoredDocument, SyncRun,
  },
  folder, icons,
  store::{DocumentStore, SearchQuery},
  taxonomy::segments,
};
use tracing::warn;
use uuid::Uuid;

use crate::{
  Error, Result,
  encode::{
    DOCUMENT_COLUMNS, RawDocument, RawSummary, RawSyncRun, SUMMARY_COLUMNS,
    decode_dt, encode_dt, encode_folders, encode_status,
  },
  schema::SCHEMA,
};

fn now_str() -> String { encode_dt(Utc::now()) }

/// Escape `%`, `_` and `\` for use in a `LIKE ... ESCAPE '\'` pattern.
fn escape_like(s: &str) -> String {
  let mut out = String::with_capacity(s.len());
  for c in s.chars() {
    if matches!(c, '%' | '_' | '\\') {
      out.push('\\');
    }
    out.push(c);
  }
  out
}

/// Turn free text into an FTS5 query: every word a quoted prefix term, all
/// of them required.
fn fts_query(text: &str) -> String {
  text
    .split_whitespace()
    .map(|word| format!("\"{}\"*", word.replace('"', "\"\"")))
    .collect::<Vec<_>>()
    .join(" ")
}

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Shelf document store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Run a summary query with the given `WHERE`/`ORDER BY` tail.
  async fn query_summaries(
    &self,
    tail: &'static str,
    params: Vec<rusqlite::types::Value>,
  ) -> Result<Vec<DocumentSummary>> {
    let raws: Vec<RawSummary> = self
      .conn
      .call(move |conn| {
        let sql = format!("SELECT {SUMMARY_COLUMNS} FROM documents {tail}");
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map(rusqlite::params_from_iter(params), RawSummary::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawSummary::into_summary).collect()
  }

  async fn search_full_text(&self, query: &SearchQuery) -> Result<Vec<DocumentSummary>> {
    let match_expr = fts_query(&query.text);
    let limit      = query.limit as i64;

    let raws: Vec<RawSummary> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT d.path, d.title, d.category, d.subcategory, d.folders,
                  d.description, d.updated_at
           FROM documents_fts
           JOIN documents d ON d.id = documents_fts.rowid
           WHERE documents_fts MATCH ?1
             AND d.is_active = 1
           ORDER BY bm25(documents_fts)
           LIMIT ?2",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![match_expr, limit], RawSummary::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawSummary::into_summary).collect()
  }

  async fn search_like(&self, query: &SearchQuery) -> Result<Vec<DocumentSummary>> {
    let pattern = format!("%{}%", escape_like(query.text.trim()));
    self
      .query_summaries(
        "WHERE is_active = 1
           AND (title LIKE ?1 ESCAPE '\\'
             OR content LIKE ?1 ESCAPE '\\'
             OR description LIKE ?1 ESCAPE '\\')
         ORDER BY updated_at DESC
         LIMIT ?2",
        vec![pattern.into(), (query.limit as i64).into()],
      )
      .await
  }

  async fn get_document_any(&self, path: String) -> Result<Option<Document>> {
    let raw: Option<RawDocument> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            &format!("SELECT {DOCUMENT_COLUMNS} FROM documents WHERE path = ?1"),
            rusqlite::params![path],
            RawDocument::from_row,
          )
          .optional()?)
      })
      .await?;

    raw.map(RawDocument::into_document).transpose()
  }
}

// ─── DocumentStore impl ──────────────────────────────────────────────────────

impl DocumentStore for SqliteStore {
  type Error = Error;

  // ── Sync writes ───────────────────────────────────────────────────────────

  async fn load_documents(&self) -> Result<Vec<StoredDocument>> {
    let docs = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare("SELECT path, sha, is_active FROM documents")?;
        let rows = stmt
          .query_map([], |row| {
            Ok(StoredDocument {
              path:      row.get(0)?,
              sha:       row.get(1)?,
              is_active: row.get(2)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    Ok(docs)
  }

  async fn insert_document(&self, doc: NewDocument) -> Result<Document> {
    let folders_str = encode_folders(&doc.taxonomy.folders)?;
    let now_s       = now_str();
    let now         = decode_dt(&now_s)?;

    let path        = doc.path.clone();
    let title       = doc.title.clone();
    let category    = doc.taxonomy.category.clone();
    let subcategory = doc.taxonomy.subcategory.clone();
    let content     = doc.content.clone();
    let description = doc.description.clone();
    let sha         = doc.sha.clone();

    let id: Option<i64> = self
      .conn
      .call(move |conn| {
        let exists = conn
          .query_row(
            "SELECT 1 FROM documents WHERE path = ?1",
            rusqlite::params![path],
            |_| Ok(true),
          )
          .optional()?
          .unwrap_or(false);
        if exists {
          return Ok(None);
        }

        conn.execute(
          "INSERT INTO documents (
             path, title, category, subcategory, folders,
             content, description, sha, is_active, created_at, updated_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, 1, ?9, ?9)",
          rusqlite::params![
            path,
            title,
            category,
            subcategory,
            folders_str,
            content,
            description,
            sha,
            now_s,
          ],
        )?;
        Ok(Some(conn.last_insert_rowid()))
      })
      .await?;

    let id = id.ok_or_else(|| Error::DocumentExists(doc.path.clone()))?;

    Ok(Document {
      id,
      path:        doc.path,
      title:       doc.title,
      category:    doc.taxonomy.category,
      subcategory: doc.taxonomy.subcategory,
      folders:     doc.taxonomy.folders,
      content:     doc.content,
      description: doc.description,
      sha:         doc.sha,
      is_active:   true,
      created_at:  now,
      updated_at:  now,
    })
  }

  async fn update_document(&self, doc: NewDocument) -> Result<Document> {
    let folders_str = encode_folders(&doc.taxonomy.folders)?;
    let now_s       = now_str();
    let path        = doc.path.clone();
    let lookup      = doc.path.clone();

    let raw: Option<RawDocument> = self
      .conn
      .call(move |conn| {
        let n = conn.execute(
          "UPDATE documents
           SET title = ?2, category = ?3, subcategory = ?4, folders = ?5,
               content = ?6, description = ?7, sha = ?8,
               is_active = 1, updated_at = ?9
           WHERE path = ?1",
          rusqlite::params![
            path,
            doc.title,
            doc.taxonomy.category,
            doc.taxonomy.subcategory,
            folders_str,
            doc.content,
            doc.description,
            doc.sha,
            now_s,
          ],
        )?;
        if n == 0 {
          return Ok(None);
        }

        Ok(conn
          .query_row(
            &format!("SELECT {DOCUMENT_COLUMNS} FROM documents WHERE path = ?1"),
            rusqlite::params![path],
            RawDocument::from_row,
          )
          .optional()?)
      })
      .await?;

    match raw {
      Some(raw) => raw.into_document(),
      None => Err(Error::DocumentNotFound(lookup)),
    }
  }

  async fn set_active(&self, path: &str, active: bool) -> Result<bool> {
    let path  = path.to_owned();
    let now_s = now_str();

    let n = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "UPDATE documents SET is_active = ?2, updated_at = ?3 WHERE path = ?1",
          rusqlite::params![path, active, now_s],
        )?)
      })
      .await?;
    Ok(n > 0)
  }

  async fn upsert_folder_readme(&self, folder_path: &str, readme: &str, sha: &str) -> Result<()> {
    let folder_path = segments(folder_path).join("/");
    let readme      = readme.to_owned();
    let sha         = sha.to_owned();
    let now_s       = now_str();

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO folders (path, readme, sha, updated_at) VALUES (?1, ?2, ?3, ?4)
           ON CONFLICT(path) DO UPDATE SET
             readme = excluded.readme,
             sha = excluded.sha,
             updated_at = excluded.updated_at",
          rusqlite::params![folder_path, readme, sha, now_s],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn clear_folder_readme(&self, folder_path: &str) -> Result<()> {
    let folder_path = segments(folder_path).join("/");
    self
      .conn
      .call(move |conn| {
        conn.execute("DELETE FROM folders WHERE path = ?1", [folder_path])?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn rebuild_categories(&self) -> Result<Vec<Category>> {
    let categories = self
      .conn
      .call(|conn| {
        let tx = conn.transaction()?;

        let counts: Vec<(String, i64)> = {
          let mut stmt = tx.prepare(
            "SELECT category, COUNT(*) FROM documents
             WHERE is_active = 1
             GROUP BY category
             ORDER BY COUNT(*) DESC, category",
          )?;
          stmt
            .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?
            .collect::<rusqlite::Result<Vec<_>>>()?
        };

        tx.execute("DELETE FROM categories", [])?;

        let mut rows = Vec::with_capacity(counts.len());
        for (name, count) in counts {
          let icon = icons::category_icon(&name);
          tx.execute(
            "INSERT INTO categories (name, slug, icon, post_count) VALUES (?1, ?1, ?2, ?3)",
            rusqlite::params![name, icon, count],
          )?;
          rows.push(Category {
            slug:  name.clone(),
            name,
            icon:  Some(icon.to_owned()),
            count: count.max(0) as u64,
          });
        }

        tx.commit()?;
        Ok(rows)
      })
      .await?;
    Ok(categories)
  }

  async fn record_sync_run(&self, run: NewSyncRun) -> Result<SyncRun> {
    let at_str = now_str();
    let record = SyncRun {
      run_id:    Uuid::new_v4(),
      status:    run.status,
      added:     run.added,
      updated:   run.updated,
      deleted:   run.deleted,
      error:     run.error,
      synced_at: decode_dt(&at_str)?,
    };

    let id_str     = record.run_id.hyphenated().to_string();
    let status_str = encode_status(record.status);
    let added      = record.added as i64;
    let updated    = record.updated as i64;
    let deleted    = record.deleted as i64;
    let error      = record.error.clone();

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO sync_runs (run_id, status, added, updated, deleted, error, synced_at)
           VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
          rusqlite::params![id_str, status_str, added, updated, deleted, error, at_str],
        )?;
        Ok(())
      })
      .await?;

    Ok(record)
  }

  // ── Reads ─────────────────────────────────────────────────────────────────

  async fn list_categories(&self) -> Result<Vec<Category>> {
    let categories = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(
          "SELECT name, slug, icon, post_count FROM categories
           ORDER BY post_count DESC, name",
        )?;
        let rows = stmt
          .query_map([], |row| {
            let count: i64 = row.get(3)?;
            Ok(Category {
              name:  row.get(0)?,
              slug:  row.get(1)?,
              icon:  row.get(2)?,
              count: count.max(0) as u64,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    Ok(categories)
  }

  async fn documents_by_category(&self, category: &str) -> Result<Vec<DocumentSummary>> {
    self
      .query_summaries(
        "WHERE category = ?1 AND is_active = 1 ORDER BY title",
        vec![category.to_owned().into()],
      )
      .await
  }

  async fn recent_documents(&self, limit: usize) -> Result<Vec<DocumentSummary>> {
    self
      .query_summaries(
        "WHERE is_active = 1 ORDER BY updated_at DESC LIMIT ?1",
        vec![(limit as i64).into()],
      )
      .await
  }

  async fn get_document(&self, path: &str) -> Result<Option<Document>> {
    Ok(
      self
        .get_document_any(path.to_owned())
        .await?
        .filter(|d| d.is_active),
    )
  }

  async fn all_document_paths(&self) -> Result<Vec<String>> {
    let paths = self
      .conn
      .call(|conn| {
        let mut stmt =
          conn.prepare("SELECT path FROM documents WHERE is_active = 1 ORDER BY path")?;
        let rows = stmt
          .query_map([], |row| row.get(0))?
          .collect::<rusqlite::Result<Vec<String>>>()?;
        Ok(rows)
      })
      .await?;
    Ok(paths)
  }

  async fn all_folder_paths(&self) -> Result<Vec<Vec<String>>> {
    let paths = self.all_document_paths().await?;
    Ok(folder::folder_paths(paths.iter().map(String::as_str)))
  }

  async fn folder_contents(&self, folder_path: &str) -> Result<FolderContents> {
    let normalized = segments(folder_path).join("/");
    if normalized.is_empty() {
      return Ok(FolderContents::default());
    }

    let pattern   = format!("{}/%", escape_like(&normalized));
    let summaries = self
      .query_summaries(
        "WHERE is_active = 1 AND path LIKE ?1 ESCAPE '\\'",
        vec![pattern.into()],
      )
      .await?;

    let mut contents = folder::folder_contents(&normalized, summaries);

    let key = normalized.clone();
    contents.readme = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            "SELECT readme FROM folders WHERE path = ?1",
            rusqlite::params![key],
            |row| row.get::<_, Option<String>>(0),
          )
          .optional()?
          .flatten())
      })
      .await?;

    Ok(contents)
  }

  async fn search(&self, query: &SearchQuery) -> Result<Vec<DocumentSummary>> {
    if query.text.trim().is_empty() || query.limit == 0 {
      return Ok(Vec::new());
    }

    if query.full_text {
      match self.search_full_text(query).await {
        Ok(results) => return Ok(results),
        Err(e) => warn!("full-text search failed, falling back to LIKE: {e}"),
      }
    }

    self.search_like(query).await
  }

  async fn list_sync_runs(&self, limit: usize) -> Result<Vec<SyncRun>> {
    let limit = limit as i64;

    let raws: Vec<RawSyncRun> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT run_id, status, added, updated, deleted, error, synced_at
           FROM sync_runs
           ORDER BY synced_at DESC, rowid DESC
           LIMIT ?1",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![limit], |row| {
            Ok(RawSyncRun {
              run_id:    row.get(0)?,
              status:    row.get(1)?,
              added:     row.get(2)?,
              updated:   row.get(3)?,
              deleted:   row.get(4)?,
              error:     row.get(5)?,
              synced_at: row.get(6)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawSyncRun::into_run).collect()
  }
}
