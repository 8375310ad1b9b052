//! [`Synchronizer`] — one remote source, one store, one run at a time.

use std::sync::Arc;

use serde::Serialize;
use shelf_core::{
  diff::{Change, detect_changes},
  document::{NewDocument, NewSyncRun},
  excerpt::{DESCRIPTION_LEN, extract_description},
  source::{ContentSource, RemoteFile},
  store::DocumentStore,
  taxonomy,
};
use tokio::sync::Mutex;
use tracing::{error, info, instrument, warn};

use crate::error::{Error, Result};

/// Counts of one successful run, plus every non-fatal problem it hit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SyncReport {
  pub added:    u64,
  /// Refreshed documents plus reactivated ones.
  pub updated:  u64,
  pub deleted:  u64,
  pub warnings: Vec<String>,
}

pub struct Synchronizer<S, C> {
  store:  Arc<S>,
  source: Arc<C>,
  guard:  Mutex<()>,
}

impl<S, C> Synchronizer<S, C>
where
  S: DocumentStore,
  C: ContentSource,
{
  pub fn new(store: Arc<S>, source: Arc<C>) -> Self {
    Self { store, source, guard: Mutex::new(()) }
  }

  pub fn store(&self) -> &Arc<S> { &self.store }

  /// Run one synchronization.
  ///
  /// Fails fast without touching the store when it is not configured or when
  /// another run is in flight. Any store failure after that point is
  /// recorded as a failed run before being returned.
  #[instrument(skip(self))]
  pub async fn sync(&self) -> Result<SyncReport> {
    if !self.store.is_configured() {
      return Err(Error::NotConfigured);
    }
    let Ok(_running) = self.guard.try_lock() else {
      return Err(Error::AlreadyRunning);
    };

    info!("sync started");
    let listing = self.source.list_documents().await;
    info!(
      files = listing.files.len(),
      warnings = listing.warnings.len(),
      "remote listing complete"
    );

    let mut warnings: Vec<String> =
      listing.warnings.iter().map(ToString::to_string).collect();

    match self.apply(&listing.files, &mut warnings).await {
      Ok(report) => {
        info!(
          added = report.added,
          updated = report.updated,
          deleted = report.deleted,
          warnings = warnings.len(),
          "sync completed"
        );
        Ok(SyncReport { warnings, ..report })
      }
      Err(e) => {
        let message = e.to_string();
        error!("sync failed: {message}");
        if let Err(audit) = self.store.record_sync_run(NewSyncRun::failed(message)).await {
          error!("failed to record failed sync run: {audit}");
        }
        Err(Error::store(e))
      }
    }
  }

  /// Diff, write and audit. Only store errors escape.
  async fn apply(
    &self,
    remote: &[RemoteFile],
    warnings: &mut Vec<String>,
  ) -> Result<SyncReport, S::Error> {
    let stored  = self.store.load_documents().await?;
    let changes = detect_changes(remote, &stored);
    info!(
      new = changes.new.len(),
      changed = changes.changed.len(),
      reactivated = changes.reactivated.len(),
      removed = changes.removed.len(),
      unchanged = changes.unchanged.len(),
      "change detection complete"
    );

    let mut report = SyncReport::default();

    for (file, change) in changes.to_fetch() {
      let content = match self.source.fetch(&file.path).await {
        Ok(content) => content,
        Err(e) => {
          warn!("skipping {}: {e}", file.path);
          warnings.push(format!("{}: {e}", file.path));
          continue;
        }
      };

      let doc = NewDocument {
        path:        file.path.clone(),
        title:       taxonomy::title_from_filename(&file.name),
        taxonomy:    taxonomy::derive(&file.path),
        description: extract_description(&content.content, DESCRIPTION_LEN),
        content:     content.content,
        sha:         file.sha.clone(),
      };

      if taxonomy::is_readme(&file.name)
        && let Some(folder) = taxonomy::parent(&file.path)
      {
        self
          .store
          .upsert_folder_readme(&folder, &doc.content, &doc.sha)
          .await?;
      }

      match change {
        Change::New => {
          self.store.insert_document(doc).await?;
          info!(path = %file.path, "added");
          report.added += 1;
        }
        _ => {
          self.store.update_document(doc).await?;
          info!(path = %file.path, "updated");
          report.updated += 1;
        }
      }
    }

    for file in &changes.reactivated {
      if self.store.set_active(&file.path, true).await? {
        info!(path = %file.path, "reactivated");
        report.updated += 1;
        if taxonomy::is_readme(&file.name) {
          self.restore_folder_readme(&file.path).await?;
        }
      }
    }

    for path in &changes.removed {
      if self.store.set_active(path, false).await? {
        info!(path = %path, "deleted");
        report.deleted += 1;
      }
      if taxonomy::is_readme(taxonomy::file_name(path))
        && let Some(folder) = taxonomy::parent(path)
      {
        self.store.clear_folder_readme(&folder).await?;
      }
    }

    let categories = self.store.rebuild_categories().await?;
    info!(categories = categories.len(), "category rollups rebuilt");

    self
      .store
      .record_sync_run(NewSyncRun::success(report.added, report.updated, report.deleted))
      .await?;

    Ok(report)
  }

  /// Put a reactivated README back on its folder from the stored body.
  async fn restore_folder_readme(&self, path: &str) -> Result<(), S::Error> {
    let Some(folder) = taxonomy::parent(path) else { return Ok(()) };
    if let Some(doc) = self.store.get_document(path).await? {
      self
        .store
        .upsert_folder_readme(&folder, &doc.content, &doc.sha)
        .await?;
    }
    Ok(())
  }
}
