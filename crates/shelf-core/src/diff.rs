//! Change detection: remote listing vs. persisted documents.
//!
//! A three-way diff keyed by path. The host's identity token is trusted as the
//! content-change oracle; bodies are never compared. A renamed file shows up
//! as one removal plus one addition.

use std::collections::{HashMap, HashSet};

use crate::{document::StoredDocument, source::RemoteFile};

/// How a single remote file relates to what is stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Change {
  /// Stored, active, same token. Nothing to write.
  Unchanged,
  /// Stored but inactive with the same token. Only the active flag flips.
  Reactivated,
  /// Stored with a different token. Content must be refetched.
  Changed,
  /// Not stored.
  New,
}

/// Classify one remote file against the stored record for its path.
pub fn classify(remote: &RemoteFile, stored: Option<&StoredDocument>) -> Change {
  match stored {
    None => Change::New,
    Some(doc) if doc.sha != remote.sha => Change::Changed,
    Some(doc) if !doc.is_active => Change::Reactivated,
    Some(_) => Change::Unchanged,
  }
}

/// The outcome of diffing a remote listing against the store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeSet {
  pub new:         Vec<RemoteFile>,
  pub changed:     Vec<RemoteFile>,
  pub reactivated: Vec<RemoteFile>,
  pub unchanged:   Vec<RemoteFile>,
  /// Paths of active stored documents missing from the remote listing.
  pub removed:     Vec<String>,
}

impl ChangeSet {
  /// Files whose content has to be fetched.
  pub fn to_fetch(&self) -> impl Iterator<Item = (&RemoteFile, Change)> {
    self
      .new
      .iter()
      .map(|f| (f, Change::New))
      .chain(self.changed.iter().map(|f| (f, Change::Changed)))
  }

  pub fn is_empty(&self) -> bool {
    self.new.is_empty()
      && self.changed.is_empty()
      && self.reactivated.is_empty()
      && self.removed.is_empty()
  }
}

/// Diff `remote` against `stored`.
///
/// Duplicate remote paths keep their first occurrence. Stored documents that
/// are already inactive are never reported as removed.
pub fn detect_changes(remote: &[RemoteFile], stored: &[StoredDocument]) -> ChangeSet {
  let by_path: HashMap<&str, &StoredDocument> =
    stored.iter().map(|d| (d.path.as_str(), d)).collect();

  let mut seen: HashSet<&str> = HashSet::new();
  let mut set = ChangeSet::default();

  for file in remote {
    if !seen.insert(file.path.as_str()) {
      continue;
    }
    let bucket = match classify(file, by_path.get(file.path.as_str()).copied()) {
      Change::New => &mut set.new,
      Change::Changed => &mut set.changed,
      Change::Reactivated => &mut set.reactivated,
      Change::Unchanged => &mut set.unchanged,
    };
    bucket.push(file.clone());
  }

  set.removed = stored
    .iter()
    .filter(|d| d.is_active && !seen.contains(d.path.as_str()))
    .map(|d| d.path.clone())
    .collect();

  set
}

#[cfg(test)]
mod tests {
  use super::*;

  fn remote(path: &str, sha: &str) -> RemoteFile {
    RemoteFile {
      name: crate::taxonomy::file_name(path).to_owned(),
      path: path.to_owned(),
      sha:  sha.to_owned(),
    }
  }

  fn stored(path: &str, sha: &str, is_active: bool) -> StoredDocument {
    StoredDocument { path: path.to_owned(), sha: sha.to_owned(), is_active }
  }

  fn paths(files: &[RemoteFile]) -> Vec<&str> {
    files.iter().map(|f| f.path.as_str()).collect()
  }

  #[test]
  fn empty_store_makes_everything_new() {
    let set = detect_changes(&[remote("a/x.md", "1"), remote("a/y.md", "2")], &[]);
    assert_eq!(paths(&set.new), vec!["a/x.md", "a/y.md"]);
    assert!(set.changed.is_empty());
    assert!(set.removed.is_empty());
  }

  #[test]
  fn three_way_classification() {
    let set = detect_changes(
      &[remote("a/same.md", "1"), remote("a/edit.md", "new"), remote("a/add.md", "3")],
      &[
        stored("a/same.md", "1", true),
        stored("a/edit.md", "old", true),
        stored("a/gone.md", "9", true),
      ],
    );
    assert_eq!(paths(&set.unchanged), vec!["a/same.md"]);
    assert_eq!(paths(&set.changed), vec!["a/edit.md"]);
    assert_eq!(paths(&set.new), vec!["a/add.md"]);
    assert_eq!(set.removed, vec!["a/gone.md"]);
  }

  #[test]
  fn unchanged_listing_is_empty_changeset() {
    let set = detect_changes(&[remote("a/x.md", "1")], &[stored("a/x.md", "1", true)]);
    assert!(set.is_empty());
  }

  #[test]
  fn inactive_records_are_not_removed_twice() {
    let set = detect_changes(&[], &[stored("a/x.md", "1", false)]);
    assert!(set.removed.is_empty());
  }

  #[test]
  fn reappearing_file_is_reactivated_or_changed() {
    let set = detect_changes(
      &[remote("a/back.md", "1"), remote("a/edited.md", "2")],
      &[stored("a/back.md", "1", false), stored("a/edited.md", "1", false)],
    );
    assert_eq!(paths(&set.reactivated), vec!["a/back.md"]);
    assert_eq!(paths(&set.changed), vec!["a/edited.md"]);
  }

  #[test]
  fn rename_is_delete_plus_add() {
    let set = detect_changes(&[remote("a/new_name.md", "1")], &[stored("a/old_name.md", "1", true)]);
    assert_eq!(paths(&set.new), vec!["a/new_name.md"]);
    assert_eq!(set.removed, vec!["a/old_name.md"]);
  }

  #[test]
  fn duplicate_remote_paths_count_once() {
    let set = detect_changes(&[remote("a/x.md", "1"), remote("a/x.md", "2")], &[]);
    assert_eq!(set.new.len(), 1);
    assert_eq!(set.new[0].sha, "1");
  }

  #[test]
  fn to_fetch_covers_new_and_changed() {
    let set = detect_changes(
      &[remote("a/new.md", "1"), remote("a/edit.md", "2")],
      &[stored("a/edit.md", "1", true)],
    );
    let fetch: Vec<_> = set.to_fetch().map(|(f, c)| (f.path.as_str(), c)).collect();
    assert_eq!(fetch, vec![("a/new.md", Change::New), ("a/edit.md", Change::Changed)]);
  }
}
