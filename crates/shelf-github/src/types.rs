//! Wire shapes of the GitHub "repository contents" endpoint.

use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
  File,
  Dir,
  Symlink,
  Submodule,
  #[serde(other)]
  Other,
}

/// One element of a directory listing.
#[derive(Debug, Clone, Deserialize)]
pub struct ContentEntry {
  pub name: String,
  pub path: String,
  pub sha:  String,
  #[serde(rename = "type")]
  pub kind: EntryKind,
}

/// A single file with its body inline.
#[derive(Debug, Clone, Deserialize)]
pub struct FileContent {
  pub path:     String,
  pub sha:      String,
  #[serde(rename = "type")]
  pub kind:     EntryKind,
  #[serde(default)]
  pub content:  Option<String>,
  #[serde(default)]
  pub encoding: Option<String>,
}

/// The endpoint returns an array for directories and an object for files.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ContentsResponse {
  Directory(Vec<ContentEntry>),
  File(FileContent),
}

/// Error body returned alongside non-success statuses.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiMessage {
  pub message: String,
}
