//! Folder tree derivation.
//!
//! The tree is rebuilt on read from the paths of active documents. A folder
//! exists exactly when some active document lives somewhere beneath it; a
//! stored README alone does not make a folder.

use std::collections::{BTreeMap, BTreeSet};

use crate::{
  document::{DocumentSummary, FolderContents, FolderEntry},
  taxonomy::segments,
};

/// Every strict path prefix of every document path, deduplicated and sorted
/// by joined path. Each folder is returned as its segment list.
pub fn folder_paths<'a, I>(document_paths: I) -> Vec<Vec<String>>
where
  I: IntoIterator<Item = &'a str>,
{
  let mut folders: BTreeSet<String> = BTreeSet::new();
  for path in document_paths {
    let parts = segments(path);
    for depth in 1..parts.len() {
      folders.insert(parts[..depth].join("/"));
    }
  }
  folders
    .into_iter()
    .map(|p| p.split('/').map(str::to_owned).collect())
    .collect()
}

/// One level of the tree below `folder_path`.
///
/// `documents` may contain anything; only those under `folder_path` are
/// considered. Documents directly inside the folder are returned sorted by
/// title. Deeper documents are counted toward the direct subfolder they sit
/// under. The README is left empty for the caller to fill.
pub fn folder_contents(folder_path: &str, documents: Vec<DocumentSummary>) -> FolderContents {
  let folder_parts = segments(folder_path);
  let depth = folder_parts.len();
  let prefix = format!("{}/", folder_parts.join("/"));

  let mut direct: Vec<DocumentSummary> = Vec::new();
  let mut subfolders: BTreeMap<String, u64> = BTreeMap::new();

  for doc in documents {
    if !doc.path.starts_with(&prefix) {
      continue;
    }
    let parts = segments(&doc.path);
    if parts.len() - 1 == depth {
      direct.push(doc);
    } else if parts.len() > depth + 1 {
      *subfolders.entry(parts[..=depth].join("/")).or_default() += 1;
    }
  }

  direct.sort_by(|a, b| a.title.cmp(&b.title));

  let mut folders: Vec<FolderEntry> = subfolders
    .into_iter()
    .map(|(path, count)| FolderEntry {
      name: crate::taxonomy::file_name(&path).to_owned(),
      path,
      count,
    })
    .collect();
  folders.sort_by(|a, b| a.name.cmp(&b.name));

  FolderContents { folders, documents: direct, readme: None }
}

#[cfg(test)]
mod tests {
  use chrono::{TimeZone, Utc};

  use super::*;

  fn summary(path: &str) -> DocumentSummary {
    let t = crate::taxonomy::derive(path);
    DocumentSummary {
      path:        path.to_owned(),
      title:       crate::taxonomy::title_from_filename(crate::taxonomy::file_name(path)),
      category:    t.category,
      subcategory: t.subcategory,
      folders:     t.folders,
      description: String::new(),
      updated_at:  Utc.timestamp_opt(0, 0).unwrap(),
    }
  }

  fn joined(folders: &[Vec<String>]) -> Vec<String> {
    folders.iter().map(|f| f.join("/")).collect()
  }

  #[test]
  fn deep_document_yields_every_prefix() {
    let folders = folder_paths(["a/b/c/doc.md"]);
    assert_eq!(joined(&folders), vec!["a", "a/b", "a/b/c"]);
  }

  #[test]
  fn prefixes_are_deduplicated_and_sorted() {
    let folders = folder_paths(["ai/llm/rag.md", "ai/intro.md", "java/x.md", "ai/llm/agents/a.md"]);
    assert_eq!(joined(&folders), vec!["ai", "ai/llm", "ai/llm/agents", "java"]);
    assert_eq!(folders[1], vec!["ai".to_owned(), "llm".to_owned()]);
  }

  #[test]
  fn root_documents_yield_no_folders() {
    assert!(folder_paths(["README.md"]).is_empty());
  }

  #[test]
  fn direct_posts_and_subfolder_counts() {
    let docs = vec![
      summary("ai/intro.md"),
      summary("ai/llm/rag.md"),
      summary("ai/llm/agents/react.md"),
      summary("ai/vision/cnn.md"),
      summary("java/streams.md"),
    ];

    let top = folder_contents("ai", docs.clone());
    assert_eq!(
      top.documents.iter().map(|d| d.path.as_str()).collect::<Vec<_>>(),
      vec!["ai/intro.md"]
    );
    assert_eq!(
      top.folders,
      vec![
        FolderEntry { name: "llm".into(), path: "ai/llm".into(), count: 2 },
        FolderEntry { name: "vision".into(), path: "ai/vision".into(), count: 1 },
      ]
    );

    let llm = folder_contents("ai/llm", docs);
    assert_eq!(
      llm.documents.iter().map(|d| d.path.as_str()).collect::<Vec<_>>(),
      vec!["ai/llm/rag.md"]
    );
    assert_eq!(llm.folders.len(), 1);
    assert_eq!(llm.folders[0].path, "ai/llm/agents");
  }

  #[test]
  fn sibling_prefix_is_not_a_child() {
    let contents = folder_contents("ai", vec![summary("ai-old/x.md")]);
    assert!(contents.documents.is_empty());
    assert!(contents.folders.is_empty());
  }

  #[test]
  fn direct_posts_sorted_by_title() {
    let contents =
      folder_contents("a", vec![summary("a/zeta.md"), summary("a/alpha.md")]);
    assert_eq!(contents.documents[0].title, "alpha");
    assert_eq!(contents.documents[1].title, "zeta");
  }
}
