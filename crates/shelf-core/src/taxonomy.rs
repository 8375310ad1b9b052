//! Path taxonomy: category, subcategory and folder chain derived purely from
//! a document's path.
//!
//! For `ai/llm/agents/react.md` the category is `ai`, the folders are
//! `["llm", "agents"]` and the subcategory is `llm`.

use serde::{Deserialize, Serialize};

/// Category used when a document sits at the repository root.
pub const UNCATEGORIZED: &str = "uncategorized";

/// File extensions treated as documents.
pub const DOCUMENT_EXTENSIONS: &[&str] = &[".md", ".mdx"];

/// File names whose body is also stored as the containing folder's README.
pub const README_NAMES: &[&str] =
  &["README.md", "readme.md", "README.MD", "Readme.md"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Taxonomy {
  pub category:    String,
  pub subcategory: Option<String>,
  pub folders:     Vec<String>,
}

/// Split a path into its non-empty segments.
pub fn segments(path: &str) -> Vec<&str> {
  path.split('/').filter(|s| !s.is_empty()).collect()
}

/// Derive the taxonomy of a document path.
///
/// Total over all inputs: a bare filename (or an empty path) lands in
/// [`UNCATEGORIZED`] with no folders.
pub fn derive(path: &str) -> Taxonomy {
  let parts = segments(path);

  if parts.len() < 2 {
    return Taxonomy {
      category:    UNCATEGORIZED.to_owned(),
      subcategory: None,
      folders:     Vec::new(),
    };
  }

  let folders: Vec<String> =
    parts[1..parts.len() - 1].iter().map(|s| (*s).to_owned()).collect();

  Taxonomy {
    category: parts[0].to_owned(),
    subcategory: folders.first().cloned(),
    folders,
  }
}

/// The last segment of a path.
pub fn file_name(path: &str) -> &str {
  path.rsplit('/').find(|s| !s.is_empty()).unwrap_or("")
}

/// The folder containing `path`, or `None` for root-level files.
pub fn parent(path: &str) -> Option<String> {
  let parts = segments(path);
  (parts.len() > 1).then(|| parts[..parts.len() - 1].join("/"))
}

/// Display title: the filename without its document extension, underscores
/// replaced by spaces.
pub fn title_from_filename(name: &str) -> String {
  let stem = DOCUMENT_EXTENSIONS
    .iter()
    .find_map(|ext| name.strip_suffix(ext))
    .unwrap_or(name);
  stem.replace('_', " ")
}

pub fn is_document(name: &str) -> bool {
  DOCUMENT_EXTENSIONS.iter().any(|ext| name.ends_with(ext))
}

pub fn is_hidden(name: &str) -> bool { name.starts_with('.') }

pub fn is_readme(name: &str) -> bool { README_NAMES.contains(&name) }

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn nested_path_yields_folder_chain() {
    let t = derive("ai/llm/agents/react.md");
    assert_eq!(t.category, "ai");
    assert_eq!(t.folders, vec!["llm", "agents"]);
    assert_eq!(t.subcategory.as_deref(), Some("llm"));
  }

  #[test]
  fn category_level_file_has_no_folders() {
    let t = derive("java/streams.md");
    assert_eq!(t.category, "java");
    assert!(t.folders.is_empty());
    assert_eq!(t.subcategory, None);
  }

  #[test]
  fn bare_filename_is_uncategorized() {
    let t = derive("README.md");
    assert_eq!(t.category, UNCATEGORIZED);
    assert!(t.folders.is_empty());
    assert_eq!(t.subcategory, None);
  }

  #[test]
  fn stray_slashes_are_ignored() {
    assert_eq!(derive("/ai//llm/rag.md"), derive("ai/llm/rag.md"));
  }

  #[test]
  fn subcategory_is_always_first_folder() {
    for path in ["a/b/c.md", "a/b/c/d.md", "a/b/c/d/e/f.md"] {
      let t = derive(path);
      assert_eq!(t.category, "a");
      assert_eq!(t.subcategory.as_deref(), Some("b"));
      assert_eq!(t.folders.len(), segments(path).len() - 2);
    }
  }

  #[test]
  fn title_strips_extension_and_underscores() {
    assert_eq!(title_from_filename("spring_boot_basics.md"), "spring boot basics");
    assert_eq!(title_from_filename("intro.mdx"), "intro");
    assert_eq!(title_from_filename("notes.txt"), "notes.txt");
  }

  #[test]
  fn filters() {
    assert!(is_document("a.md"));
    assert!(is_document("a.mdx"));
    assert!(!is_document("a.png"));
    assert!(is_hidden(".github"));
    assert!(!is_hidden("github"));
    assert!(is_readme("Readme.md"));
    assert!(!is_readme("readme.mdx"));
  }

  #[test]
  fn parent_and_file_name() {
    assert_eq!(parent("ai/llm/rag.md").as_deref(), Some("ai/llm"));
    assert_eq!(parent("README.md"), None);
    assert_eq!(file_name("ai/llm/rag.md"), "rag.md");
  }
}
