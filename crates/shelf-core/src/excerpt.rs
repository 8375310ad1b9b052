//! Front matter parsing and plain-text description excerpts.

use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;

/// Length of the description stored alongside each synced document.
pub const DESCRIPTION_LEN: usize = 200;

static FRONT_MATTER: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"^---[ \t]*\r?\n([\s\S]*?)\r?\n---[ \t]*\r?\n").unwrap());
static HEADING: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"(?m)^#+\s+.+$").unwrap());
static LINK: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"\[([^\]]+)\]\([^)]+\)").unwrap());
static FORMATTING: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[*_`~]").unwrap());
static NEWLINES: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(\r?\n)+").unwrap());

/// The front matter keys Shelf reads. Unknown keys are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct FrontMatter {
  pub description: Option<String>,
}

/// Split a leading `---` YAML block from the body.
///
/// Returns default front matter and the untouched input when there is no
/// block or the block is not valid YAML for [`FrontMatter`].
pub fn split_front_matter(content: &str) -> (FrontMatter, &str) {
  let Some(caps) = FRONT_MATTER.captures(content) else {
    return (FrontMatter::default(), content);
  };
  let whole = caps.get(0).map_or(0, |m| m.end());
  match serde_yaml::from_str::<FrontMatter>(&caps[1]) {
    Ok(fm) => (fm, &content[whole..]),
    Err(_) => (FrontMatter::default(), &content[whole..]),
  }
}

/// A short plain-text description of a Markdown document.
///
/// A front matter `description` wins. Otherwise headings are dropped, links
/// reduced to their text, inline formatting stripped and the result cut to
/// `max_chars` characters with a trailing `...`.
pub fn extract_description(content: &str, max_chars: usize) -> String {
  let (front, body) = split_front_matter(content);
  if let Some(description) = front.description {
    return description;
  }

  let text = HEADING.replace_all(body, "");
  let text = LINK.replace_all(&text, "$1");
  let text = FORMATTING.replace_all(&text, "");
  let text = NEWLINES.replace_all(&text, " ");
  let text = text.trim();

  match text.char_indices().nth(max_chars) {
    Some((cut, _)) => format!("{}...", text[..cut].trim_end()),
    None => text.to_owned(),
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn front_matter_description_wins() {
    let md = "---\ntitle: Hello\ndescription: \"Short and sweet\"\n---\n# Hello\nBody text.";
    assert_eq!(extract_description(md, 200), "Short and sweet");
  }

  #[test]
  fn front_matter_without_description_is_skipped() {
    let md = "---\ntitle: Hello\ntags: [a, b]\n---\nBody text.";
    let (fm, body) = split_front_matter(md);
    assert_eq!(fm, FrontMatter::default());
    assert_eq!(body, "Body text.");
    assert_eq!(extract_description(md, 200), "Body text.");
  }

  #[test]
  fn markdown_is_reduced_to_plain_text() {
    let md = "# Title\n\nSee **the** [docs](https://example.com) for `code`.\nNext line.";
    assert_eq!(
      extract_description(md, 200),
      "See the docs for code. Next line."
    );
  }

  #[test]
  fn long_text_is_truncated_on_char_boundary() {
    let md = "가나다라마바사".repeat(10);
    let out = extract_description(&md, 5);
    assert_eq!(out, "가나다라마...");
  }

  #[test]
  fn text_exactly_at_limit_is_not_truncated() {
    assert_eq!(extract_description("abcde", 5), "abcde");
  }

  #[test]
  fn no_front_matter_returns_input() {
    let (fm, body) = split_front_matter("plain");
    assert_eq!(fm, FrontMatter::default());
    assert_eq!(body, "plain");
  }
}
