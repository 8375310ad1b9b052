//! Static category → icon glyph table.

/// Glyph for categories without an entry in [`CATEGORY_ICONS`].
pub const DEFAULT_CATEGORY_ICON: &str = "📁";

pub const CATEGORY_ICONS: &[(&str, &str)] = &[
  ("AI", "🤖"),
  ("algorithm", "🧮"),
  ("architecture", "🏗️"),
  ("css", "🎨"),
  ("database", "🗄️"),
  ("devops", "🚀"),
  ("finance", "💰"),
  ("git", "📝"),
  ("go", "🐹"),
  ("html", "🌐"),
  ("http", "📡"),
  ("internet", "🌍"),
  ("interview", "💼"),
  ("java", "☕"),
  ("javascript", "⚡"),
  ("kafka", "📨"),
  ("network", "🔌"),
  ("react", "⚛️"),
  ("redis", "🔴"),
  ("resume", "📄"),
  ("기술공유", "📢"),
];

/// Icon for a category name. Lookup is exact (case-sensitive).
pub fn category_icon(category: &str) -> &'static str {
  CATEGORY_ICONS
    .iter()
    .find(|(name, _)| *name == category)
    .map_or(DEFAULT_CATEGORY_ICON, |(_, icon)| *icon)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn known_and_unknown_categories() {
    assert_eq!(category_icon("java"), "☕");
    assert_eq!(category_icon("AI"), "🤖");
    assert_eq!(category_icon("ai"), DEFAULT_CATEGORY_ICON);
    assert_eq!(category_icon("cooking"), DEFAULT_CATEGORY_ICON);
  }
}
