//! Heading extraction for the table of contents.
//!
//! Runs over the raw document independently of body rendering. Every level
//! 1-3 heading is kept, including those that the block parser later turns
//! into a collapsed toggle section, so the TOC still links to them by their
//! original text.
use std::sync::LazyLock;

use log::{error, trace};
use regex::Regex;

use crate::{
  types::Heading,
  utils::{never_matching_regex, slugify},
};

/// One to three `#`, at least one whitespace character, then the text.
static HEADING_RE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"^(#{1,3})\s+(.+)$").unwrap_or_else(|e| {
    error!("Failed to compile HEADING_RE regex: {e}");
    never_matching_regex()
  })
});

/// Parse a single line as a heading.
///
/// Returns the level and the trimmed heading text. Lines with four or more
/// `#` are not headings.
#[must_use]
pub fn parse_heading_line(line: &str) -> Option<(u8, &str)> {
  let caps = HEADING_RE.captures(line)?;
  let hashes = caps.get(1)?.as_str();
  let text = caps.get(2)?.as_str().trim();
  let level = u8::try_from(hashes.len()).ok()?;
  Some((level, text))
}

/// Build a [`Heading`] from a level and its text.
#[must_use]
pub fn heading(level: u8, text: &str) -> Heading {
  Heading {
    level,
    id: slugify(text),
    text: text.to_string(),
  }
}

/// Extract every heading of level 1-3 in document order.
///
/// Every matching line counts, including `#` lines inside code blocks.
/// Duplicate texts yield duplicate ids.
#[must_use]
pub fn extract_headings(markdown: &str) -> Vec<Heading> {
  let headings: Vec<Heading> = markdown
    .split('\n')
    .filter_map(parse_heading_line)
    .map(|(level, text)| heading(level, text))
    .collect();

  trace!("Extracted {} headings", headings.len());
  headings
}

/// Title of a document: the text of its first level-1 heading.
#[must_use]
pub fn find_title(headings: &[Heading]) -> Option<String> {
  headings
    .iter()
    .find(|h| h.level == 1)
    .map(|h| h.text.clone())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_parse_heading_line_levels() {
    assert_eq!(parse_heading_line("# One"), Some((1, "One")));
    assert_eq!(parse_heading_line("## Two  "), Some((2, "Two")));
    assert_eq!(parse_heading_line("###   Three"), Some((3, "Three")));
  }

  #[test]
  fn test_parse_heading_line_rejects() {
    assert_eq!(parse_heading_line("#### Four"), None);
    assert_eq!(parse_heading_line("#NoSpace"), None);
    assert_eq!(parse_heading_line(" # Indented"), None);
    assert_eq!(parse_heading_line("#"), None);
    assert_eq!(parse_heading_line("plain text"), None);
  }

  #[test]
  fn test_extract_headings_order_and_ids() {
    let md = "# Title\n\nText\n\n## First Part\n### Detail A\n#### Hidden\n";
    let headings = extract_headings(md);
    assert_eq!(headings, vec![
      heading(1, "Title"),
      heading(2, "First Part"),
      heading(3, "Detail A"),
    ]);
    assert_eq!(headings[1].id, "first-part");
  }

  #[test]
  fn test_extract_headings_keeps_duplicates() {
    let headings = extract_headings("## Notes\n\n## Notes\n");
    assert_eq!(headings.len(), 2);
    assert_eq!(headings[0].id, headings[1].id);
  }

  #[test]
  fn test_extract_headings_includes_code_comments() {
    let md = "# Setup\n\n```bash\n# install deps\nmake\n```\n\n## Run\n";
    let texts: Vec<_> = extract_headings(md).into_iter().map(|h| h.text).collect();
    assert_eq!(texts, vec!["Setup", "install deps", "Run"]);
  }

  #[test]
  fn test_extract_headings_after_inline_fence() {
    let md = "# Doc\n\nRun this: ```\nmake\n```\n\n## Usage\n\n## More\n";
    let ids: Vec<_> = extract_headings(md).into_iter().map(|h| h.id).collect();
    assert_eq!(ids, vec!["doc", "usage", "more"]);
  }

  #[test]
  fn test_title_from_code_comment() {
    let headings = extract_headings("```bash\n# install deps\nmake\n```\n");
    assert_eq!(headings, vec![heading(1, "install deps")]);
    assert_eq!(find_title(&headings).as_deref(), Some("install deps"));
  }

  #[test]
  fn test_find_title() {
    let headings = extract_headings("## Intro\n# Real Title\n# Second\n");
    assert_eq!(find_title(&headings).as_deref(), Some("Real Title"));
    assert_eq!(find_title(&extract_headings("## Only h2\n")), None);
  }
}
