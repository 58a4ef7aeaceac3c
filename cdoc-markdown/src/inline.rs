//! Inline formatting: code spans, links, bold and italic.
//!
//! Nothing here escapes HTML. Raw `<` and `>` in prose pass straight
//! through.
use std::sync::LazyLock;

use log::error;
use regex::{Captures, Regex};

use crate::utils::never_matching_regex;

static CODE_SPAN_RE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"`([^`]+)`").unwrap_or_else(|e| {
    error!("Failed to compile CODE_SPAN_RE regex: {e}");
    never_matching_regex()
  })
});

static LINK_RE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").unwrap_or_else(|e| {
    error!("Failed to compile LINK_RE regex: {e}");
    never_matching_regex()
  })
});

static BOLD_RE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"\*\*([^*]+)\*\*").unwrap_or_else(|e| {
    error!("Failed to compile BOLD_RE regex: {e}");
    never_matching_regex()
  })
});

static ITALIC_RE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"\*([^*]+)\*").unwrap_or_else(|e| {
    error!("Failed to compile ITALIC_RE regex: {e}");
    never_matching_regex()
  })
});

/// Delimits stash references. A private use character, so it cannot clash
/// with markdown syntax.
const STASH_MARK: char = '\u{E000}';

/// Generated HTML pulled out of a line while emphasis runs over the rest.
#[derive(Debug, Default)]
struct Stash {
  fragments: Vec<String>,
}

impl Stash {
  fn put(&mut self, html: String) -> String {
    self.fragments.push(html);
    format!("{STASH_MARK}{}{STASH_MARK}", self.fragments.len() - 1)
  }

  /// Put every fragment back. Later fragments may contain references to
  /// earlier ones (a link label holding a code span), so restore newest
  /// first.
  fn restore(&self, text: &str) -> String {
    let mut restored = text.to_string();
    for (index, fragment) in self.fragments.iter().enumerate().rev() {
      let marker = format!("{STASH_MARK}{index}{STASH_MARK}");
      restored = restored.replace(&marker, fragment);
    }
    restored
  }
}

/// Convert `` `code` `` spans to `<code>` elements.
#[must_use]
pub fn convert_inline_code(text: &str) -> String {
  CODE_SPAN_RE.replace_all(text, "<code>$1</code>").into_owned()
}

/// Convert `[label](url)` to anchors.
#[must_use]
pub fn convert_links(text: &str) -> String {
  LINK_RE
    .replace_all(text, r#"<a href="$2">$1</a>"#)
    .into_owned()
}

/// Convert `**bold**` and then `*italic*`.
#[must_use]
pub fn convert_emphasis(text: &str) -> String {
  let bold = BOLD_RE.replace_all(text, "<strong>$1</strong>");
  ITALIC_RE.replace_all(&bold, "<em>$1</em>").into_owned()
}

/// Apply the full inline ruleset used for paragraphs and list items.
///
/// Code spans are converted first, then links, then bold, then italic. The
/// HTML produced by the first two steps is shielded from emphasis, so
/// asterisks inside `` `**x**` `` or inside a link URL stay literal.
/// Text that already contains the stash marker is formatted unshielded.
#[must_use]
pub fn format_inline(text: &str) -> String {
  if text.contains(STASH_MARK) {
    return convert_emphasis(&format_code_and_links(text));
  }

  let mut stash = Stash::default();

  let with_code = CODE_SPAN_RE.replace_all(text, |caps: &Captures| {
    stash.put(format!("<code>{}</code>", &caps[1]))
  });
  let with_links = LINK_RE.replace_all(&with_code, |caps: &Captures| {
    stash.put(format!(r#"<a href="{}">{}</a>"#, &caps[2], &caps[1]))
  });

  stash.restore(&convert_emphasis(&with_links))
}

/// Apply the reduced ruleset used inside toggle sections: code spans and
/// links only, no emphasis.
#[must_use]
pub fn format_code_and_links(text: &str) -> String {
  convert_links(&convert_inline_code(text))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_marker_in_prose_is_not_restored() {
    let text = format!("{STASH_MARK}0{STASH_MARK} and `a`");
    assert_eq!(
      format_inline(&text),
      format!("{STASH_MARK}0{STASH_MARK} and <code>a</code>")
    );
  }

  #[test]
  fn test_inline_code() {
    assert_eq!(
      format_inline("run `cargo build` now"),
      "run <code>cargo build</code> now"
    );
  }

  #[test]
  fn test_links() {
    assert_eq!(
      format_inline("see [the docs](https://example.com/a_b)"),
      r#"see <a href="https://example.com/a_b">the docs</a>"#
    );
  }

  #[test]
  fn test_bold_and_italic() {
    assert_eq!(
      format_inline("**bold** and *italic*"),
      "<strong>bold</strong> and <em>italic</em>"
    );
  }

  #[test]
  fn test_code_span_shields_asterisks() {
    assert_eq!(
      format_inline("`**not bold**`"),
      "<code>**not bold**</code>"
    );
    assert_eq!(format_inline("`*a*` and *b*"), "<code>*a*</code> and <em>b</em>");
  }

  #[test]
  fn test_link_url_shields_asterisks() {
    assert_eq!(
      format_inline("[glob](https://x.dev/*/y/*) is *neat*"),
      r#"<a href="https://x.dev/*/y/*">glob</a> is <em>neat</em>"#
    );
  }

  #[test]
  fn test_code_inside_link_label() {
    assert_eq!(
      format_inline("[`main.rs`](src/main.rs)"),
      r#"<a href="src/main.rs"><code>main.rs</code></a>"#
    );
  }

  #[test]
  fn test_unmatched_markers_are_literal() {
    assert_eq!(format_inline("2 * 3 = 6, `tick"), "2 * 3 = 6, `tick");
    assert_eq!(format_inline("[broken](link"), "[broken](link");
  }

  #[test]
  fn test_no_escaping() {
    assert_eq!(format_inline("a <b>tag</b> & c"), "a <b>tag</b> & c");
  }

  #[test]
  fn test_code_and_links_skips_emphasis() {
    assert_eq!(
      format_code_and_links("**keep** `x` [y](z)"),
      r#"**keep** <code>x</code> <a href="z">y</a>"#
    );
  }
}
