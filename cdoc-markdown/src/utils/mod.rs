
use std::sync::LazyLock;

use log::error;
use regex::Regex;

/// Characters dropped from heading text before it becomes an anchor id.
static SLUG_STRIP_RE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"[^\w\s-]").unwrap_or_else(|e| {
    error!("Failed to compile SLUG_STRIP_RE regex: {e}");
    never_matching_regex()
  })
});

static SPACE_RUN_RE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r" +").unwrap_or_else(|e| {
    error!("Failed to compile SPACE_RUN_RE regex: {e}");
    never_matching_regex()
  })
});

/// Slugify heading text for use as an anchor id.
///
/// Removes every character that is not a word character, whitespace or a
/// hyphen, trims the result, collapses each run of spaces into a single
/// hyphen and lowercases. Word characters are Unicode-aware, so CJK text is
/// kept as-is.
///
/// Identical input always produces the identical id, and the function is
/// idempotent on its own output.
#[must_use]
pub fn slugify(text: &str) -> String {
  let stripped = SLUG_STRIP_RE.replace_all(text, "");
  SPACE_RUN_RE
    .replace_all(stripped.trim(), "-")
    .to_lowercase()
}

/// Escape `&`, `<`, `>`, `"` and `'` for inclusion in HTML.
///
/// Only code-block content goes through this; everything else in the
/// pipeline is inserted verbatim.
#[must_use]
pub fn escape_code(text: &str) -> String {
  html_escape::encode_quoted_attribute(text).into_owned()
}

/// Create a regex that never matches anything.
///
/// Used as a fallback when one of the static patterns fails to compile, so
/// that the pipeline degrades to plain text instead of panicking.
///
/// # Panics
///
/// Panics if the fallback pattern `r"^\b$"` fails to compile, which cannot
/// happen.
#[must_use]
#[allow(clippy::unwrap_used, reason = "Both patterns are known to be valid")]
pub fn never_matching_regex() -> Regex {
  Regex::new(r"[^\s\S]").unwrap_or_else(|_| Regex::new(r"^\b$").unwrap())
}
