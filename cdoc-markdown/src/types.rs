//! Types shared by the conversion pipeline and its callers.
use serde::{Deserialize, Serialize};

/// A level 1-3 heading found in a document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Heading {
  /// Heading level (1-3).
  pub level: u8,
  /// Anchor id derived from the text with [`crate::utils::slugify`].
  pub id:    String,
  /// Trimmed heading text, exactly as written.
  pub text:  String,
}

/// Result of rendering one markdown document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RenderedDocument {
  /// Text of the first level-1 heading, if any.
  pub title: Option<String>,

  /// Every heading in document order, including toggle triggers.
  pub headings: Vec<Heading>,

  /// Rendered table of contents.
  pub toc_html: String,

  /// Rendered document body.
  pub body_html: String,
}

/// A fenced code block as it appeared in the source.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CodeBlock {
  /// File path taken from the first line of the block, if it looked like one.
  pub path:     Option<String>,
  /// Language tag from the opening fence.
  pub language: Option<String>,
  /// Code with the path line removed.
  pub code:     String,
}
