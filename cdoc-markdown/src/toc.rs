//! Table of contents rendering.
use std::fmt::Write;

use crate::types::Heading;

/// Render headings as a flat TOC list.
///
/// Nesting is expressed only through the `level-N` class; link text is the
/// heading text, unescaped.
#[must_use]
pub fn render_toc(headings: &[Heading], toc_title: &str) -> String {
  let mut html = format!(
    "<div class=\"toc-title\">{toc_title}</div>\n<ul class=\"toc-list\">\n"
  );

  for Heading { level, id, text } in headings {
    let _ = writeln!(
      html,
      "  <li class=\"toc-item level-{level}\"><a href=\"#{id}\" \
       class=\"toc-link\">{text}</a></li>"
    );
  }

  html.push_str("</ul>");
  html
}
