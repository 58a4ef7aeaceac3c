//! Line-driven block parser.
//!
//! Consumes the code-transformed document one line at a time and emits HTML
//! blocks. The only state carried between lines is [`ParserState`]: either
//! nothing is open, a `<ul>` is open, or a toggle section is collecting its
//! body. Every open block is closed before a heading and at end of input.
use std::sync::LazyLock;

use log::{error, trace};
use regex::Regex;

use crate::{
  codeblock::is_placeholder,
  headings::parse_heading_line,
  inline::{format_code_and_links, format_inline},
  toggle::ToggleSections,
  utils::{never_matching_regex, slugify},
};

/// `-` or `*`, whitespace, then the item text.
static LIST_ITEM_RE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"^[-*]\s+(.+)$").unwrap_or_else(|e| {
    error!("Failed to compile LIST_ITEM_RE regex: {e}");
    never_matching_regex()
  })
});

/// List marker inside a toggle body. The item text may be empty here.
static TOGGLE_LIST_MARKER_RE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"^[-*]\s+").unwrap_or_else(|e| {
    error!("Failed to compile TOGGLE_LIST_MARKER_RE regex: {e}");
    never_matching_regex()
  })
});

/// What the parser has open at the current line.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ParserState<'a> {
  /// Nothing open.
  #[default]
  Normal,
  /// A `<ul>` has been emitted and not yet closed.
  InList,
  /// A toggle section is open; its body is emitted when it closes.
  InToggle {
    /// Panel title shown in the toggle header.
    title: &'static str,
    /// Raw body lines, blank ones included.
    body:  Vec<&'a str>,
  },
}

/// Block parser over a fixed set of toggle sections.
#[derive(Debug, Clone, Copy)]
pub struct BlockParser<'s> {
  sections: &'s ToggleSections,
}

impl<'s> BlockParser<'s> {
  #[must_use]
  pub const fn new(sections: &'s ToggleSections) -> Self {
    Self { sections }
  }

  /// Parse a document into body HTML.
  ///
  /// Never fails: anything that is not a heading, list item or HTML line
  /// becomes a paragraph.
  #[must_use]
  pub fn parse(&self, text: &str) -> String {
    let mut out: Vec<String> = Vec::new();
    let mut state = ParserState::Normal;

    for line in text.split('\n') {
      if let Some((level, heading_text)) = parse_heading_line(line) {
        close_open_block(&mut state, &mut out);

        if let Some(title) = self.sections.title_for(heading_text) {
          trace!("Opening toggle section {title:?} for {heading_text:?}");
          state = ParserState::InToggle {
            title,
            body: Vec::new(),
          };
        } else {
          out.push(format!(
            "<h{level} id=\"{}\">{heading_text}</h{level}>",
            slugify(heading_text)
          ));
        }
        continue;
      }

      if let ParserState::InToggle { body, .. } = &mut state {
        body.push(line);
        continue;
      }

      if let Some(item) = LIST_ITEM_RE.captures(line).and_then(|c| c.get(1)) {
        if state != ParserState::InList {
          out.push("<ul>".to_string());
          state = ParserState::InList;
        }
        out.push(format!("  <li>{}</li>", format_inline(item.as_str())));
        continue;
      }

      if line.trim().is_empty() {
        if state == ParserState::InList {
          close_open_block(&mut state, &mut out);
        }
        continue;
      }

      // An open list stays open until a blank line or heading.
      if line.starts_with('<') {
        out.push(line.to_string());
      } else {
        out.push(format!("<p>{}</p>", format_inline(line)));
      }
    }

    close_open_block(&mut state, &mut out);
    out.join("\n")
  }
}

/// Close whatever `state` has open, emitting its closing HTML.
fn close_open_block(state: &mut ParserState<'_>, out: &mut Vec<String>) {
  match std::mem::take(state) {
    ParserState::Normal => {},
    ParserState::InList => out.push("</ul>".to_string()),
    ParserState::InToggle { title, body } => {
      out.push(render_toggle_section(title, &body));
    },
  }
}

/// Render the body of a toggle section.
///
/// Blank lines are dropped, list lines are grouped into one `<ul>` and other
/// lines become paragraphs with code spans and links converted. Bold and
/// italic are deliberately not applied here. Code-block placeholders pass
/// through untouched.
#[must_use]
pub fn render_toggle_body(lines: &[&str]) -> String {
  let mut out: Vec<String> = Vec::new();
  let mut in_list = false;

  for line in lines.iter().filter(|line| !line.trim().is_empty()) {
    if let Some(marker) = TOGGLE_LIST_MARKER_RE.find(line) {
      if !in_list {
        out.push("<ul>".to_string());
        in_list = true;
      }
      let item = &line[marker.end()..];
      out.push(format!("  <li>{}</li>", format_code_and_links(item)));
      continue;
    }

    if in_list {
      out.push("</ul>".to_string());
      in_list = false;
    }

    if is_placeholder(line) {
      out.push((*line).to_string());
    } else {
      out.push(format!("<p>{}</p>", format_code_and_links(line)));
    }
  }

  if in_list {
    out.push("</ul>".to_string());
  }
  out.join("\n")
}

/// Render a complete collapsible toggle section.
#[must_use]
pub fn render_toggle_section(title: &str, body: &[&str]) -> String {
  format!(
    "<div class=\"toggle-section\">\n  <div class=\"toggle-header\">\n    \
     <div class=\"toggle-title\">{title}</div>\n    <div \
     class=\"toggle-icon\">▼</div>\n  </div>\n  <div \
     class=\"toggle-content\">\n    <div class=\"toggle-inner\">\n{}\n    \
     </div>\n  </div>\n</div>",
    render_toggle_body(body)
  )
}

#[cfg(test)]
mod tests {
  #![allow(clippy::expect_used, reason = "Fine in tests")]

  use super::*;

  fn parse(text: &str) -> String {
    let sections = ToggleSections::default();
    BlockParser::new(&sections).parse(text)
  }

  #[test]
  fn test_headings_get_ids() {
    assert_eq!(
      parse("# Hello World\n## Next Step"),
      "<h1 id=\"hello-world\">Hello World</h1>\n<h2 id=\"next-step\">Next \
       Step</h2>"
    );
  }

  #[test]
  fn test_heading_text_is_not_formatted() {
    assert_eq!(parse("## **Bold** title"), "<h2 id=\"bold-title\">**Bold** title</h2>");
  }

  #[test]
  fn test_list_grouping() {
    assert_eq!(
      parse("- one\n- two\n* three"),
      "<ul>\n  <li>one</li>\n  <li>two</li>\n  <li>three</li>\n</ul>"
    );
  }

  #[test]
  fn test_blank_line_ends_list() {
    assert_eq!(
      parse("- a\n\n- b"),
      "<ul>\n  <li>a</li>\n</ul>\n<ul>\n  <li>b</li>\n</ul>"
    );
  }

  #[test]
  fn test_paragraph_keeps_list_open() {
    assert_eq!(
      parse("- a\n- b\ntext\n- c\n"),
      "<ul>\n  <li>a</li>\n  <li>b</li>\n<p>text</p>\n  <li>c</li>\n</ul>"
    );
  }

  #[test]
  fn test_html_line_keeps_list_open() {
    assert_eq!(
      parse("- a\n<hr>\n\nafter"),
      "<ul>\n  <li>a</li>\n<hr>\n</ul>\n<p>after</p>"
    );
  }

  #[test]
  fn test_heading_closes_list() {
    assert_eq!(
      parse("- a\n## B"),
      "<ul>\n  <li>a</li>\n</ul>\n<h2 id=\"b\">B</h2>"
    );
  }

  #[test]
  fn test_list_items_are_formatted() {
    assert_eq!(
      parse("- **x** and `y`"),
      "<ul>\n  <li><strong>x</strong> and <code>y</code></li>\n</ul>"
    );
  }

  #[test]
  fn test_html_lines_pass_through() {
    assert_eq!(parse("<div class=\"x\">"), "<div class=\"x\">");
  }

  #[test]
  fn test_bold_line_is_not_a_list() {
    assert_eq!(parse("**Note** here"), "<p><strong>Note</strong> here</p>");
  }

  #[test]
  fn test_deep_heading_is_paragraph() {
    assert_eq!(parse("#### Too deep"), "<p>#### Too deep</p>");
  }

  #[test]
  fn test_toggle_heading_is_suppressed() {
    let html = parse("## 注意点・制約\n\n- limit one\n- limit two\n");
    assert!(!html.contains("<h2"));
    assert!(html.contains("<div class=\"toggle-title\">注意事項と制約</div>"));
    assert!(html.contains("<ul>\n  <li>limit one</li>\n  <li>limit two</li>\n</ul>"));
  }

  #[test]
  fn test_toggle_closed_by_next_heading() {
    let html = parse("## セキュリティ観点\nsecret\n## Next\nvisible");
    let toggle_end = html.find("</div>\n</div>").expect("toggle should close");
    let next = html.find("<h2 id=\"next\">Next</h2>").expect("heading emitted");
    assert!(toggle_end < next);
    assert!(html.ends_with("<p>visible</p>"));
  }

  #[test]
  fn test_toggle_body_skips_emphasis() {
    let html = parse("### 関連知識・参考資料\n**kept** and [link](u) with `c`");
    assert!(html.contains(
      "<p>**kept** and <a href=\"u\">link</a> with <code>c</code></p>"
    ));
  }

  #[test]
  fn test_toggle_body_drops_blank_lines_and_groups_list() {
    assert_eq!(
      render_toggle_body(&["", "- a", "", "- b", "text", "", "* c"]),
      "<ul>\n  <li>a</li>\n  <li>b</li>\n</ul>\n<p>text</p>\n<ul>\n  \
       <li>c</li>\n</ul>"
    );
  }

  #[test]
  fn test_toggle_body_keeps_code_placeholders() {
    assert_eq!(
      render_toggle_body(&["<!-- cdoc:code-block:0 -->"]),
      "<!-- cdoc:code-block:0 -->"
    );
  }

  #[test]
  fn test_toggle_section_markup() {
    assert_eq!(
      render_toggle_section("T", &["body"]),
      "<div class=\"toggle-section\">\n  <div class=\"toggle-header\">\n    \
       <div class=\"toggle-title\">T</div>\n    <div \
       class=\"toggle-icon\">▼</div>\n  </div>\n  <div \
       class=\"toggle-content\">\n    <div class=\"toggle-inner\">\n<p>body</p>\n    \
       </div>\n  </div>\n</div>"
    );
  }

  #[test]
  fn test_toggle_at_end_of_input_is_flushed() {
    let html = parse("# T\n## 技術的な判断・設計決定\nreason");
    assert!(html.starts_with("<h1 id=\"t\">T</h1>\n<div class=\"toggle-section\">"));
    assert!(html.contains("<div class=\"toggle-title\">設計判断の詳細</div>"));
    assert!(html.contains("<p>reason</p>"));
  }

  #[test]
  fn test_malformed_input_degrades_to_text() {
    assert_eq!(
      parse("[unclosed link\n**half bold\n`tick"),
      "<p>[unclosed link</p>\n<p>**half bold</p>\n<p>`tick</p>"
    );
  }
}
