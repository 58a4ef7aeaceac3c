//! The conversion pipeline, end to end.
use log::debug;

use crate::{
  codeblock::{splice_code_blocks, transform_code_blocks},
  headings::{extract_headings, find_title},
  parser::BlockParser,
  toc::render_toc,
  toggle::ToggleSections,
  types::RenderedDocument,
};

/// Labels written into generated fragments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkdownOptions {
  /// Heading shown above the table of contents.
  pub toc_title: String,

  /// Text of the copy button in code-block path headers.
  pub copy_label: String,
}

impl Default for MarkdownOptions {
  fn default() -> Self {
    Self {
      toc_title:  "目次".to_string(),
      copy_label: "コピー".to_string(),
    }
  }
}

/// Converts documents to a TOC and body HTML.
///
/// Holds the toggle section table, built once and lent to every parse.
#[derive(Debug, Clone, Default)]
pub struct DocumentProcessor {
  options:  MarkdownOptions,
  sections: ToggleSections,
}

impl DocumentProcessor {
  /// Create a processor with the default toggle sections.
  #[must_use]
  pub fn new(options: MarkdownOptions) -> Self {
    Self {
      options,
      sections: ToggleSections::default(),
    }
  }

  /// Render a markdown document.
  ///
  /// Headings and the TOC come from the raw text. The body comes from the
  /// text after code blocks have been swapped for placeholders, which are
  /// filled back in once block parsing is done.
  #[must_use]
  pub fn render(&self, markdown: &str) -> RenderedDocument {
    let headings = extract_headings(markdown);
    let title = find_title(&headings);
    let toc_html = render_toc(&headings, &self.options.toc_title);

    let code = transform_code_blocks(markdown, &self.options.copy_label);
    debug!(
      "Rendering body: {} headings, {} code blocks",
      headings.len(),
      code.fragments.len()
    );
    let body = BlockParser::new(&self.sections).parse(&code.text);
    let body_html = splice_code_blocks(&body, &code.fragments);

    RenderedDocument {
      title,
      headings,
      toc_html,
      body_html,
    }
  }
}
