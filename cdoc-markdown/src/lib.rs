//! # cdoc-markdown
//!
//! Converts a small markdown dialect into HTML fragments for a single-page
//! document: a table of contents and a body with collapsible toggle
//! sections and code blocks that carry a copyable file path.
//!
//! ## Quick Start
//!
//! ```rust
//! use cdoc_markdown::{DocumentProcessor, MarkdownOptions};
//!
//! let processor = DocumentProcessor::new(MarkdownOptions::default());
//! let doc = processor.render("# Hello World\n\nThis is **bold** text.");
//!
//! assert_eq!(doc.title.as_deref(), Some("Hello World"));
//! assert!(doc.body_html.contains("<strong>bold</strong>"));
//! assert!(doc.toc_html.contains("href=\"#hello-world\""));
//! ```
//!
//! ## Dialect
//!
//! - `#`, `##`, `###` headings; deeper levels are plain text
//! - `-` and `*` list items, one level only
//! - `**bold**`, `*italic*`, `` `code` `` and `[label](url)`
//! - fenced code blocks; a first line such as `src/main.rs` becomes a path
//!   header with a copy button
//! - headings named in [`ToggleSections`] become collapsed panels
//!
//! Parsing never fails. Anything unrecognised is rendered as a paragraph.
//! Only code-block content is HTML-escaped.

pub mod codeblock;
pub mod headings;
pub mod inline;
pub mod parser;
pub mod processor;
pub mod toc;
pub mod toggle;
mod types;
pub mod utils;

pub use crate::{
  parser::{BlockParser, ParserState},
  processor::{DocumentProcessor, MarkdownOptions},
  toggle::ToggleSections,
  types::{CodeBlock, Heading, RenderedDocument},
};
