//! cdoc turns markdown notes into standalone HTML pages with a table of
//! contents, copyable file paths on code blocks and collapsible sections.
pub mod cli;
pub mod convert;
pub mod error;
pub mod html;
pub mod select;

pub use error::{CdocError, Result};
