//! Fenced code blocks with optional file-path headers.
//!
//! Runs before any other transformation. Each fenced block is rendered to a
//! self-contained HTML fragment and replaced in the source by a one-line
//! placeholder, so the line-driven block parser never looks inside it. The
//! fragments are spliced back into the finished body.
use std::{fmt::Write, sync::LazyLock};

use log::{debug, error};
use regex::{Captures, Regex};

use crate::{
  types::CodeBlock,
  utils::{escape_code, never_matching_regex},
};

/// Three backticks, an optional language tag, a newline, then anything up to
/// the next three backticks.
static CODE_FENCE_RE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"(?s)```(\w+)?\n(.*?)```").unwrap_or_else(|e| {
    error!("Failed to compile CODE_FENCE_RE regex: {e}");
    never_matching_regex()
  })
});

/// A relative path ending in a dot-extension, e.g. `src/lib.rs`.
static FILE_PATH_RE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"^[\w\-./\\]+\.\w+$").unwrap_or_else(|e| {
    error!("Failed to compile FILE_PATH_RE regex: {e}");
    never_matching_regex()
  })
});

static PLACEHOLDER_RE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"<!-- cdoc:code-block:([0-9]+) -->").unwrap_or_else(|e| {
    error!("Failed to compile PLACEHOLDER_RE regex: {e}");
    never_matching_regex()
  })
});

const PLACEHOLDER_PREFIX: &str = "<!-- cdoc:code-block:";

/// Source text with code blocks swapped out, plus the rendered blocks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransformedCode {
  /// Markdown with one placeholder per code block.
  pub text:      String,
  /// Rendered code-block HTML, indexed by placeholder number.
  pub fragments: Vec<String>,
}

/// Whether a line is a code-block placeholder left by
/// [`transform_code_blocks`].
#[must_use]
pub fn is_placeholder(line: &str) -> bool {
  line.starts_with(PLACEHOLDER_PREFIX)
}

/// Detect a file path on the first line of a code block.
///
/// The line must contain a slash or backslash, must not start with `#` and,
/// once trimmed, must look like a path with a dot-extension.
#[must_use]
pub fn detect_file_path(first_line: &str) -> Option<&str> {
  let candidate = first_line.trim();
  let has_separator = first_line.contains('/') || first_line.contains('\\');
  if !has_separator || candidate.starts_with('#') {
    return None;
  }
  FILE_PATH_RE.is_match(candidate).then_some(candidate)
}

fn parse_match(caps: &Captures) -> CodeBlock {
  let language = caps.get(1).map(|m| m.as_str().to_string());
  let content = caps.get(2).map_or("", |m| m.as_str());

  let (first_line, rest) = content.split_once('\n').unwrap_or((content, ""));
  match detect_file_path(first_line) {
    Some(path) => {
      CodeBlock {
        path: Some(path.to_string()),
        language,
        code: rest.to_string(),
      }
    },
    None => {
      CodeBlock {
        path: None,
        language,
        code: content.to_string(),
      }
    },
  }
}

/// Find every fenced code block in the source, in order.
#[must_use]
pub fn find_code_blocks(markdown: &str) -> Vec<CodeBlock> {
  CODE_FENCE_RE
    .captures_iter(markdown)
    .map(|caps| parse_match(&caps))
    .collect()
}

/// Render one code block.
///
/// The code is entity-escaped; the path is not, since the path pattern only
/// admits word characters, dots, hyphens and separators. A missing language
/// renders as `language-`.
#[must_use]
pub fn render_code_block(block: &CodeBlock, copy_label: &str) -> String {
  let mut html = String::from("<div class=\"code-block\">\n");

  if let Some(path) = &block.path {
    let _ = write!(
      html,
      "  <div class=\"file-path\">\n    <span>{path}</span>\n    <button \
       class=\"copy-button\" data-path=\"{path}\">{copy_label}</button>\n  \
       </div>\n"
    );
  }

  let language = block.language.as_deref().unwrap_or_default();
  let _ = write!(
    html,
    "  <pre><code class=\"language-{language}\">{}</code></pre>\n</div>",
    escape_code(&block.code)
  );
  html
}

/// Replace every fenced code block with a placeholder line and render it.
#[must_use]
pub fn transform_code_blocks(
  markdown: &str,
  copy_label: &str,
) -> TransformedCode {
  let mut fragments = Vec::new();
  let text = CODE_FENCE_RE
    .replace_all(markdown, |caps: &Captures| {
      let block = parse_match(caps);
      debug!(
        "Code block #{} (language: {:?}, path: {:?})",
        fragments.len(),
        block.language,
        block.path
      );
      fragments.push(render_code_block(&block, copy_label));
      format!("{PLACEHOLDER_PREFIX}{} -->", fragments.len() - 1)
    })
    .into_owned();

  TransformedCode { text, fragments }
}

/// Put rendered code blocks back in place of their placeholders.
///
/// Unknown placeholder numbers are left untouched.
#[must_use]
pub fn splice_code_blocks(html: &str, fragments: &[String]) -> String {
  if fragments.is_empty() {
    return html.to_string();
  }
  PLACEHOLDER_RE
    .replace_all(html, |caps: &Captures| {
      caps[1]
        .parse::<usize>()
        .ok()
        .and_then(|index| fragments.get(index))
        .map_or_else(|| caps[0].to_string(), Clone::clone)
    })
    .into_owned()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_detect_file_path() {
    assert_eq!(detect_file_path("src/main.rs"), Some("src/main.rs"));
    assert_eq!(detect_file_path("  config\\app.toml "), Some("config\\app.toml"));
    assert_eq!(detect_file_path("./scripts/run-all.sh"), Some("./scripts/run-all.sh"));
  }

  #[test]
  fn test_detect_file_path_rejects() {
    // no separator
    assert_eq!(detect_file_path("main.rs"), None);
    // comment line
    assert_eq!(detect_file_path("# src/main.rs"), None);
    // no extension
    assert_eq!(detect_file_path("src/bin/tool"), None);
    // extension containing a slash
    assert_eq!(detect_file_path("a.b/c"), None);
    // code, not a path
    assert_eq!(detect_file_path("let x = a / b.len();"), None);
  }

  #[test]
  fn test_find_code_blocks_with_path() {
    let blocks =
      find_code_blocks("```rust\nsrc/lib.rs\npub fn f() {}\n```\n");
    assert_eq!(blocks, vec![CodeBlock {
      path:     Some("src/lib.rs".to_string()),
      language: Some("rust".to_string()),
      code:     "pub fn f() {}\n".to_string(),
    }]);
  }

  #[test]
  fn test_find_code_blocks_without_language() {
    let blocks = find_code_blocks("```\necho hi\n```");
    assert_eq!(blocks[0].language, None);
    assert_eq!(blocks[0].path, None);
    assert_eq!(blocks[0].code, "echo hi\n");
  }

  #[test]
  fn test_render_with_path_header() {
    let block = CodeBlock {
      path:     Some("src/app.ts".to_string()),
      language: Some("ts".to_string()),
      code:     "const a = 1;\n".to_string(),
    };
    assert_eq!(
      render_code_block(&block, "Copy"),
      "<div class=\"code-block\">\n  <div class=\"file-path\">\n    \
       <span>src/app.ts</span>\n    <button class=\"copy-button\" \
       data-path=\"src/app.ts\">Copy</button>\n  </div>\n  <pre><code \
       class=\"language-ts\">const a = 1;\n</code></pre>\n</div>"
    );
  }

  #[test]
  fn test_render_without_language_keeps_empty_class() {
    let block = CodeBlock {
      code: "x".to_string(),
      ..Default::default()
    };
    let html = render_code_block(&block, "Copy");
    assert!(html.contains("<code class=\"language-\">x</code>"));
    assert!(!html.contains("file-path"));
  }

  #[test]
  fn test_render_escapes_code() {
    let block = CodeBlock {
      code: "if a < b && c > d { \"q\" }".to_string(),
      ..Default::default()
    };
    let html = render_code_block(&block, "Copy");
    assert!(html.contains("if a &lt; b &amp;&amp; c &gt; d { &quot;q&quot; }"));
  }

  #[test]
  fn test_transform_and_splice() {
    let md = "before\n```sh\necho 1\n```\nafter\n";
    let transformed = transform_code_blocks(md, "Copy");
    assert_eq!(
      transformed.text,
      "before\n<!-- cdoc:code-block:0 -->\nafter\n"
    );
    assert_eq!(transformed.fragments.len(), 1);

    let spliced = splice_code_blocks(&transformed.text, &transformed.fragments);
    assert!(spliced.contains("<code class=\"language-sh\">echo 1\n</code>"));
    assert!(!spliced.contains("cdoc:code-block"));
  }

  #[test]
  fn test_unclosed_fence_is_left_alone() {
    let md = "```rust\nfn main() {}\n";
    let transformed = transform_code_blocks(md, "Copy");
    assert_eq!(transformed.text, md);
    assert!(transformed.fragments.is_empty());
  }

  #[test]
  fn test_placeholder_detection() {
    assert!(is_placeholder("<!-- cdoc:code-block:3 -->"));
    assert!(!is_placeholder("<div>"));
  }
}
