//! Interactive selection of a document folder.
//!
//! Documents are the immediate subdirectories of the configured document
//! directory (`.claude/custom-document` by default), which is searched for
//! from the working directory upwards.
use std::{
  env,
  io::{self, BufRead, Write},
  path::{Path, PathBuf},
};

use cdoc_config::Config;
use log::debug;
use walkdir::WalkDir;

use crate::error::{CdocError, Result};

/// Look for `relative` in `start` and its parents, checking at most `depth`
/// directories in total.
#[must_use]
pub fn find_document_dir(
  start: &Path,
  relative: &Path,
  depth: usize,
) -> Option<PathBuf> {
  start
    .ancestors()
    .take(depth)
    .map(|dir| dir.join(relative))
    .inspect(|candidate| debug!("Checking {}", candidate.display()))
    .find(|candidate| candidate.is_dir())
}

/// Names of the subdirectories of `base`, sorted by name.
///
/// With a keyword, only names containing it (ignoring case) are kept. Plain
/// files such as an index page are never listed.
///
/// # Errors
///
/// Returns an error if `base` cannot be read.
pub fn list_documents(base: &Path, keyword: Option<&str>) -> Result<Vec<String>> {
  let mut docs = Vec::new();

  for entry in WalkDir::new(base)
    .min_depth(1)
    .max_depth(1)
    .sort_by_file_name()
  {
    let entry = entry?;
    if !entry.path().is_dir() {
      continue;
    }
    let name = entry.file_name().to_string_lossy().into_owned();
    if keyword.is_none_or(|k| matches_keyword(&name, k)) {
      docs.push(name);
    }
  }

  Ok(docs)
}

fn matches_keyword(name: &str, keyword: &str) -> bool {
  name.to_lowercase().contains(&keyword.to_lowercase())
}

/// Let the user pick one of `docs`.
///
/// A single document is picked without asking. Otherwise a numbered menu is
/// written to `prompt` and a line is read from `input`: a number picks that
/// entry, anything else narrows the list to names containing it and the menu
/// is shown again.
///
/// # Errors
///
/// Returns [`CdocError::NoMatch`] when no document is left,
/// [`CdocError::InvalidSelection`] for an out of range number and
/// [`CdocError::SelectionAborted`] when `input` ends.
pub fn select_document<R: BufRead, W: Write>(
  mut docs: Vec<String>,
  input: &mut R,
  prompt: &mut W,
) -> Result<String> {
  let mut filter = String::new();

  loop {
    match docs.len() {
      0 => return Err(CdocError::NoMatch(filter)),
      1 => {
        let doc = docs.remove(0);
        writeln!(prompt, "✓ Selected {doc}")?;
        return Ok(doc);
      },
      _ => {},
    }

    writeln!(prompt, "\nFound the following documents:")?;
    for (i, doc) in docs.iter().enumerate() {
      writeln!(prompt, "{}. {doc}", i + 1)?;
    }
    write!(prompt, "\nEnter a number, or a keyword to narrow the list: ")?;
    prompt.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
      writeln!(prompt, "\nAborted")?;
      return Err(CdocError::SelectionAborted);
    }
    let choice = line.trim();

    if !choice.is_empty() && choice.chars().all(|c| c.is_ascii_digit()) {
      return choice
        .parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .filter(|&idx| idx < docs.len())
        .map(|idx| docs.swap_remove(idx))
        .ok_or_else(|| CdocError::InvalidSelection(choice.to_string()));
    }

    docs.retain(|doc| matches_keyword(doc, choice));
    choice.clone_into(&mut filter);
  }
}

/// List the documents under `base` and let the user pick one.
///
/// If nothing matches `keyword`, a notice is written and every document is
/// offered instead.
///
/// # Errors
///
/// Returns [`CdocError::NoDocuments`] if `base` has no documents at all, or
/// any error from [`select_document`].
pub fn select_in<R: BufRead, W: Write>(
  base: &Path,
  keyword: Option<&str>,
  input: &mut R,
  prompt: &mut W,
) -> Result<String> {
  let mut docs = list_documents(base, keyword)?;

  if docs.is_empty() {
    if let Some(keyword) = keyword {
      writeln!(prompt, "No documents matching '{keyword}'.")?;
      writeln!(prompt, "Showing all documents...")?;
      docs = list_documents(base, None)?;
    }
    if docs.is_empty() {
      return Err(CdocError::NoDocuments(base.to_path_buf()));
    }
  }

  select_document(docs, input, prompt)
}

/// Run `cdoc select`: find the document directory from the working
/// directory, prompt on stderr and print the chosen name to stdout.
///
/// # Errors
///
/// Returns [`CdocError::DocumentDirNotFound`] if no document directory is
/// found, or any error from [`select_in`].
#[allow(clippy::print_stdout, reason = "The selected name is the output")]
pub fn run(config: &Config, keyword: Option<&str>) -> Result<()> {
  let cwd = env::current_dir()?;
  let base =
    find_document_dir(&cwd, &config.document_dir, config.search_depth)
      .ok_or_else(|| CdocError::DocumentDirNotFound(config.document_dir.clone()))?;
  debug!("Using document directory {}", base.display());

  let stdin = io::stdin();
  let stderr = io::stderr();
  let selected = select_in(&base, keyword, &mut stdin.lock(), &mut stderr.lock())?;

  println!("{selected}");
  Ok(())
}
