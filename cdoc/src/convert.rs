//! Markdown file and directory conversion.
use std::{
  fs,
  io::{self, Write},
  path::{Path, PathBuf},
};

use cdoc_config::Config;
use cdoc_markdown::DocumentProcessor;
use log::{debug, error, info};
use walkdir::WalkDir;

use crate::{
  error::{CdocError, Result},
  html::template,
};

/// Collect the markdown files directly inside `input_dir`, sorted by name.
///
/// Subdirectories are not descended into.
///
/// # Errors
///
/// Returns an error if the directory cannot be read.
pub fn collect_markdown_files(input_dir: &Path) -> Result<Vec<PathBuf>> {
  let mut files = Vec::new();

  for entry in WalkDir::new(input_dir)
    .min_depth(1)
    .max_depth(1)
    .sort_by_file_name()
  {
    let entry = entry?;
    let path = entry.path();
    if path.is_file() && is_markdown(path) {
      files.push(path.to_owned());
    }
  }

  debug!("Found {} markdown files in {}", files.len(), input_dir.display());
  Ok(files)
}

fn is_markdown(path: &Path) -> bool {
  path.extension().is_some_and(|ext| ext == "md")
}

/// Output path used when none is given: the source with an `.html`
/// extension.
#[must_use]
pub fn default_output_path(source: &Path) -> PathBuf {
  source.with_extension("html")
}

/// Page title: the first level 1 heading, otherwise the file stem.
fn resolve_title(title: Option<String>, source: &Path) -> String {
  title.unwrap_or_else(|| {
    source
      .file_stem()
      .map(|stem| stem.to_string_lossy().into_owned())
      .unwrap_or_default()
  })
}

/// Convert a single markdown file to a standalone HTML page.
///
/// Writes to `output`, or next to the source when `output` is `None`, and
/// returns the written path.
///
/// # Errors
///
/// Returns an error if the source cannot be read, the page cannot be
/// rendered, or the output cannot be written.
pub fn convert_file(
  processor: &DocumentProcessor,
  config: &Config,
  source: &Path,
  output: Option<&Path>,
) -> Result<PathBuf> {
  let markdown = fs::read_to_string(source)?;
  let document = processor.render(&markdown);
  let title = resolve_title(document.title, source);

  let page =
    template::render_page(config, &title, &document.toc_html, &document.body_html)?;

  let output_path =
    output.map_or_else(|| default_output_path(source), Path::to_path_buf);
  fs::write(&output_path, page)?;

  info!("Wrote {}", output_path.display());
  Ok(output_path)
}

/// Convert `input`, a markdown file or a directory of markdown files,
/// printing progress to stdout.
///
/// # Errors
///
/// See [`run_with_progress`].
pub fn run(config: &Config, input: &Path, output: Option<&Path>) -> Result<()> {
  let stdout = io::stdout();
  let mut progress = stdout.lock();
  run_with_progress(config, input, output, &mut progress)
}

/// Convert `input`, writing progress lines to `progress`.
///
/// For a directory, `output` names the output directory, which is created if
/// missing. A file that fails to convert is reported and the remaining files
/// are still converted.
///
/// # Errors
///
/// Returns [`CdocError::InputNotFound`] if `input` does not exist,
/// [`CdocError::UnsupportedInputType`] for a file without an `.md`
/// extension, [`CdocError::EmptyDirectory`] for a directory without
/// markdown files and [`CdocError::BatchFailed`] if any file in a directory
/// failed.
pub fn run_with_progress<W: Write>(
  config: &Config,
  input: &Path,
  output: Option<&Path>,
  progress: &mut W,
) -> Result<()> {
  if !input.exists() {
    return Err(CdocError::InputNotFound(input.to_path_buf()));
  }

  let processor = DocumentProcessor::new(config.markdown_options());

  if input.is_dir() {
    convert_directory(&processor, config, input, output, progress)?;
  } else {
    if !is_markdown(input) {
      return Err(CdocError::UnsupportedInputType(input.to_path_buf()));
    }
    write!(progress, "Converting {}... ", display_name(input))?;
    let written = convert_file(&processor, config, input, output)?;
    writeln!(progress, "✓ {}", display_name(&written))?;
  }

  writeln!(progress, "\n✨ Conversion complete!")?;
  Ok(())
}

fn convert_directory<W: Write>(
  processor: &DocumentProcessor,
  config: &Config,
  input: &Path,
  output_dir: Option<&Path>,
  progress: &mut W,
) -> Result<()> {
  let files = collect_markdown_files(input)?;
  if files.is_empty() {
    return Err(CdocError::EmptyDirectory(input.to_path_buf()));
  }

  if let Some(dir) = output_dir {
    fs::create_dir_all(dir)?;
  }

  writeln!(progress, "Found {} markdown file(s)", files.len())?;

  let mut failed = 0;
  for file in &files {
    write!(progress, "Converting {}... ", display_name(file))?;

    let target = output_dir.map(|dir| {
      let name = default_output_path(file);
      dir.join(name.file_name().unwrap_or(name.as_os_str()))
    });

    match convert_file(processor, config, file, target.as_deref()) {
      Ok(written) => writeln!(progress, "✓ {}", display_name(&written))?,
      Err(e) => {
        failed += 1;
        writeln!(progress, "✗ {e}")?;
        error!("Failed to convert {}: {e}", file.display());
      },
    }
  }

  if failed > 0 {
    return Err(CdocError::BatchFailed {
      failed,
      total: files.len(),
    });
  }
  Ok(())
}

fn display_name(path: &Path) -> String {
  match path.file_name() {
    Some(name) => name.to_string_lossy().into_owned(),
    None => path.display().to_string(),
  }
}
