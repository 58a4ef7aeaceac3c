use std::path::PathBuf;

use cdoc_config::ConfigFormat;
use clap::{Parser, Subcommand, ValueEnum};

/// Command line interface for cdoc
#[derive(Parser, Debug)]
#[command(
  author,
  version,
  about = "Convert markdown notes into single-page HTML documents"
)]
pub struct Cli {
  /// Subcommand to execute (see [`Commands`])
  #[command(subcommand)]
  pub command: Commands,

  /// Enable verbose debug logging
  #[arg(short, long, global = true)]
  pub verbose: bool,

  /// Path to a configuration file (TOML or JSON). Without it, cdoc.toml,
  /// .cdoc.toml and friends are looked up in the working directory.
  #[arg(short = 'c', long = "config-file", global = true)]
  pub config_file: Option<PathBuf>,
}

/// All supported subcommands for the cdoc CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
  /// Convert a markdown file, or every markdown file in a directory, to
  /// HTML.
  Convert {
    /// Markdown file or directory of markdown files.
    input: PathBuf,

    /// Output file. For a directory input, the output directory. Defaults
    /// to the input path with an .html extension.
    output: Option<PathBuf>,
  },

  /// Pick a document folder and print its name.
  Select {
    /// Only offer documents whose name contains this keyword.
    keyword: Option<String>,
  },

  /// Write a configuration file with the default settings.
  Init {
    /// Path to create the configuration file at
    #[arg(short, long, default_value = "cdoc.toml")]
    output: PathBuf,

    /// Format of the configuration file.
    #[arg(short = 'F', long, value_enum, default_value_t = FormatArg::Toml)]
    format: FormatArg,

    /// Force overwrite if file already exists
    #[arg(short, long)]
    force: bool,
  },

  /// Export the built-in page template, stylesheet and script.
  Export {
    /// Output directory for template files.
    #[arg(short, long, default_value = "templates")]
    output_dir: PathBuf,

    /// Whether to overwrite existing files.
    #[arg(long)]
    force: bool,
  },
}

/// Config file format accepted by `cdoc init`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
  Toml,
  Json,
}

impl From<FormatArg> for ConfigFormat {
  fn from(format: FormatArg) -> Self {
    match format {
      FormatArg::Toml => Self::Toml,
      FormatArg::Json => Self::Json,
    }
  }
}

impl Cli {
  /// Parse command line arguments into a [`Cli`] struct.
  #[must_use]
  pub fn parse_args() -> Self {
    Self::parse()
  }
}
