use std::{
  fs,
  path::{Path, PathBuf},
};

use cdoc_markdown::MarkdownOptions;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

fn default_document_dir() -> PathBuf {
  PathBuf::from(".claude").join("custom-document")
}

const fn default_search_depth() -> usize {
  5
}

fn default_lang() -> String {
  "ja".to_string()
}

/// Config file names looked up in the working directory, in order.
const LOCAL_CONFIG_FILES: [&str; 5] = [
  "cdoc.toml",
  "cdoc.json",
  ".cdoc.toml",
  ".cdoc.json",
  ".config/cdoc.toml",
];

/// Serialization format of a config file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
  Toml,
  Json,
}

impl ConfigFormat {
  /// Pick the format from a file extension.
  #[must_use]
  pub fn from_path(path: &Path) -> Option<Self> {
    let ext = path.extension()?.to_str()?.to_lowercase();
    match ext.as_str() {
      "toml" => Some(Self::Toml),
      "json" => Some(Self::Json),
      _ => None,
    }
  }
}

/// UI strings used in generated pages.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Labels {
  /// Heading above the table of contents.
  pub toc_title: String,

  /// Copy button text in code-block path headers.
  pub copy: String,

  /// Copy button text shown for two seconds after a successful copy.
  pub copied: String,

  /// Mobile menu button text.
  pub menu: String,
}

impl Default for Labels {
  fn default() -> Self {
    Self {
      toc_title: "目次".to_string(),
      copy:      "コピー".to_string(),
      copied:    "コピー完了!".to_string(),
      menu:      "☰ メニュー".to_string(),
    }
  }
}

/// Configuration options for cdoc
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
  /// Folder searched for by `cdoc select`, relative to the working directory
  /// or one of its ancestors.
  #[serde(default = "default_document_dir")]
  pub document_dir: PathBuf,

  /// Number of directories, starting with the working directory, that
  /// `cdoc select` checks for `document_dir`.
  #[serde(default = "default_search_depth")]
  pub search_depth: usize,

  /// Value of the `lang` attribute on generated pages.
  #[serde(default = "default_lang")]
  pub lang: String,

  /// Directory holding `page.html`, `page.css` and `page.js` overrides.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub template_dir: Option<PathBuf>,

  /// UI strings.
  #[serde(default)]
  pub labels: Labels,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      document_dir: default_document_dir(),
      search_depth: default_search_depth(),
      lang:         default_lang(),
      template_dir: None,
      labels:       Labels::default(),
    }
  }
}

impl Config {
  /// Load a configuration file. Only TOML and JSON are supported.
  ///
  /// # Errors
  ///
  /// Returns an error if the file cannot be read, has an unknown extension,
  /// or does not parse.
  pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
    let path = path.as_ref();
    let format = ConfigFormat::from_path(path)
      .ok_or_else(|| ConfigError::UnsupportedFormat(path.to_path_buf()))?;
    let content = fs::read_to_string(path)?;

    let config = match format {
      ConfigFormat::Toml => toml::from_str(&content)?,
      ConfigFormat::Json => serde_json::from_str(&content)?,
    };
    log::debug!("Loaded configuration from {}", path.display());
    Ok(config)
  }

  /// Load an explicit config file, a discovered one, or the defaults.
  ///
  /// # Errors
  ///
  /// Returns an error if the chosen file cannot be loaded.
  pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
    if let Some(path) = explicit {
      return Self::from_file(path);
    }

    match Self::find_config_file() {
      Some(path) => {
        log::info!("Using discovered config file: {}", path.display());
        Self::from_file(&path)
      },
      None => Ok(Self::default()),
    }
  }

  /// Search for a config file in the working directory, then in
  /// `$XDG_CONFIG_HOME`, then in `~/.config/cdoc`.
  #[must_use]
  pub fn find_config_file() -> Option<PathBuf> {
    if let Some(found) = std::env::current_dir()
      .ok()
      .and_then(|dir| Self::find_config_file_in(&dir))
    {
      return Some(found);
    }

    if let Ok(xdg_config_home) = std::env::var("XDG_CONFIG_HOME") {
      let config_path = PathBuf::from(xdg_config_home).join("cdoc.toml");
      if config_path.is_file() {
        return Some(config_path);
      }
    }

    if let Ok(home) = std::env::var("HOME") {
      let config_path = PathBuf::from(home)
        .join(".config")
        .join("cdoc")
        .join("config.toml");
      if config_path.is_file() {
        return Some(config_path);
      }
    }

    None
  }

  /// Search `dir` for one of the local config file names.
  #[must_use]
  pub fn find_config_file_in(dir: &Path) -> Option<PathBuf> {
    LOCAL_CONFIG_FILES
      .iter()
      .map(|name| dir.join(name))
      .find(|path| path.is_file())
  }

  /// Options for the markdown processor derived from the labels.
  #[must_use]
  pub fn markdown_options(&self) -> MarkdownOptions {
    MarkdownOptions {
      toc_title:  self.labels.toc_title.clone(),
      copy_label: self.labels.copy.clone(),
    }
  }

  /// Path of a template override, if a template directory is configured and
  /// contains `name`.
  #[must_use]
  pub fn template_file(&self, name: &str) -> Option<PathBuf> {
    self
      .template_dir
      .as_ref()
      .map(|dir| dir.join(name))
      .filter(|path| path.is_file())
  }

  /// Serialize the default configuration.
  ///
  /// # Errors
  ///
  /// Returns an error if serialization fails.
  pub fn default_config_string(
    format: ConfigFormat,
  ) -> Result<String, ConfigError> {
    let config = Self::default();
    let content = match format {
      ConfigFormat::Toml => toml::to_string_pretty(&config)?,
      ConfigFormat::Json => serde_json::to_string_pretty(&config)?,
    };
    Ok(content)
  }

  /// Write the default configuration to `path`.
  ///
  /// # Errors
  ///
  /// Returns an error if the file cannot be written.
  pub fn generate_default_config(
    format: ConfigFormat,
    path: &Path,
  ) -> Result<(), ConfigError> {
    let content = Self::default_config_string(format)?;
    fs::write(path, content).map_err(|e| {
      ConfigError::Config(format!(
        "Failed to write default config to {}: {e}",
        path.display()
      ))
    })?;

    log::info!("Created default configuration file: {}", path.display());
    Ok(())
  }

  /// Export the embedded templates to a directory for customization.
  ///
  /// Existing files are kept unless `force` is set.
  ///
  /// # Errors
  ///
  /// Returns an error if the directory cannot be created or a template
  /// cannot be written.
  pub fn export_templates(
    output_dir: &Path,
    force: bool,
  ) -> Result<Vec<PathBuf>, ConfigError> {
    fs::create_dir_all(output_dir).map_err(|e| {
      ConfigError::Config(format!(
        "Failed to create template directory: {}: {e}",
        output_dir.display()
      ))
    })?;

    let mut written = Vec::new();
    for (filename, content) in cdoc_templates::all_templates() {
      let file_path = output_dir.join(filename);

      if file_path.exists() && !force {
        log::warn!(
          "File {} already exists. Use --force to overwrite.",
          file_path.display()
        );
        continue;
      }

      fs::write(&file_path, content).map_err(|e| {
        ConfigError::Config(format!(
          "Failed to write template file: {}: {e}",
          file_path.display()
        ))
      })?;
      log::info!("Exported template: {}", file_path.display());
      written.push(file_path);
    }

    Ok(written)
  }
}
