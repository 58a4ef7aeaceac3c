use std::fs;

use cdoc_config::Config;
use cdoc_templates::{
  PAGE_CSS,
  PAGE_CSS_NAME,
  PAGE_JS,
  PAGE_JS_NAME,
  PAGE_TEMPLATE,
  PAGE_TEMPLATE_NAME,
};
use log::debug;
use tera::Tera;

use crate::error::{CdocError, Result};

/// Render a complete HTML page.
///
/// `title` is inserted as-is into `<title>`; `toc` and `content` are
/// pre-rendered HTML fragments.
///
/// # Errors
///
/// Returns an error if a template override cannot be read or the page
/// template fails to render.
pub fn render_page(
  config: &Config,
  title: &str,
  toc: &str,
  content: &str,
) -> Result<String> {
  let template = get_template_content(config, PAGE_TEMPLATE_NAME, PAGE_TEMPLATE)?;
  let style = get_template_content(config, PAGE_CSS_NAME, PAGE_CSS)?;
  let script = get_template_content(config, PAGE_JS_NAME, PAGE_JS)?;

  let mut tera = Tera::default();
  tera.add_raw_template("page", &template)?;

  let mut tera_context = tera::Context::new();
  tera_context.insert("title", title);
  tera_context.insert("toc", toc);
  tera_context.insert("content", content);
  tera_context.insert("lang", &config.lang);
  tera_context.insert("style", &style);
  tera_context.insert("script", &script);
  tera_context.insert("menu_label", &config.labels.menu);
  tera_context.insert(
    "copied_label_json",
    &serde_json::to_string(&config.labels.copied)?,
  );

  Ok(tera.render("page", &tera_context)?)
}

/// Read a template override from the configured template directory, or fall
/// back to the embedded copy.
fn get_template_content(
  config: &Config,
  template_name: &str,
  fallback: &str,
) -> Result<String> {
  let Some(template_path) = config.template_file(template_name) else {
    return Ok(fallback.to_string());
  };

  debug!("Using custom template: {}", template_path.display());
  fs::read_to_string(&template_path).map_err(|e| {
    CdocError::Template(format!(
      "Failed to read custom template file {}: {e}",
      template_path.display()
    ))
  })
}

#[cfg(test)]
mod tests {
  #![allow(clippy::expect_used, reason = "Fine in tests")]

  use std::fs;

  use tempfile::tempdir;

  use super::*;

  #[test]
  fn test_render_page_fills_all_slots() {
    let config = Config::default();
    let html = render_page(
      &config,
      "My Doc",
      "<ul class=\"toc-list\"></ul>",
      "<h1 id=\"my-doc\">My Doc</h1>",
    )
    .expect("page should render");

    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("<html lang=\"ja\">"));
    assert!(html.contains("<title>My Doc</title>"));
    assert!(html.contains("<ul class=\"toc-list\"></ul>"));
    assert!(html.contains("<h1 id=\"my-doc\">My Doc</h1>"));
    assert!(html.contains("☰ メニュー"));
    assert!(html.contains("const CDOC_COPIED_LABEL = \"コピー完了!\";"));
    assert!(html.contains(".toggle-section"));
    assert!(html.contains("navigator.clipboard"));
  }

  #[test]
  fn test_copied_label_is_json_quoted() {
    let mut config = Config::default();
    config.labels.copied = "say \"done\"".to_string();
    let html = render_page(&config, "t", "", "").expect("page should render");
    assert!(html.contains(r#"const CDOC_COPIED_LABEL = "say \"done\"";"#));
  }

  #[test]
  fn test_template_override_with_fallback() {
    let dir = tempdir().expect("Failed to create temp dir");
    fs::write(
      dir.path().join("page.html"),
      "<title>{{ title }}</title><style>{{ style | safe }}</style>{{ content \
       | safe }}",
    )
    .expect("Failed to write template");

    let config = Config {
      template_dir: Some(dir.path().to_path_buf()),
      ..Config::default()
    };
    let html =
      render_page(&config, "Custom", "", "<p>x</p>").expect("page should render");

    assert!(html.starts_with("<title>Custom</title><style>"));
    // page.css was not overridden, so the embedded stylesheet is used
    assert!(html.contains(".toggle-section"));
    assert!(html.ends_with("<p>x</p>"));
  }

  #[test]
  fn test_broken_template_is_an_error() {
    let dir = tempdir().expect("Failed to create temp dir");
    fs::write(dir.path().join("page.html"), "{% if %}")
      .expect("Failed to write template");
    let config = Config {
      template_dir: Some(dir.path().to_path_buf()),
      ..Config::default()
    };
    let result = render_page(&config, "t", "", "");
    assert!(matches!(result, Err(CdocError::Template(_))));
  }
}
