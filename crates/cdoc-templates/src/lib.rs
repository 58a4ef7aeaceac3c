use std::collections::BTreeMap;

pub const PAGE_TEMPLATE: &str = include_str!("../templates/page.html");
pub const PAGE_CSS: &str = include_str!("../templates/page.css");
pub const PAGE_JS: &str = include_str!("../templates/page.js");

/// File names used when templates are exported or overridden.
pub const PAGE_TEMPLATE_NAME: &str = "page.html";
pub const PAGE_CSS_NAME: &str = "page.css";
pub const PAGE_JS_NAME: &str = "page.js";

#[must_use]
pub fn all_templates() -> BTreeMap<&'static str, &'static str> {
  let mut templates = BTreeMap::new();
  templates.insert(PAGE_TEMPLATE_NAME, PAGE_TEMPLATE);
  templates.insert(PAGE_CSS_NAME, PAGE_CSS);
  templates.insert(PAGE_JS_NAME, PAGE_JS);
  templates
}
