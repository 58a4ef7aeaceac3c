//! Headings that open a collapsed toggle section instead of a heading.

/// Trigger heading text and the panel title shown in its place.
const DEFAULT_SECTIONS: [(&str, &str); 5] = [
  ("技術的な背景・解説", "技術的な背景と詳細な解説"),
  ("技術的な判断・設計決定", "設計判断の詳細"),
  ("セキュリティ観点", "セキュリティの詳細情報"),
  ("注意点・制約", "注意事項と制約"),
  ("関連知識・参考資料", "参考資料とリンク"),
];

/// Immutable lookup table from heading text to toggle panel title.
///
/// Matching is exact against the trimmed heading text. Built once per
/// processor and shared by reference with every parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToggleSections {
  entries: Vec<(&'static str, &'static str)>,
}

impl ToggleSections {
  /// Panel title for a heading, if the heading opens a toggle section.
  #[must_use]
  pub fn title_for(&self, heading_text: &str) -> Option<&'static str> {
    let heading_text = heading_text.trim();
    self
      .entries
      .iter()
      .find(|(trigger, _)| *trigger == heading_text)
      .map(|(_, title)| *title)
  }
}

impl Default for ToggleSections {
  fn default() -> Self {
    Self {
      entries: DEFAULT_SECTIONS.to_vec(),
    }
  }
}
