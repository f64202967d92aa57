//! Style settings to CSS-variable resolution.
//!
//! Pure mapping from a [`StyleSettings`] record to named presentation
//! variables. Numeric sizes get their `px` suffix here; heading colors
//! resolve per level with fallback; header/footer text is escaped and quoted
//! for interpolation into a CSS `content:` value.

use crate::config::StyleSettings;

/// Escape a free-text value for embedding in a double-quoted CSS string.
fn css_quote(text: &str) -> String {
  let escaped = text.replace('\\', "\\\\").replace('"', "\\\"");
  format!("\"{escaped}\"")
}

/// Resolve settings into an ordered list of CSS variable assignments.
#[must_use]
pub fn resolve_style_vars(settings: &StyleSettings) -> Vec<(String, String)> {
  let mut vars = vec![
    ("--body-font".to_string(), settings.body_font.clone()),
    ("--heading-font".to_string(), settings.heading_font.clone()),
    ("--mono-font".to_string(), settings.mono_font.clone()),
    ("--font-size".to_string(), format!("{}px", settings.font_size)),
    ("--line-height".to_string(), settings.line_height.to_string()),
    ("--text-color".to_string(), settings.text_color.clone()),
    ("--heading-color".to_string(), settings.heading_color.clone()),
  ];

  for level in 1..=6u8 {
    vars.push((
      format!("--h{level}-color"),
      settings.heading_color_for_level(level).to_string(),
    ));
  }

  vars.push((
    "--content-width".to_string(),
    format!("{}px", settings.content_width),
  ));
  vars.push(("--text-align".to_string(), settings.text_align.clone()));
  vars.push(("--page-header".to_string(), css_quote(&settings.header_text)));
  vars.push(("--page-footer".to_string(), css_quote(&settings.footer_text)));

  vars
}

#[cfg(test)]
mod tests {
  use super::*;

  fn lookup<'a>(vars: &'a [(String, String)], name: &str) -> &'a str {
    vars
      .iter()
      .find(|(k, _)| k == name)
      .map_or("", |(_, v)| v.as_str())
  }

  #[test]
  fn numeric_sizes_get_px_suffix() {
    let vars = resolve_style_vars(&StyleSettings::default());
    assert_eq!(lookup(&vars, "--font-size"), "16px");
    assert_eq!(lookup(&vars, "--content-width"), "800px");
  }

  #[test]
  fn heading_levels_fall_back_to_general_color() {
    let settings = StyleSettings {
      h3_color: Some("#00ff00".to_string()),
      ..StyleSettings::default()
    };
    let vars = resolve_style_vars(&settings);

    assert_eq!(lookup(&vars, "--h3-color"), "#00ff00");
    assert_eq!(lookup(&vars, "--h1-color"), settings.heading_color);
  }

  #[test]
  fn header_footer_text_is_quoted_and_escaped() {
    let settings = StyleSettings {
      header_text: "Bob's \"Draft\"".to_string(),
      ..StyleSettings::default()
    };
    let vars = resolve_style_vars(&settings);

    assert_eq!(lookup(&vars, "--page-header"), "\"Bob's \\\"Draft\\\"\"");
    assert_eq!(lookup(&vars, "--page-footer"), "\"\"");
  }
}
