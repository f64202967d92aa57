use std::{
  collections::HashMap,
  fs,
  path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::error::InkdownError;

// Default values live in functions rather than literals so all defaults flow
// through one mechanism, including the ones serde cannot express inline.
fn default_body_font() -> String {
  "Georgia, 'Times New Roman', serif".to_string()
}

fn default_heading_font() -> String {
  "'Helvetica Neue', Arial, sans-serif".to_string()
}

fn default_mono_font() -> String {
  "'Fira Code', Menlo, Consolas, monospace".to_string()
}

const fn default_font_size() -> u32 {
  16
}

const fn default_line_height() -> f32 {
  1.6
}

fn default_text_color() -> String {
  "#222222".to_string()
}

fn default_heading_color() -> String {
  "#111111".to_string()
}

const fn default_content_width() -> u32 {
  800
}

fn default_text_align() -> String {
  "left".to_string()
}

/// User-facing style settings for preview and print.
///
/// Every field has a default; partial settings files merge over the defaults
/// field-by-field through serde. Per-heading-level colors fall back to the
/// general heading color, then to the built-in default.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleSettings {
  /// Font stack for body text
  pub body_font: String,

  /// Font stack for headings
  pub heading_font: String,

  /// Font stack for code blocks and inline code
  pub mono_font: String,

  /// Base font size in pixels
  pub font_size: u32,

  /// Line height multiplier for body text
  pub line_height: f32,

  /// Body text color
  pub text_color: String,

  /// Color for all heading levels without a per-level override
  pub heading_color: String,

  /// Per-level heading color overrides
  pub h1_color: Option<String>,
  pub h2_color: Option<String>,
  pub h3_color: Option<String>,
  pub h4_color: Option<String>,
  pub h5_color: Option<String>,
  pub h6_color: Option<String>,

  /// Maximum content width in pixels
  pub content_width: u32,

  /// Text alignment: left, justify, center
  pub text_align: String,

  /// Free text for the printed page header slot
  pub header_text: String,

  /// Free text for the printed page footer slot
  pub footer_text: String,

  /// Per-callout-type color overrides, keyed by canonical type name
  pub callout_colors: HashMap<String, String>,
}

impl Default for StyleSettings {
  fn default() -> Self {
    Self {
      body_font:      default_body_font(),
      heading_font:   default_heading_font(),
      mono_font:      default_mono_font(),
      font_size:      default_font_size(),
      line_height:    default_line_height(),
      text_color:     default_text_color(),
      heading_color:  default_heading_color(),
      h1_color:       None,
      h2_color:       None,
      h3_color:       None,
      h4_color:       None,
      h5_color:       None,
      h6_color:       None,
      content_width:  default_content_width(),
      text_align:     default_text_align(),
      header_text:    String::new(),
      footer_text:    String::new(),
      callout_colors: HashMap::new(),
    }
  }
}

impl StyleSettings {
  /// Load style settings from a file.
  /// Only TOML and JSON are supported for the time being.
  ///
  /// # Errors
  ///
  /// Returns an error when the file cannot be read or parsed, or when its
  /// extension names an unsupported format.
  pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, InkdownError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)?;

    match path
      .extension()
      .and_then(|ext| ext.to_str())
      .map(str::to_lowercase)
      .as_deref()
    {
      Some("json") => Ok(serde_json::from_str(&content)?),
      Some("toml") => Ok(toml::from_str(&content)?),
      _ => {
        Err(InkdownError::Config(format!(
          "Unsupported settings file format: {}",
          path.display()
        )))
      },
    }
  }

  /// Load settings from an explicit path, a discovered `inkdown.toml`, or
  /// the defaults, in that order.
  ///
  /// # Errors
  ///
  /// Returns an error when an explicit or discovered file fails to parse.
  pub fn load(explicit: Option<&Path>) -> Result<Self, InkdownError> {
    if let Some(path) = explicit {
      return Self::from_file(path);
    }
    if let Some(discovered) = Self::find_settings_file() {
      log::info!("Using discovered settings file: {}", discovered.display());
      return Self::from_file(&discovered);
    }
    Ok(Self::default())
  }

  /// Look for a settings file in the current directory.
  #[must_use]
  pub fn find_settings_file() -> Option<PathBuf> {
    ["inkdown.toml", "inkdown.json"]
      .into_iter()
      .map(PathBuf::from)
      .find(|candidate| candidate.is_file())
  }

  /// Write a default settings file in the requested format.
  ///
  /// # Errors
  ///
  /// Returns an error when serialization or the write fails, or when the
  /// format is not `toml`/`json`.
  pub fn generate_default(
    format: &str,
    output: &Path,
  ) -> Result<(), InkdownError> {
    let settings = Self::default();
    let content = match format {
      "toml" => toml::to_string_pretty(&settings)?,
      "json" => serde_json::to_string_pretty(&settings)?,
      other => {
        return Err(InkdownError::Config(format!(
          "Unsupported settings format: {other}"
        )));
      },
    };
    fs::write(output, content)?;
    Ok(())
  }

  /// Per-level heading color with fallback to the general heading color.
  #[must_use]
  pub fn heading_color_for_level(&self, level: u8) -> &str {
    let level_override = match level {
      1 => &self.h1_color,
      2 => &self.h2_color,
      3 => &self.h3_color,
      4 => &self.h4_color,
      5 => &self.h5_color,
      _ => &self.h6_color,
    };

    level_override
      .as_deref()
      .filter(|color| !color.is_empty())
      .unwrap_or(&self.heading_color)
  }
}

#[cfg(test)]
mod tests {
  #![allow(clippy::unwrap_used, reason = "Fine in tests")]

  use super::*;

  #[test]
  fn partial_toml_merges_over_defaults() {
    let settings: StyleSettings =
      toml::from_str("font_size = 18\nheader_text = \"Draft\"").unwrap();

    assert_eq!(settings.font_size, 18);
    assert_eq!(settings.header_text, "Draft");
    assert_eq!(settings.content_width, default_content_width());
    assert_eq!(settings.heading_color, default_heading_color());
  }

  #[test]
  fn empty_record_is_all_defaults() {
    let settings: StyleSettings = serde_json::from_str("{}").unwrap();
    assert_eq!(settings.font_size, default_font_size());
    assert!(settings.callout_colors.is_empty());
  }

  #[test]
  fn heading_color_falls_back_per_level() {
    let settings = StyleSettings {
      h2_color: Some("#ff0000".to_string()),
      ..StyleSettings::default()
    };

    assert_eq!(settings.heading_color_for_level(2), "#ff0000");
    assert_eq!(settings.heading_color_for_level(3), settings.heading_color);
  }

  #[test]
  fn empty_level_override_is_ignored() {
    let settings = StyleSettings {
      h1_color: Some(String::new()),
      ..StyleSettings::default()
    };
    assert_eq!(settings.heading_color_for_level(1), settings.heading_color);
  }

  #[test]
  fn callout_color_overrides_deserialize() {
    let settings: StyleSettings =
      toml::from_str("[callout_colors]\nwarning = \"#123456\"").unwrap();
    assert_eq!(
      settings.callout_colors.get("warning").map(String::as_str),
      Some("#123456")
    );
  }
}
