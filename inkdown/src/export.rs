//! Print document assembly and handoff.
//!
//! Builds a fully self-contained HTML document from processed content,
//! resolved style variables, and the embedded print stylesheet, then hands
//! the written artifact to the platform opener. The content is re-run
//! through the post-processor on a detached copy; the live preview's tree is
//! not assumed current or reusable. Already-processed content is detected by
//! its marker and never processed twice.

use std::{io::Write as _, path::PathBuf, thread, time::Duration};

use inkdown_pipeline::{RenderContext, postprocess, render};
use tera::Tera;

use crate::{config::StyleSettings, error::InkdownError, style};

const PRINT_TEMPLATE: &str = include_str!("../templates/print.html");

/// Delay between writing the artifact and invoking the opener. There is no
/// reliable cross-process "document loaded" signal, so a fixed settling
/// delay approximates one.
const PRINT_SETTLE_DELAY: Duration = Duration::from_millis(400);

/// Page orientation for the print layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
  #[default]
  Portrait,
  Landscape,
}

impl Orientation {
  /// CSS `@page size` value for this orientation.
  #[must_use]
  pub const fn page_size(self) -> &'static str {
    match self {
      Self::Portrait => "A4 portrait",
      Self::Landscape => "A4 landscape",
    }
  }

  /// Parse from the CLI value. Unrecognized values read as portrait.
  #[must_use]
  pub fn from_cli(value: &str) -> Self {
    if value.eq_ignore_ascii_case("landscape") {
      Self::Landscape
    } else {
      Self::Portrait
    }
  }
}

/// Build a render context carrying the user's callout color overrides.
#[must_use]
pub fn render_context(settings: &StyleSettings) -> RenderContext {
  RenderContext::new(render::create_default_manager())
    .with_callout_colors(settings.callout_colors.clone())
}

/// Assemble a self-contained printable document.
///
/// `html` must already be sanitized. The post-processor runs here unless the
/// content carries the processed marker.
///
/// # Errors
///
/// Returns an error when template rendering fails.
pub fn build_print_document(
  html: &str,
  settings: &StyleSettings,
  orientation: Orientation,
  title: &str,
  ctx: &RenderContext,
) -> Result<String, InkdownError> {
  let processed = postprocess::apply_to_html(html, ctx);

  let style_vars = style::resolve_style_vars(settings)
    .iter()
    .map(|(name, value)| format!("{name}: {value};"))
    .collect::<Vec<_>>()
    .join("\n      ");

  let mut tera = Tera::default();
  tera.add_raw_template("print", PRINT_TEMPLATE)?;

  let mut context = tera::Context::new();
  context.insert("title", title);
  context.insert("style_vars", &style_vars);
  context.insert("page_size", orientation.page_size());
  context.insert("content", &processed);

  Ok(tera.render("print", &context)?)
}

/// Write the print document to a temporary file and hand it to the platform
/// opener after the settling delay.
///
/// Returns the path of the written artifact.
///
/// # Errors
///
/// Returns an error when the file cannot be written or the opener refuses
/// the handoff. The caller surfaces this as a notification; the application
/// stays usable.
pub fn print_document(document: &str) -> Result<PathBuf, InkdownError> {
  let mut file = tempfile::Builder::new()
    .prefix("inkdown-print-")
    .suffix(".html")
    .tempfile()?;
  file.write_all(document.as_bytes())?;

  let (_, path) = file.keep()?;

  thread::sleep(PRINT_SETTLE_DELAY);
  open::that(&path)?;

  Ok(path)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn print_document_is_self_contained() {
    let settings = StyleSettings::default();
    let ctx = render_context(&settings);
    let doc = build_print_document(
      "<h1>Title</h1><p>Hello</p>",
      &settings,
      Orientation::Portrait,
      "Title",
      &ctx,
    )
    .expect("Failed to build print document");

    assert!(doc.starts_with("<!DOCTYPE html>"));
    assert!(doc.contains("<title>Title</title>"));
    assert!(doc.contains("size: A4 portrait;"));
    assert!(doc.contains("--font-size: 16px;"));
    assert!(doc.contains("<p>Hello</p>"));
  }

  #[test]
  fn orientation_controls_page_size() {
    let settings = StyleSettings::default();
    let ctx = render_context(&settings);
    let doc = build_print_document(
      "<p>x</p>",
      &settings,
      Orientation::Landscape,
      "x",
      &ctx,
    )
    .expect("Failed to build print document");
    assert!(doc.contains("size: A4 landscape;"));
  }

  #[test]
  fn processed_content_is_not_processed_twice() {
    let settings = StyleSettings::default();
    let ctx = render_context(&settings);
    let once = postprocess::apply_to_html(
      "<blockquote><p>[!note] Hi\nBody</p></blockquote>",
      &ctx,
    );
    let doc = build_print_document(
      &once,
      &settings,
      Orientation::Portrait,
      "t",
      &ctx,
    )
    .expect("Failed to build print document");

    assert_eq!(doc.matches("data-callout=").count(), 1);
  }

  #[test]
  fn page_break_contract_is_part_of_print_css() {
    let settings = StyleSettings::default();
    let ctx = render_context(&settings);
    let doc = build_print_document(
      "<div class=\"page-break\"></div>",
      &settings,
      Orientation::Portrait,
      "t",
      &ctx,
    )
    .expect("Failed to build print document");

    assert!(doc.contains(".page-break"));
    assert!(doc.contains(r#"<div class="page-break">"#));
  }
}
