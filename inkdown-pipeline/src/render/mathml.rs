//! MathML math backend.
//!
//! Converts raw TeX to MathML with latex2mathml. Runs entirely in-process
//! with no embedded JS engine, so it is safe to call from the worker thread.

use super::{
  error::{RenderError, RenderResult},
  types::{MathRenderer, MathStyle},
};

/// latex2mathml-based math renderer.
#[derive(Debug, Default)]
pub struct MathmlRenderer;

impl MathmlRenderer {
  /// Create a new MathML renderer.
  #[must_use]
  pub const fn new() -> Self {
    Self
  }
}

impl MathRenderer for MathmlRenderer {
  fn name(&self) -> &'static str {
    "MathML"
  }

  fn render(&self, tex: &str, style: MathStyle) -> RenderResult<String> {
    let display_style = match style {
      MathStyle::Inline => latex2mathml::DisplayStyle::Inline,
      MathStyle::Display => latex2mathml::DisplayStyle::Block,
    };

    latex2mathml::latex_to_mathml(tex, display_style)
      .map_err(|e| RenderError::MathFailed(e.to_string()))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn renders_inline_math() {
    let renderer = MathmlRenderer::new();
    let html = renderer
      .render("E=mc^2", MathStyle::Inline)
      .expect("Failed to render");
    assert!(html.contains("<math"));
    assert!(html.contains("</math>"));
  }

  #[test]
  fn renders_display_math() {
    let renderer = MathmlRenderer::new();
    let html = renderer
      .render(r"\sum_{i=0}^n i", MathStyle::Display)
      .expect("Failed to render");
    assert!(html.contains("display=\"block\""));
  }
}
