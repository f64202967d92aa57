//! Core types and traits for the math/diagram render capabilities.

use super::error::{RenderError, RenderResult};

/// Whether a math expression renders inline or as a display block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MathStyle {
  Inline,
  Display,
}

/// Trait for math rendering backends.
///
/// Implementations take raw TeX (uninterpreted, exactly as authored) and
/// return HTML markup. Malformed TeX should yield best-effort output or an
/// error; it must never panic, because math errors are routine while a user
/// is still typing an expression.
pub trait MathRenderer: Send + Sync {
  /// Get the name of this math backend
  fn name(&self) -> &'static str;

  /// Render raw TeX to HTML markup.
  ///
  /// # Errors
  ///
  /// Returns an error when the expression cannot be rendered at all.
  fn render(&self, tex: &str, style: MathStyle) -> RenderResult<String>;
}

/// Trait for diagram rendering backends.
///
/// Implementations take diagram description text and a caller-supplied unique
/// identifier, and return a vector graphic (SVG markup). The identifier must
/// be used for any internal ids the graphic emits, so repeated render calls
/// never collide in one document.
pub trait DiagramRenderer: Send + Sync {
  /// Get the name of this diagram backend
  fn name(&self) -> &'static str;

  /// Render diagram source to SVG markup.
  ///
  /// # Errors
  ///
  /// Returns an error when the diagram source is invalid.
  fn render(&self, source: &str, id: &str) -> RenderResult<String>;
}

/// Holds the injected render backends for one session.
///
/// Constructed once, threaded through the post-processor entry point; no
/// ambient singletons.
#[derive(Default)]
pub struct RenderManager {
  math:    Option<Box<dyn MathRenderer>>,
  diagram: Option<Box<dyn DiagramRenderer>>,
}

impl RenderManager {
  /// Create an empty manager with no backends.
  #[must_use]
  pub fn new() -> Self {
    Self::default()
  }

  /// Attach a math backend.
  #[must_use]
  pub fn with_math(mut self, math: Box<dyn MathRenderer>) -> Self {
    self.math = Some(math);
    self
  }

  /// Attach a diagram backend.
  #[must_use]
  pub fn with_diagram(mut self, diagram: Box<dyn DiagramRenderer>) -> Self {
    self.diagram = Some(diagram);
    self
  }

  /// Whether a math backend is configured.
  #[must_use]
  pub const fn has_math(&self) -> bool {
    self.math.is_some()
  }

  /// Whether a diagram backend is configured.
  #[must_use]
  pub const fn has_diagram(&self) -> bool {
    self.diagram.is_some()
  }

  /// Render raw TeX through the configured math backend.
  ///
  /// # Errors
  ///
  /// Returns [`RenderError::NoMathBackend`] when no backend is configured,
  /// or the backend's own error.
  pub fn render_math(
    &self,
    tex: &str,
    style: MathStyle,
  ) -> RenderResult<String> {
    self
      .math
      .as_ref()
      .ok_or(RenderError::NoMathBackend)?
      .render(tex, style)
  }

  /// Render diagram source through the configured diagram backend.
  ///
  /// # Errors
  ///
  /// Returns [`RenderError::NoDiagramBackend`] when no backend is configured,
  /// or the backend's own error.
  pub fn render_diagram(
    &self,
    source: &str,
    id: &str,
  ) -> RenderResult<String> {
    self
      .diagram
      .as_ref()
      .ok_or(RenderError::NoDiagramBackend)?
      .render(source, id)
  }
}
