//! Error types for math and diagram rendering operations.

/// Result type for render capability operations.
pub type RenderResult<T> = Result<T, RenderError>;

/// Errors that can occur in a render capability.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
  #[error("Math rendering failed: {0}")]
  MathFailed(String),
  #[error("Diagram rendering failed: {0}")]
  DiagramFailed(String),
  #[error("No math rendering backend available")]
  NoMathBackend,
  #[error("No diagram rendering backend available")]
  NoDiagramBackend,
}
