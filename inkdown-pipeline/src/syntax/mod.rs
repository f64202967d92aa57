//! Trait-based syntax highlighting for fenced code blocks.
//!
//! The pipeline treats highlighting as a pluggable capability so the backend
//! can be swapped without touching the parser chain. The only backend shipped
//! is syntect (Sublime Text syntax definitions, extended by two-face).
//! Diagram and math pseudo-languages never reach a highlighter; the parser
//! chain treats those blocks as opaque text.

pub mod error;
pub mod types;

pub use error::{SyntaxError, SyntaxResult};
pub use types::{SyntaxConfig, SyntaxHighlighter, SyntaxManager};

#[cfg(feature = "syntect")] mod syntect;
#[cfg(feature = "syntect")] pub use syntect::*;

/// Create the default syntax manager based on available features.
///
/// # Errors
///
/// Returns an error if no highlighting backend feature is enabled.
pub fn create_default_manager() -> SyntaxResult<SyntaxManager> {
  #[cfg(feature = "syntect")]
  {
    create_syntect_manager()
  }

  #[cfg(not(feature = "syntect"))]
  {
    Err(SyntaxError::NoBackendAvailable)
  }
}
