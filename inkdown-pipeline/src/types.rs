//! Types for the inkdown-pipeline public API.
use serde::{Deserialize, Serialize};

/// Represents a header in a Markdown document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Header {
  /// Header text (inline content, no markdown formatting).
  pub text:  String,
  /// Header level (1-6).
  pub level: u8,
  /// Generated anchor ID for the header.
  pub id:    String,
}

/// Result of one pass through the structural parser chain.
///
/// The HTML in here is *not* sanitized; callers feed it through
/// [`crate::sanitize::sanitize_html`] before attaching it to anything.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RenderResult {
  /// Rendered HTML output.
  pub html: String,

  /// Extracted headers (for outline/navigation).
  pub headers: Vec<Header>,

  /// Title of the document, if found (first H1).
  pub title: Option<String>,
}
