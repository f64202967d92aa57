//! Top-level error recovery for the parser chain.
//!
//! Whatever happens inside the chain, callers always get renderable HTML
//! back: a stage failure is caught here and surfaced as a visibly-marked
//! error fragment instead of an Err or a propagated panic.

use log::error;

use super::types::MarkdownProcessor;
use crate::{types::RenderResult, utils};

/// Render markdown content with error recovery.
///
/// Attempts to run the full parser chain; if any stage panics, the result is
/// a styled error fragment naming the failure, so the caller always receives
/// renderable HTML.
#[must_use]
pub fn render_recovering(
  processor: &MarkdownProcessor,
  content: &str,
) -> RenderResult {
  match std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
    processor.render(content)
  })) {
    Ok(result) => result,
    Err(panic_err) => {
      let message = panic_err
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| panic_err.downcast_ref::<&str>().copied())
        .unwrap_or("unknown error");
      error!("Panic during markdown processing: {message}");

      RenderResult {
        html:    format!(
          "<div class=\"render-error\">Failed to render document: {}</div>",
          utils::html_escape(message)
        ),
        headers: Vec::new(),
        title:   None,
      }
    },
  }
}

/// Safely process markup content with error recovery.
///
/// Wraps a string-to-string transformation that may panic on malformed
/// input, and ensures partial or fallback content is returned rather than
/// complete failure.
pub fn process_safe<F>(content: &str, processor_fn: F, fallback: &str) -> String
where
  F: FnOnce(&str) -> String,
{
  // Avoid processing empty strings
  if content.is_empty() {
    return String::new();
  }

  let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
    processor_fn(content)
  }));

  match result {
    Ok(processed_text) => processed_text,
    Err(e) => {
      if let Some(error_msg) = e.downcast_ref::<String>() {
        error!("Error processing markup: {error_msg}");
      } else if let Some(error_msg) = e.downcast_ref::<&str>() {
        error!("Error processing markup: {error_msg}");
      } else {
        error!("Unknown error occurred while processing markup");
      }

      // Return the fallback (or original) text rather than breaking the
      // entire document
      if fallback.is_empty() {
        content.to_string()
      } else {
        fallback.to_string()
      }
    },
  }
}
