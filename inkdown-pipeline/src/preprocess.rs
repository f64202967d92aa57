//! Inline-highlight preprocessing.
//!
//! Rewrites the lightweight `==text==` highlight syntax into `<mark>` tags
//! before the structural parser runs. Matching is non-greedy and restricted
//! to a single line; the pass has no awareness of code-fence boundaries, so a
//! `==pair==` inside a fenced block is rewritten too. That is a deliberate,
//! known limitation of the syntax, not something this pass tries to fix.

use std::sync::LazyLock;

use regex::Regex;

use crate::utils;

static MARK_RE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"==(.+?)==").unwrap_or_else(|e| {
    log::error!("Failed to compile MARK_RE regex: {e}");
    utils::never_matching_regex()
  })
});

/// Replace every matched pair of `==` delimiters with a `<mark>` element
/// wrapping the enclosed text.
///
/// Input containing no `==` pairs is returned unchanged. Empty input yields
/// empty output. There are no error conditions.
#[must_use]
pub fn highlight_marks(text: &str) -> String {
  MARK_RE.replace_all(text, "<mark>$1</mark>").to_string()
}
