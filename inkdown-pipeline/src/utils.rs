//! Small shared helpers for the pipeline crate.

/// Slugify a string for use as an anchor ID.
/// Converts to lowercase, replaces non-alphanumeric characters with dashes,
/// and trims leading/trailing dashes.
#[must_use]
pub fn slugify(text: &str) -> String {
  text
    .to_lowercase()
    .replace(|c: char| !c.is_alphanumeric() && c != '-' && c != '_', "-")
    .trim_matches('-')
    .to_string()
}

/// Capitalize the first letter of a string.
#[must_use]
pub fn capitalize_first(s: &str) -> String {
  let mut chars = s.chars();
  chars.next().map_or_else(String::new, |c| {
    c.to_uppercase().collect::<String>() + chars.as_str()
  })
}

/// Escape text for safe interpolation into an HTML context.
#[must_use]
pub fn html_escape(text: &str) -> String {
  ::html_escape::encode_safe(text).into_owned()
}

/// Create a regex that never matches anything.
///
/// This is used as a fallback pattern when a regex fails to compile.
/// It will never match any input, which is safer than using a trivial regex
/// like `^$` which would match empty strings.
///
/// # Panics
///
/// Panics if the fallback regex pattern `r"^\b$"` fails to compile, which
/// should never happen.
#[must_use]
pub fn never_matching_regex() -> regex::Regex {
  // Use a pattern that will never match anything because it asserts something
  // impossible - this pattern is guaranteed to be valid
  regex::Regex::new(r"[^\s\S]").unwrap_or_else(|_| {
    // As an ultimate fallback, use an empty pattern that matches nothing
    #[allow(clippy::unwrap_used, reason = "This pattern is guaranteed valid")]
    regex::Regex::new(r"^\b$").unwrap()
  })
}
