//! HTML sanitization with protected-block extraction.
//!
//! Parser output is untrusted: the structural parser passes raw embedded HTML
//! through on purpose, so everything is funneled through ammonia's
//! deny-by-default cleaner here. The allow-list below is additive only and
//! must be kept in sync with every tag and attribute the parser or the
//! post-processor chain can introduce.
//!
//! Fenced diagram and math blocks bypass the cleaner entirely. Sanitizer
//! tag-balancing heuristics misread diagram arrow tokens (`A-->B` looks like
//! the tail of an HTML comment), so those blocks are lifted out verbatim
//! before cleaning and restored byte-for-byte afterwards.

use std::sync::LazyLock;

use ammonia::Builder;
use regex::Regex;

use crate::utils;

/// Fence language that marks a block as a diagram rather than source code.
pub const DIAGRAM_LANG: &str = "mermaid";

/// Fence languages that mark a block as raw TeX for math rendering.
pub const MATH_LANGS: &[&str] = &["math", "latex", "tex"];

/// Returns true for languages whose fenced blocks are protected from
/// sanitization and exempted from syntax highlighting.
#[must_use]
pub fn is_protected_language(language: &str) -> bool {
  language == DIAGRAM_LANG || MATH_LANGS.contains(&language)
}

static PROTECTED_BLOCK_RE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(
    r#"(?s)<pre><code class="language-(?:mermaid|math|latex|tex)"[^>]*>.*?</code></pre>"#,
  )
  .unwrap_or_else(|e| {
    log::error!("Failed to compile PROTECTED_BLOCK_RE regex: {e}");
    utils::never_matching_regex()
  })
});

/// One sanitize call's worth of placeholder-to-verbatim-markup mappings.
/// Built and consumed inside [`sanitize_html`]; never escapes it.
type ProtectedBlocks = Vec<(String, String)>;

/// Replace protected fenced blocks with uniquely-keyed placeholder elements,
/// recording the verbatim original markup for each.
fn extract_protected_blocks(html: &str) -> (String, ProtectedBlocks) {
  let mut blocks = ProtectedBlocks::new();

  let extracted = PROTECTED_BLOCK_RE
    .replace_all(html, |caps: &regex::Captures| {
      let token = format!("inkdown-pb-{}", blocks.len());
      let placeholder = format!("<div data-protected-block=\"{token}\"></div>");
      blocks.push((token, caps[0].to_string()));
      placeholder
    })
    .into_owned();

  (extracted, blocks)
}

/// Substitute each placeholder back with its verbatim original content.
///
/// Every recorded entry is restored exactly once; a placeholder that did not
/// survive the cleaning pass is logged as an error because it indicates the
/// allow-list and the placeholder shape have drifted apart.
fn restore_protected_blocks(html: &str, blocks: ProtectedBlocks) -> String {
  let mut restored = html.to_string();

  for (token, original) in blocks {
    let placeholder = format!("<div data-protected-block=\"{token}\"></div>");
    if restored.contains(&placeholder) {
      restored = restored.replacen(&placeholder, &original, 1);
    } else {
      log::error!("protected-block placeholder {token} lost during sanitize");
    }
  }

  restored
}

/// Build the ammonia cleaner with the inkdown allow-list extensions.
///
/// Base behavior stays deny-by-default; everything here is additive. Grouped
/// by who introduces the markup:
/// - parser: `mark` (highlight preprocessor), task-list checkboxes,
///   `data-math-style` math markers
/// - math capability: the MathML element set
/// - post-processor: `data-protected-block` and `data-callout` carriers
fn cleaner() -> Builder<'static> {
  let mut builder = Builder::default();

  builder
    .add_tags([
      // Rich text the editor can produce as inline HTML
      "u", "sub", "sup", "font", "br", "div", "p", "span", "mark",
      // Task-list checkboxes from the GFM extension
      "input",
      // Collapsible source dumps in diagram error fragments
      "details", "summary",
      // MathML output of the math capability
      "math", "semantics", "annotation", "mrow", "mi", "mo", "mn", "ms",
      "mtext", "mspace", "msup", "msub", "msubsup", "mfrac", "msqrt", "mroot",
      "mover", "munder", "munderover", "mtable", "mtr", "mtd", "mstyle",
      "mpadded", "mphantom",
    ])
    .add_generic_attributes(["class", "id"])
    .add_tag_attributes("font", ["color", "face", "size"])
    .add_tag_attributes("input", ["type", "checked", "disabled"])
    .add_tag_attributes("div", ["data-protected-block", "data-callout", "style"])
    // Inline styles carry highlighter token colors and callout accents;
    // `style` cannot execute script, so allowing it keeps the cleaner safe.
    .add_tag_attributes("span", ["data-math-style", "style"])
    .add_tag_attributes("pre", ["style"])
    .add_tag_attributes("code", ["data-math-style"])
    .add_tag_attributes("math", ["xmlns", "display"])
    .add_tag_attributes("annotation", ["encoding"])
    .add_tag_attributes("mo", ["fence", "stretchy", "form", "separator"])
    .add_tag_attributes("mspace", ["width"])
    .add_tag_attributes("mfrac", ["linethickness"])
    .add_tag_attributes("mstyle", ["mathvariant", "displaystyle"])
    .add_tag_attributes("mi", ["mathvariant"]);

  builder
}

/// Sanitize an untrusted HTML string into one safe to attach to a document.
///
/// Protected fenced blocks (diagram and math languages) cross the boundary
/// verbatim via the placeholder mechanism; everything else goes through the
/// deny-by-default cleaning pass. No script-executing element or
/// event-handler attribute survives, by construction of the allow-list.
///
/// Sanitization is pure filtering over already-valid markup; it does not
/// fail.
#[must_use]
pub fn sanitize_html(html: &str) -> String {
  let (extracted, blocks) = extract_protected_blocks(html);
  let cleaned = cleaner().clean(&extracted).to_string();
  restore_protected_blocks(&cleaned, blocks)
}
