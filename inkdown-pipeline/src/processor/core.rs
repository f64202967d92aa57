//! Core implementation of the Markdown processor.
//!
//! This module contains the main implementation of `MarkdownProcessor` and
//! its methods, focused on the rendering pipeline and configuration
//! management.

use comrak::{
  Arena,
  nodes::{AstNode, NodeHeading, NodeValue},
  options::Options,
  parse_document,
};
use markup5ever::local_name;

use super::types::{MarkdownOptions, MarkdownProcessor};
use crate::{
  dom,
  preprocess,
  sanitize::is_protected_language,
  syntax::create_default_manager,
  types::{Header, RenderResult},
  utils,
};

impl MarkdownProcessor {
  /// Create a new `MarkdownProcessor` with the given options.
  #[must_use]
  pub fn new(options: MarkdownOptions) -> Self {
    let syntax_manager = if options.highlight_code {
      create_default_manager().ok()
    } else {
      None
    };

    Self {
      options,
      syntax_manager,
    }
  }

  /// Access processor options.
  #[must_use]
  pub const fn options(&self) -> &MarkdownOptions {
    &self.options
  }

  /// Render markdown to HTML, extracting headers and title.
  ///
  /// The output is *unsanitized*: raw HTML in the source passes through
  /// untouched, relying on the downstream sanitizer for safety.
  #[must_use]
  pub fn render(&self, markdown: &str) -> RenderResult {
    let preprocessed = preprocess::highlight_marks(markdown);
    let (headers, title) = self.extract_headers(&preprocessed);
    let mut html = add_header_anchors(&self.convert_to_html(&preprocessed));

    if self.options.highlight_code {
      html = self.highlight_codeblocks(&html);
    }

    RenderResult {
      html,
      headers,
      title,
    }
  }

  /// Extract headers and title from the markdown content.
  #[must_use]
  pub fn extract_headers(
    &self,
    content: &str,
  ) -> (Vec<Header>, Option<String>) {
    let arena = Arena::new();
    let options = self.comrak_options();
    let root = parse_document(&arena, content, &options);

    let mut headers = Vec::new();
    let mut found_title = None;

    for node in root.descendants() {
      if let NodeValue::Heading(NodeHeading { level, .. }) =
        &node.data.borrow().value
      {
        let text = extract_inline_text(node);
        if *level == 1 && found_title.is_none() {
          found_title = Some(text.clone());
        }
        let id = utils::slugify(&text);
        headers.push(Header {
          text,
          level: *level,
          id,
        });
      }
    }

    (headers, found_title)
  }

  /// Convert markdown to HTML using comrak and configured options.
  fn convert_to_html(&self, content: &str) -> String {
    let arena = Arena::new();
    let options = self.comrak_options();
    let root = parse_document(&arena, content, &options);

    let mut html_output = String::new();
    comrak::format_html(root, &options, &mut html_output).unwrap_or_default();
    html_output
  }

  /// Build comrak options from `MarkdownOptions`.
  fn comrak_options(&self) -> Options<'_> {
    let mut options = Options::default();
    if self.options.gfm {
      options.extension.table = true;
      options.extension.strikethrough = true;
      options.extension.tasklist = true;
      options.extension.autolink = true;
    }
    if self.options.math {
      // Dollar-delimited math becomes dedicated math nodes carrying the raw
      // TeX; fenced ```math blocks get the language-math class.
      options.extension.math_dollars = true;
      options.extension.math_code = true;
    }
    // Raw HTML passes through; the sanitizer is the safety boundary.
    options.render.r#unsafe = true;
    options
  }

  /// Annotate fenced code blocks with per-token highlighting markup.
  ///
  /// Blocks whose language the highlighter does not recognize are left
  /// unannotated. Diagram and math pseudo-languages are exempt entirely and
  /// stay opaque text.
  #[must_use]
  pub fn highlight_codeblocks(&self, html: &str) -> String {
    let Some(syntax_manager) = self.syntax_manager.as_ref() else {
      return html.to_string();
    };

    let document = dom::parse_document(html);

    // Collect all code blocks first to avoid DOM modification during
    // iteration
    let mut code_blocks = Vec::new();
    for code_ref in document.select("pre > code").into_iter().flatten() {
      let code_node = code_ref.as_node();
      let Some(element) = code_node.as_element() else {
        continue;
      };

      let Some(language) = element
        .attributes
        .borrow()
        .get("class")
        .and_then(|class| class.strip_prefix("language-"))
        .map(ToString::to_string)
      else {
        // No declared language; leave the block unannotated.
        continue;
      };

      if is_protected_language(&language) {
        continue;
      }

      if let Some(pre_parent) = code_node.parent() {
        code_blocks.push((pre_parent, code_node.text_contents(), language));
      }
    }

    for (pre_element, code_text, language) in code_blocks {
      let highlighted = syntax_manager
        .highlight_code(
          &code_text,
          &language,
          self.options.highlight_theme.as_deref(),
        )
        .ok();

      if let Some(highlighted) = highlighted {
        let wrapped_html = format!(
          r#"<pre class="highlight"><code class="language-{language}">{highlighted}</code></pre>"#
        );
        for node in dom::parse_fragment_nodes(&wrapped_html) {
          pre_element.insert_before(node);
        }
        pre_element.detach();
      }
      // Unrecognized languages keep their original <pre><code> untouched.
    }

    dom::serialize_fragment(&document)
  }
}

/// Attach slugified anchor ids to heading elements.
///
/// Uses the same slugification as header extraction, so `Header.id` always
/// names an anchor that exists in the emitted HTML. Headings that already
/// carry an id are left alone.
fn add_header_anchors(html: &str) -> String {
  let document = dom::parse_document(html);

  for heading in document
    .select("h1, h2, h3, h4, h5, h6")
    .into_iter()
    .flatten()
  {
    let id = utils::slugify(&heading.as_node().text_contents());
    if id.is_empty() {
      continue;
    }
    let mut attributes = heading.attributes.borrow_mut();
    if attributes.get("id").is_none() {
      attributes.insert(local_name!("id"), id);
    }
  }

  dom::serialize_fragment(&document)
}

/// Extract all inline text from a node, recursively.
#[must_use]
pub fn extract_inline_text<'a>(node: &'a AstNode<'a>) -> String {
  let mut text = String::new();
  for child in node.children() {
    match &child.data.borrow().value {
      NodeValue::Text(t) => text.push_str(t),
      NodeValue::Code(t) => text.push_str(&t.literal),
      NodeValue::Math(m) => text.push_str(&m.literal),
      NodeValue::Link(..)
      | NodeValue::Emph
      | NodeValue::Strong
      | NodeValue::Strikethrough
      | NodeValue::Superscript => text.push_str(&extract_inline_text(child)),
      NodeValue::HtmlInline(_) | NodeValue::Image(..) => {},
      _ => {},
    }
  }
  text
}
