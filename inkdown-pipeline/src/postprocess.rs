//! Ordered DOM post-processing passes.
//!
//! Runs on sanitized HTML, after cleaning and before styling. The pass order
//! is fixed and load-bearing:
//!
//! 1. callouts rewrite marked blockquotes, so later passes see diagram and
//!    code blocks at their final positions inside callout content
//! 2. diagrams replace their fenced blocks before the code-label pass, so
//!    diagram fences never receive a language label
//! 3. code labels wrap the remaining annotated blocks
//! 4. math replaces marker elements and dollar-delimited text last, once no
//!    other pass will move text nodes around
//!
//! Every pass degrades to leaving its input visible when a backend is absent
//! or fails; post-processing never turns renderable content into nothing.

use std::{cell::Cell, collections::HashMap, sync::LazyLock};

use kuchikikiki::NodeRef;
use regex::Regex;

use crate::{
  callout,
  dom,
  processor::process_safe,
  render::{MathStyle, RenderManager},
  sanitize,
  utils,
};

/// Attribute marking HTML that already went through the pass chain.
pub const PROCESSED_ATTR: &str = "data-inkdown-processed";

static CALLOUT_MARKER_RE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"^\[!([A-Za-z][A-Za-z0-9_-]*)\]\s*(.*)$").unwrap_or_else(|e| {
    log::error!("Failed to compile CALLOUT_MARKER_RE regex: {e}");
    utils::never_matching_regex()
  })
});

static DOLLAR_MATH_RE: LazyLock<Regex> = LazyLock::new(|| {
  // Display form first so `$$…$$` is never misread as two inline spans.
  // Inline delimiters must hug non-whitespace, matching how currency
  // amounts in prose are told apart from math.
  Regex::new(r"(?s)\$\$(.+?)\$\$|\$(\S(?:[^$\n]*?\S)?)\$").unwrap_or_else(
    |e| {
      log::error!("Failed to compile DOLLAR_MATH_RE regex: {e}");
      utils::never_matching_regex()
    },
  )
});

/// Per-session state threaded through the pass chain.
///
/// Owns the injected render backends, user overrides for callout colors, and
/// the per-document diagram id counter.
pub struct RenderContext {
  render_manager: RenderManager,
  callout_colors: HashMap<String, String>,
  diagram_seq:    Cell<usize>,
}

impl RenderContext {
  /// Create a context around the given render backends.
  #[must_use]
  pub fn new(render_manager: RenderManager) -> Self {
    Self {
      render_manager,
      callout_colors: HashMap::new(),
      diagram_seq: Cell::new(0),
    }
  }

  /// Override default callout colors, keyed by canonical type name.
  #[must_use]
  pub fn with_callout_colors(
    mut self,
    colors: HashMap<String, String>,
  ) -> Self {
    self.callout_colors = colors;
    self
  }

  /// Access the underlying render backends.
  #[must_use]
  pub const fn render_manager(&self) -> &RenderManager {
    &self.render_manager
  }

  /// Next unique diagram element id for this context.
  fn next_diagram_id(&self) -> String {
    let n = self.diagram_seq.get();
    self.diagram_seq.set(n + 1);
    format!("inkdown-diagram-{n}")
  }
}

impl Default for RenderContext {
  fn default() -> Self {
    Self::new(crate::render::create_default_manager())
  }
}

/// Whether an HTML string already carries the processed marker.
///
/// Only the leading wrapper element counts; content that merely mentions the
/// attribute (inline code, prose) must still be processed.
#[must_use]
pub fn is_processed(html: &str) -> bool {
  html
    .trim_start()
    .strip_prefix("<div ")
    .is_some_and(|rest| rest.starts_with(PROCESSED_ATTR))
}

/// Run all post-processing passes over a parsed document, in order.
pub fn apply(document: &NodeRef, ctx: &RenderContext) {
  process_callouts(document, ctx);
  process_diagrams(document, ctx);
  process_code_labels(document);
  process_math(document, ctx);
}

/// Run the pass chain over an HTML string.
///
/// Already-processed input is returned unchanged, so feeding output back in
/// can never double-wrap callouts or re-render math. A panic anywhere in the
/// chain falls back to the unprocessed input, which is still safe HTML.
#[must_use]
pub fn apply_to_html(html: &str, ctx: &RenderContext) -> String {
  if is_processed(html) {
    return html.to_string();
  }

  process_safe(
    html,
    |input| {
      let document = dom::parse_document(input);
      apply(&document, ctx);
      format!(
        "<div {PROCESSED_ATTR}=\"true\">{}</div>",
        dom::serialize_fragment(&document)
      )
    },
    html,
  )
}

/// Rewrite blockquotes whose first line is a `[!type]` marker into callout
/// structures.
///
/// Unmarked blockquotes pass through untouched. The produced root is a `div`,
/// so re-running the pass finds nothing to rewrite.
fn process_callouts(document: &NodeRef, ctx: &RenderContext) {
  let blockquotes: Vec<NodeRef> = document
    .select("blockquote")
    .into_iter()
    .flatten()
    .map(|b| b.as_node().clone())
    .collect();

  for blockquote in blockquotes {
    let Some(first_p) = blockquote.children().find(|c| {
      c.as_element().is_some_and(|e| e.name.local.as_ref() == "p")
    }) else {
      continue;
    };

    let text = first_p.text_contents();
    let first_line = text.lines().next().unwrap_or_default();
    let Some(caps) = CALLOUT_MARKER_RE.captures(first_line) else {
      continue;
    };

    let kind = callout::resolve(&caps[1]);
    let color = ctx
      .callout_colors
      .get(kind.name)
      .map_or(kind.color, String::as_str);
    let inline_title = caps.get(2).map_or("", |m| m.as_str().trim());
    let title_text = if inline_title.is_empty() {
      utils::capitalize_first(kind.name)
    } else {
      inline_title.to_string()
    };

    // The marker line spans the paragraph's leading children up to the
    // first line break, inline markup included. Detach all of them, then
    // cut the break node's text after the newline, so nothing from the
    // marker line leaks into the content region.
    let mut marker_children = Vec::new();
    let mut break_node = None;
    for child in first_p.children() {
      let has_break =
        child.as_text().is_some_and(|t| t.borrow().contains('\n'));
      if has_break {
        break_node = Some(child);
        break;
      }
      marker_children.push(child);
    }
    for node in marker_children {
      node.detach();
    }
    if let Some(node) = break_node {
      if let Some(contents) = node.as_text() {
        let mut contents = contents.borrow_mut();
        *contents = contents
          .split_once('\n')
          .map_or_else(String::new, |(_, rest)| rest.to_string());
      }
    }

    let root = dom::new_element("div", [
      ("class", "callout".to_string()),
      ("data-callout", kind.name.to_string()),
      ("style", format!("--callout-color: {color};")),
    ]);

    let title_el =
      dom::new_element("div", [("class", "callout-title".to_string())]);
    let icon_el =
      dom::new_element("span", [("class", "callout-icon".to_string())]);
    icon_el.append(NodeRef::new_text(kind.icon));
    let title_text_el =
      dom::new_element("span", [("class", "callout-title-text".to_string())]);
    title_text_el.append(NodeRef::new_text(title_text));
    title_el.append(icon_el);
    title_el.append(title_text_el);

    let content_el =
      dom::new_element("div", [("class", "callout-content".to_string())]);

    let children: Vec<NodeRef> = blockquote.children().collect();
    for child in children {
      let emptied_marker_paragraph = child == first_p
        && child.text_contents().trim().is_empty()
        && child.children().all(|c| c.as_text().is_some());
      if emptied_marker_paragraph {
        child.detach();
        continue;
      }
      child.detach();
      content_el.append(child);
    }

    root.append(title_el);
    root.append(content_el);
    blockquote.insert_before(root);
    blockquote.detach();
  }
}

/// Replace fenced diagram blocks with rendered graphics.
///
/// With no diagram backend configured the fenced source stays visible as-is.
/// A backend failure produces an error fragment carrying the message and the
/// collapsible original source instead of silently dropping the block.
fn process_diagrams(document: &NodeRef, ctx: &RenderContext) {
  if !ctx.render_manager.has_diagram() {
    return;
  }

  let mut targets = Vec::new();
  for code_ref in document.select("pre > code").into_iter().flatten() {
    let is_diagram = code_ref
      .attributes
      .borrow()
      .get("class")
      .and_then(|class| class.strip_prefix("language-"))
      .is_some_and(|lang| lang == sanitize::DIAGRAM_LANG);
    if !is_diagram {
      continue;
    }
    if let Some(pre) = code_ref.as_node().parent() {
      targets.push((pre, code_ref.as_node().text_contents()));
    }
  }

  for (pre, source) in targets {
    let id = ctx.next_diagram_id();
    let fragment =
      match ctx.render_manager.render_diagram(source.trim_end(), &id) {
        Ok(svg) => format!("<div class=\"diagram\" id=\"{id}\">{svg}</div>"),
        Err(err) => format!(
          "<div class=\"diagram-error\"><p>Diagram failed to render: \
           {}</p><details><summary>Diagram source</summary><pre>{}</pre></details></div>",
          utils::html_escape(&err.to_string()),
          utils::html_escape(&source),
        ),
      };

    for node in dom::parse_fragment_nodes(&fragment) {
      pre.insert_before(node);
    }
    pre.detach();
  }
}

/// Wrap language-annotated code blocks with a visible language label.
///
/// Protected languages and unannotated blocks are skipped, as are blocks
/// already sitting inside a label wrapper.
fn process_code_labels(document: &NodeRef) {
  let mut targets = Vec::new();
  for code_ref in document.select("pre > code").into_iter().flatten() {
    let Some(language) = code_ref
      .attributes
      .borrow()
      .get("class")
      .and_then(|class| class.strip_prefix("language-"))
      .map(ToString::to_string)
    else {
      continue;
    };
    if sanitize::is_protected_language(&language) {
      continue;
    }
    let Some(pre) = code_ref.as_node().parent() else {
      continue;
    };
    let already_wrapped = pre.parent().is_some_and(|grandparent| {
      grandparent.as_element().is_some_and(|e| {
        e.attributes.borrow().get("class").is_some_and(|class| {
          class.split_whitespace().any(|c| c == "code-block")
        })
      })
    });
    if already_wrapped {
      continue;
    }
    targets.push((pre, language));
  }

  for (pre, language) in targets {
    let wrapper =
      dom::new_element("div", [("class", "code-block".to_string())]);
    let label = dom::new_element("span", [("class", "code-lang".to_string())]);
    label.append(NodeRef::new_text(language));
    pre.insert_before(wrapper.clone());
    wrapper.append(label);
    pre.detach();
    wrapper.append(pre);
  }
}

/// Replace math markers and dollar-delimited text with rendered markup.
///
/// Render failures are logged at debug level (routine while an expression is
/// being typed) and the raw TeX stays visible.
fn process_math(document: &NodeRef, ctx: &RenderContext) {
  if !ctx.render_manager.has_math() {
    return;
  }
  replace_math_markers(document, ctx);
  replace_dollar_delimiters(document, ctx);
}

fn parse_math_style(attr: Option<&str>) -> MathStyle {
  match attr {
    Some("display") => MathStyle::Display,
    _ => MathStyle::Inline,
  }
}

/// Replace the parser's math marker elements: inline `span` markers in
/// place, fenced `code` markers together with their `pre` wrapper.
fn replace_math_markers(document: &NodeRef, ctx: &RenderContext) {
  let mut spans = Vec::new();
  for span_ref in
    document.select("span[data-math-style]").into_iter().flatten()
  {
    let style = parse_math_style(
      span_ref.attributes.borrow().get("data-math-style"),
    );
    let node = span_ref.as_node().clone();
    let tex = node.text_contents();
    spans.push((node, tex, style));
  }

  for (span, tex, style) in spans {
    match ctx.render_manager.render_math(&tex, style) {
      Ok(markup) => {
        for node in dom::parse_fragment_nodes(&markup) {
          span.insert_before(node);
        }
        span.detach();
      },
      Err(err) => log::debug!("math render failed, leaving raw TeX: {err}"),
    }
  }

  let mut blocks = Vec::new();
  for code_ref in
    document.select("code[data-math-style]").into_iter().flatten()
  {
    let code_node = code_ref.as_node().clone();
    let target = code_node
      .parent()
      .filter(|p| {
        p.as_element().is_some_and(|e| e.name.local.as_ref() == "pre")
      })
      .unwrap_or_else(|| code_node.clone());
    blocks.push((target, code_node.text_contents()));
  }

  for (target, tex) in blocks {
    match ctx.render_manager.render_math(tex.trim(), MathStyle::Display) {
      Ok(markup) => {
        let fragment = format!("<div class=\"math-display\">{markup}</div>");
        for node in dom::parse_fragment_nodes(&fragment) {
          target.insert_before(node);
        }
        target.detach();
      },
      Err(err) => {
        log::debug!("math block render failed, leaving raw TeX: {err}");
      },
    }
  }
}

/// Scan plain text nodes for `$…$` / `$$…$$` spans that arrived through raw
/// HTML passthrough rather than markdown syntax, and render them too.
///
/// Text inside `code` or `pre` is never scanned.
fn replace_dollar_delimiters(document: &NodeRef, ctx: &RenderContext) {
  let mut text_nodes = Vec::new();
  for node in document.descendants() {
    if node.as_text().is_some() && !dom::in_code_context(&node) {
      let contents = node.text_contents();
      if contents.contains('$') && DOLLAR_MATH_RE.is_match(&contents) {
        text_nodes.push((node, contents));
      }
    }
  }

  for (node, contents) in text_nodes {
    let mut replacements: Vec<NodeRef> = Vec::new();
    let mut last = 0;
    let mut rendered_any = false;

    for caps in DOLLAR_MATH_RE.captures_iter(&contents) {
      let Some(whole) = caps.get(0) else {
        continue;
      };
      let Some((tex, style)) = caps
        .get(1)
        .map(|m| (m.as_str(), MathStyle::Display))
        .or_else(|| caps.get(2).map(|m| (m.as_str(), MathStyle::Inline)))
      else {
        continue;
      };

      match ctx.render_manager.render_math(tex, style) {
        Ok(markup) => {
          if whole.start() > last {
            replacements
              .push(NodeRef::new_text(&contents[last..whole.start()]));
          }
          replacements.extend(dom::parse_fragment_nodes(&markup));
          last = whole.end();
          rendered_any = true;
        },
        Err(err) => {
          // Leave this span raw; it stays part of the trailing text.
          log::debug!("inline math render failed, leaving raw text: {err}");
        },
      }
    }

    if !rendered_any {
      continue;
    }
    if last < contents.len() {
      replacements.push(NodeRef::new_text(&contents[last..]));
    }
    for replacement in replacements {
      node.insert_before(replacement);
    }
    node.detach();
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::render::{
    DiagramRenderer,
    RenderError,
    RenderResult,
  };

  struct StubDiagram;

  impl DiagramRenderer for StubDiagram {
    fn name(&self) -> &'static str {
      "stub"
    }

    fn render(&self, _source: &str, id: &str) -> RenderResult<String> {
      Ok(format!("<svg id=\"{id}-svg\"></svg>"))
    }
  }

  struct FailingDiagram;

  impl DiagramRenderer for FailingDiagram {
    fn name(&self) -> &'static str {
      "failing"
    }

    fn render(&self, _source: &str, _id: &str) -> RenderResult<String> {
      Err(RenderError::DiagramFailed("unexpected token".to_string()))
    }
  }

  fn ctx_with_stub_diagram() -> RenderContext {
    RenderContext::new(RenderManager::new().with_diagram(Box::new(StubDiagram)))
  }

  fn run(html: &str, ctx: &RenderContext) -> String {
    let document = dom::parse_document(html);
    apply(&document, ctx);
    dom::serialize_fragment(&document)
  }

  #[test]
  fn rewrites_marked_blockquote_into_callout() {
    let ctx = RenderContext::new(RenderManager::new());
    let out = run(
      "<blockquote><p>[!warning] Careful\nBody text</p></blockquote>",
      &ctx,
    );

    assert!(out.contains(r#"data-callout="warning""#));
    assert!(out.contains("--callout-color: #ff9100;"));
    assert!(out.contains(r#"<span class="callout-title-text">Careful</span>"#));
    assert!(out.contains("Body text"));
    assert!(!out.contains("[!warning]"));
    assert!(!out.contains("<blockquote>"));
  }

  #[test]
  fn callout_without_title_uses_capitalized_type_name() {
    let ctx = RenderContext::new(RenderManager::new());
    let out = run("<blockquote><p>[!tip]\nStay hydrated</p></blockquote>", &ctx);
    assert!(out.contains(r#"<span class="callout-title-text">Tip</span>"#));
    assert!(out.contains("Stay hydrated"));
  }

  #[test]
  fn unknown_callout_type_falls_back_to_note() {
    let ctx = RenderContext::new(RenderManager::new());
    let out =
      run("<blockquote><p>[!zebra] Odd\nText</p></blockquote>", &ctx);
    assert!(out.contains(r#"data-callout="note""#));
    assert!(out.contains(r#"<span class="callout-title-text">Odd</span>"#));
  }

  #[test]
  fn plain_blockquote_is_untouched() {
    let ctx = RenderContext::new(RenderManager::new());
    let out = run("<blockquote><p>Just a quote</p></blockquote>", &ctx);
    assert!(out.contains("<blockquote>"));
    assert!(!out.contains("data-callout"));
  }

  #[test]
  fn callout_pass_is_idempotent() {
    let ctx = RenderContext::new(RenderManager::new());
    let once = run(
      "<blockquote><p>[!note] Heads up\nContent</p></blockquote>",
      &ctx,
    );
    let twice = run(&once, &ctx);
    assert_eq!(once, twice);
  }

  #[test]
  fn marker_line_inline_markup_is_not_duplicated() {
    let ctx = RenderContext::new(RenderManager::new());
    let out = run(
      "<blockquote><p>[!note] Hello <strong>world</strong>\nBody</p></blockquote>",
      &ctx,
    );

    assert!(
      out.contains(r#"<span class="callout-title-text">Hello world</span>"#)
    );
    assert_eq!(out.matches("world").count(), 1, "title text appears once");
    assert!(out.contains("Body"));
    assert!(!out.contains("<strong>"));
  }

  #[test]
  fn callout_color_overrides_apply() {
    let mut colors = HashMap::new();
    colors.insert("warning".to_string(), "#123456".to_string());
    let ctx =
      RenderContext::new(RenderManager::new()).with_callout_colors(colors);
    let out =
      run("<blockquote><p>[!warning] Hot\nText</p></blockquote>", &ctx);
    assert!(out.contains("--callout-color: #123456;"));
  }

  #[test]
  fn renders_diagram_blocks_with_unique_ids() {
    let ctx = ctx_with_stub_diagram();
    let html = "<pre><code class=\"language-mermaid\">graph TD;</code></pre>\
                <pre><code class=\"language-mermaid\">graph LR;</code></pre>";
    let out = run(html, &ctx);

    assert!(out.contains(r#"<div class="diagram" id="inkdown-diagram-0">"#));
    assert!(out.contains(r#"<div class="diagram" id="inkdown-diagram-1">"#));
    assert!(out.contains(r#"<svg id="inkdown-diagram-0-svg">"#));
    assert!(!out.contains("language-mermaid"));
  }

  #[test]
  fn diagram_failure_yields_error_fragment_with_source() {
    let ctx = RenderContext::new(
      RenderManager::new().with_diagram(Box::new(FailingDiagram)),
    );
    let out = run(
      "<p>Intro</p>\
       <pre><code class=\"language-mermaid\">graph TD;\nA--&gt;B;</code></pre>\
       <p>Outro</p>",
      &ctx,
    );

    assert!(out.contains(r#"<div class="diagram-error">"#));
    assert!(out.contains("unexpected token"));
    assert!(out.contains("<details>"));
    assert!(out.contains("graph TD;"));
    assert!(out.contains("<p>Intro</p>"));
    assert!(out.contains("<p>Outro</p>"));
  }

  #[test]
  fn diagram_blocks_survive_without_backend() {
    let ctx = RenderContext::new(RenderManager::new());
    let html = "<pre><code class=\"language-mermaid\">graph TD;</code></pre>";
    let out = run(html, &ctx);
    assert!(out.contains("language-mermaid"));
    assert!(out.contains("graph TD;"));
  }

  #[test]
  fn labels_code_blocks_by_language() {
    let ctx = RenderContext::new(RenderManager::new());
    let out = run(
      "<pre><code class=\"language-rust\">fn main() {}</code></pre>",
      &ctx,
    );
    assert!(out.contains(r#"<div class="code-block">"#));
    assert!(out.contains(r#"<span class="code-lang">rust</span>"#));
    assert!(out.contains("fn main() {}"));
  }

  #[test]
  fn code_label_pass_skips_unannotated_and_is_idempotent() {
    let ctx = RenderContext::new(RenderManager::new());
    let plain = run("<pre><code>no language</code></pre>", &ctx);
    assert!(!plain.contains("code-block"));

    let once = run(
      "<pre><code class=\"language-sh\">ls</code></pre>",
      &ctx,
    );
    let twice = run(&once, &ctx);
    assert_eq!(once, twice);
  }

  #[test]
  fn diagram_fences_never_get_code_labels() {
    let ctx = ctx_with_stub_diagram();
    let out = run(
      "<pre><code class=\"language-mermaid\">graph TD;</code></pre>",
      &ctx,
    );
    assert!(!out.contains("code-lang"));
  }

  #[cfg(feature = "mathml")]
  mod math {
    use super::*;
    use crate::render::create_default_manager;

    #[test]
    fn replaces_inline_math_markers() {
      let ctx = RenderContext::new(create_default_manager());
      let out = run(
        r#"<p>Energy: <span data-math-style="inline">E=mc^2</span></p>"#,
        &ctx,
      );
      assert!(out.contains("<math"));
      assert!(!out.contains("data-math-style"));
    }

    #[test]
    fn replaces_fenced_math_blocks_with_display_wrapper() {
      let ctx = RenderContext::new(create_default_manager());
      let out = run(
        "<pre><code class=\"language-math\" data-math-style=\"display\">x^2</code></pre>",
        &ctx,
      );
      assert!(out.contains(r#"<div class="math-display">"#));
      assert!(out.contains("<math"));
      assert!(!out.contains("<pre>"));
    }

    #[test]
    fn renders_dollar_delimited_text_outside_code() {
      let ctx = RenderContext::new(create_default_manager());
      let out = run("<p>before $x+1$ after</p>", &ctx);
      assert!(out.contains("before "));
      assert!(out.contains("<math"));
      assert!(out.contains(" after"));
      assert!(!out.contains("$x+1$"));
    }

    #[test]
    fn leaves_dollar_text_inside_code_alone() {
      let ctx = RenderContext::new(create_default_manager());
      let out = run("<p><code>$x+1$</code></p>", &ctx);
      assert!(out.contains("$x+1$"));
      assert!(!out.contains("<math"));
    }

    #[test]
    fn currency_amounts_are_not_math() {
      let ctx = RenderContext::new(create_default_manager());
      let out = run("<p>Paid $5 for lunch and $ 10 for dinner</p>", &ctx);
      assert!(out.contains("Paid $5 for lunch"));
    }
  }

  #[test]
  fn math_left_raw_without_backend() {
    let ctx = RenderContext::new(RenderManager::new());
    let out = run(
      r#"<p><span data-math-style="inline">E=mc^2</span></p>"#,
      &ctx,
    );
    assert!(out.contains("E=mc^2"));
    assert!(out.contains("data-math-style"));
  }

  #[test]
  fn apply_to_html_marks_output_and_guards_reentry() {
    let ctx = RenderContext::new(RenderManager::new());
    let once = apply_to_html(
      "<blockquote><p>[!info] Hi\nBody</p></blockquote>",
      &ctx,
    );
    assert!(is_processed(&once));
    assert!(once.contains("data-callout"));

    let twice = apply_to_html(&once, &ctx);
    assert_eq!(once, twice);
  }

  #[test]
  fn marker_mention_in_content_is_not_treated_as_processed() {
    assert!(!is_processed(
      "<p><code>data-inkdown-processed</code></p>"
    ));

    let ctx = RenderContext::new(RenderManager::new());
    let out = apply_to_html(
      "<p><code>data-inkdown-processed</code> is internal.</p>\
       <blockquote><p>[!tip] Go\nBody</p></blockquote>",
      &ctx,
    );
    assert!(out.contains("data-callout"), "pass chain must still run");
    assert!(is_processed(&out));
  }

  #[test]
  fn diagram_inside_callout_is_rendered() {
    let ctx = ctx_with_stub_diagram();
    let out = run(
      "<blockquote><p>[!example] Flow\n</p>\
       <pre><code class=\"language-mermaid\">graph TD;</code></pre></blockquote>",
      &ctx,
    );
    assert!(out.contains(r#"data-callout="example""#));
    assert!(out.contains(r#"<div class="diagram""#));
    assert!(out.contains("callout-content"));
  }
}
