#![allow(clippy::expect_used, clippy::panic, reason = "Fine in tests")]
//! End-to-end tests for the full rendering chain: parse, sanitize,
//! post-process.

use inkdown_pipeline::{
  MarkdownOptions,
  MarkdownOptionsBuilder,
  MarkdownProcessor,
  RenderContext,
  postprocess,
  render::{DiagramRenderer, RenderManager},
  sanitize_html,
};

/// Check that HTML output contains all expected substrings.
fn assert_html_contains(html: &str, expected: &[&str]) {
  for &needle in expected {
    assert!(
      html.contains(needle),
      "Expected HTML to contain '{needle}', but it did not.\nFull \
       HTML:\n{html}"
    );
  }
}

fn render_full(markdown: &str, ctx: &RenderContext) -> String {
  let processor = MarkdownProcessor::new(MarkdownOptions::default());
  let result = processor.render(markdown);
  let safe = sanitize_html(&result.html);
  postprocess::apply_to_html(&safe, ctx)
}

struct StubDiagram;

impl DiagramRenderer for StubDiagram {
  fn name(&self) -> &'static str {
    "stub"
  }

  fn render(
    &self,
    _source: &str,
    id: &str,
  ) -> inkdown_pipeline::render::RenderResult<String> {
    Ok(format!("<svg id=\"{id}-svg\"><rect/></svg>"))
  }
}

#[test]
fn renders_basic_document_with_title() {
  let processor = MarkdownProcessor::new(MarkdownOptions::default());
  let result = processor.render("# Title\n\nHello");

  assert_eq!(result.title, Some("Title".to_string()));
  assert_eq!(result.headers.len(), 1);
  assert_eq!(result.headers[0].id, "title");
  assert_html_contains(&result.html, &["<h1", "Title", "<p>Hello</p>"]);
}

#[test]
fn headings_carry_their_extracted_anchor_ids() {
  let processor = MarkdownProcessor::new(MarkdownOptions::default());
  let result = processor.render("# Top Title\n\n## Second Level\n");

  assert_html_contains(&result.html, &[
    r#"<h1 id="top-title">"#,
    r#"<h2 id="second-level">"#,
  ]);
  assert_eq!(result.headers[0].id, "top-title");
  assert_eq!(result.headers[1].id, "second-level");
}

#[test]
fn highlight_marks_survive_the_full_chain() {
  let ctx = RenderContext::new(RenderManager::new());
  let html = render_full("Some ==important== text", &ctx);
  assert_html_contains(&html, &["<mark>important</mark>"]);
}

#[test]
fn mermaid_fence_passes_through_untouched() {
  let ctx = RenderContext::new(RenderManager::new());
  let html = render_full("```mermaid\ngraph TD;\nA-->B;\n```\n", &ctx);

  assert_html_contains(&html, &["language-mermaid", "A--&gt;B;"]);
  assert!(!html.contains("data-protected-block"), "no placeholder leaks");
  assert!(!html.contains("<!--"), "arrows must not become comments");
  assert!(!html.contains("code-lang"), "diagram fences get no code label");
}

#[test]
fn injected_diagram_backend_replaces_mermaid_fences() {
  let ctx = RenderContext::new(
    RenderManager::new().with_diagram(Box::new(StubDiagram)),
  );
  let html = render_full("```mermaid\ngraph TD;\nA-->B;\n```\n", &ctx);

  assert_html_contains(&html, &[
    r#"<div class="diagram" id="inkdown-diagram-0">"#,
    r#"<svg id="inkdown-diagram-0-svg">"#,
  ]);
  assert!(!html.contains("language-mermaid"));
}

#[test]
fn marked_blockquote_becomes_callout() {
  let ctx = RenderContext::new(RenderManager::new());
  let html = render_full("> [!warning] Careful\n> Body text\n", &ctx);

  assert_html_contains(&html, &[
    r#"data-callout="warning""#,
    r#"<span class="callout-title-text">Careful</span>"#,
    "callout-content",
    "Body text",
  ]);
  assert!(!html.contains("[!warning]"));
  assert!(!html.contains("<blockquote>"));
}

#[test]
fn unknown_callout_identifier_falls_back_to_note() {
  let ctx = RenderContext::new(RenderManager::new());
  let html = render_full("> [!zebra] Odd one\n> Text\n", &ctx);
  assert_html_contains(&html, &[r#"data-callout="note""#, "Odd one"]);
}

#[test]
fn code_fence_inside_callout_keeps_highlighting_and_label() {
  let ctx = RenderContext::new(RenderManager::new());
  let html = render_full(
    "> [!example] Usage\n> ```sh\n> ls -la\n> ```\n",
    &ctx,
  );

  assert_html_contains(&html, &[
    r#"data-callout="example""#,
    r#"<span class="code-lang">"#,
    "ls -la",
  ]);
}

#[test]
fn highlight_inside_callout_title() {
  let ctx = RenderContext::new(RenderManager::new());
  let html = render_full("> [!tip] Use ==this==\n> Body\n", &ctx);

  // The preprocessor runs first, so the marker line already carries the
  // mark element when callout matching happens. Title text survives; the
  // raw delimiters do not.
  assert_html_contains(&html, &[r#"data-callout="tip""#, "Use this"]);
  assert!(!html.contains("=="));
}

#[test]
fn highlight_before_marker_defeats_callout_detection() {
  let ctx = RenderContext::new(RenderManager::new());
  let html = render_full("> ==x== [!note] not a callout\n", &ctx);

  assert!(html.contains("<blockquote>"));
  assert!(!html.contains("data-callout"));
}

#[cfg(feature = "mathml")]
#[test]
fn dollar_math_renders_to_mathml() {
  let ctx = RenderContext::default();
  let html = render_full("Einstein said $E=mc^2$ once.\n", &ctx);

  assert_html_contains(&html, &["<math", "Einstein said"]);
  assert!(!html.contains("data-math-style"));
}

#[cfg(feature = "mathml")]
#[test]
fn math_fence_renders_as_display_block() {
  let ctx = RenderContext::default();
  let html = render_full("```math\n\\sum_{i=0}^n i\n```\n", &ctx);
  assert_html_contains(&html, &[r#"<div class="math-display">"#, "<math"]);
}

#[test]
fn embedded_script_is_stripped() {
  let ctx = RenderContext::new(RenderManager::new());
  let html = render_full("<script>alert(1)</script>\n\nSafe text\n", &ctx);

  assert_html_contains(&html, &["Safe text"]);
  assert!(!html.contains("<script"));
  assert!(!html.contains("alert(1)"));
}

#[test]
fn event_handler_attributes_are_stripped() {
  let ctx = RenderContext::new(RenderManager::new());
  let html =
    render_full("<p onclick=\"alert(1)\">click me</p>\n", &ctx);

  assert_html_contains(&html, &["click me"]);
  assert!(!html.contains("onclick"));
}

#[test]
fn page_break_marker_survives_the_full_chain() {
  let ctx = RenderContext::new(RenderManager::new());
  let html = render_full(
    "Before\n\n<div class=\"page-break\"></div>\n\nAfter\n",
    &ctx,
  );
  assert_html_contains(&html, &[r#"<div class="page-break">"#, "Before", "After"]);
}

#[test]
fn task_list_checkboxes_survive_sanitization() {
  let ctx = RenderContext::new(RenderManager::new());
  let html = render_full("- [x] done\n- [ ] pending\n", &ctx);

  assert_html_contains(&html, &["<input", "checked", "done", "pending"]);
}

#[test]
fn mentioning_the_processed_marker_does_not_disable_processing() {
  let ctx = RenderContext::new(RenderManager::new());
  let html = render_full(
    "The `data-inkdown-processed` attribute is internal.\n\n\
     > [!warning] Careful\n> Body\n",
    &ctx,
  );

  assert_html_contains(&html, &[
    r#"data-callout="warning""#,
    "<code>data-inkdown-processed</code>",
  ]);
  assert!(!html.contains("<blockquote>"));
}

#[test]
fn processing_the_output_again_changes_nothing() {
  let ctx = RenderContext::new(RenderManager::new());
  let once = render_full(
    "> [!tip] Stay sharp\n> Use the pipeline once.\n",
    &ctx,
  );
  let twice = postprocess::apply_to_html(&once, &ctx);
  assert_eq!(once, twice);
}

#[cfg(feature = "syntect")]
#[test]
fn code_blocks_get_highlighting_markup() {
  let ctx = RenderContext::new(RenderManager::new());
  let html = render_full("```rust\nfn main() {}\n```\n", &ctx);

  assert_html_contains(&html, &[
    r#"<pre class="highlight">"#,
    r#"<span class="code-lang">rust</span>"#,
    "main",
  ]);
}

#[test]
fn math_extraction_can_be_disabled() {
  let options = MarkdownOptionsBuilder::new()
    .math(false)
    .highlight_code(false)
    .build();
  let processor = MarkdownProcessor::new(options);
  let result = processor.render("Costs $5 or $10 dollars\n");
  assert!(!result.html.contains("data-math-style"));
}
