//! # inkdown-pipeline - Markdown document rendering pipeline
//!
//! Turns markdown source into sanitized, display-ready HTML in four strictly
//! ordered stages: highlight preprocessing and structural parsing
//! ([`MarkdownProcessor`]), sanitization with protected-block extraction
//! ([`sanitize_html`]), and DOM post-processing for callouts, diagrams, code
//! labels, and math ([`postprocess::apply_to_html`]).
//!
//! ## Quick Start
//!
//! ```rust
//! use inkdown_pipeline::{
//!   MarkdownOptions,
//!   MarkdownProcessor,
//!   RenderContext,
//!   postprocess,
//!   sanitize_html,
//! };
//!
//! let processor = MarkdownProcessor::new(MarkdownOptions::default());
//! let result = processor.render("# Hello\n\nSome ==important== text.");
//!
//! let safe = sanitize_html(&result.html);
//! let html = postprocess::apply_to_html(&safe, &RenderContext::default());
//!
//! assert!(html.contains("<h1"));
//! assert!(html.contains("<mark>important</mark>"));
//! assert_eq!(result.title, Some("Hello".to_string()));
//! ```
//!
//! ## Features
//!
//! - **AST-based parsing** using `comrak` with GFM and dollar-math extensions
//! - **Deny-by-default sanitization** via `ammonia`, with verbatim protection
//!   for diagram and math fences
//! - **Typed callouts** from `[!type]`-marked blockquotes, with a fixed
//!   registry and total fallback resolution
//! - **Pluggable render backends** for math (MathML bundled) and diagrams
//! - **Error recovery** with graceful degradation for malformed input
//!
//! The pipeline holds no process-global mutable state; a processor and a
//! [`RenderContext`] can live on a background worker thread unchanged.

pub mod callout;
pub mod dom;
pub mod postprocess;
pub mod preprocess;
pub mod processor;
pub mod render;
pub mod sanitize;
pub mod syntax;
mod types;
pub mod utils;

pub use crate::{
  postprocess::RenderContext,
  processor::{
    MarkdownOptions,
    MarkdownOptionsBuilder,
    MarkdownProcessor,
    render_recovering,
  },
  sanitize::sanitize_html,
  types::{Header, RenderResult},
};
