//! The structural parser chain.
//!
//! Converts markdown source into semantic (still unsanitized) HTML through a
//! fixed stage order: highlight preprocessing, comrak parsing with GFM and
//! dollar-math extensions, HTML conversion with raw-HTML passthrough, syntax
//! highlighting annotation, serialization. The chain holds no process-global
//! mutable state, so it can run on a background worker thread unchanged.

pub mod core;
pub mod process;
pub mod types;

// Re-export commonly used types from submodules
pub use core::extract_inline_text;
pub use process::{process_safe, render_recovering};
pub use types::{MarkdownOptions, MarkdownOptionsBuilder, MarkdownProcessor};
