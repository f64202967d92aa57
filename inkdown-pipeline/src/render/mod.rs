//! Pluggable math and diagram render capabilities.
//!
//! The post-processor never talks to a concrete engine; it goes through
//! [`RenderManager`], which holds whatever backends were injected at context
//! construction time. The shipped math backend converts raw TeX to MathML via
//! latex2mathml. No diagram backend is bundled: diagram rendering quality is
//! out of scope here, so callers plug in their own [`DiagramRenderer`] (the
//! test suite does exactly that).

pub mod error;
pub mod types;

pub use error::{RenderError, RenderResult};
pub use types::{DiagramRenderer, MathRenderer, MathStyle, RenderManager};

#[cfg(feature = "mathml")] mod mathml;
#[cfg(feature = "mathml")] pub use mathml::MathmlRenderer;

/// Create the default render manager based on available features.
///
/// The math backend is wired in when the `mathml` feature is enabled; the
/// diagram slot starts empty either way.
#[must_use]
pub fn create_default_manager() -> RenderManager {
  let manager = RenderManager::new();

  #[cfg(feature = "mathml")]
  let manager = manager.with_math(Box::new(MathmlRenderer::new()));

  manager
}
