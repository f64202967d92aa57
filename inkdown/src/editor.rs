//! Narrow capability interface over the text editor component.
//!
//! The core never holds an editor implementation directly; it works against
//! [`EditorHandle`], which exposes exactly the operations the pipeline
//! needs: read the current text, replace a range, and get/set the
//! selection. Offsets are byte offsets into the UTF-8 text; implementations
//! clamp out-of-range or mid-character offsets to the nearest valid
//! boundary rather than panicking.

use std::ops::Range;

/// Capability interface the core uses to talk to an editor.
pub trait EditorHandle {
  /// Snapshot of the current document text.
  fn text(&self) -> String;

  /// Replace the given byte range with the replacement text.
  fn replace_range(&mut self, range: Range<usize>, replacement: &str);

  /// Current selection as a byte range. An empty range is a caret.
  fn selection(&self) -> Range<usize>;

  /// Move the selection.
  fn set_selection(&mut self, range: Range<usize>);
}

/// In-memory editor backing a plain string buffer.
#[derive(Debug, Default, Clone)]
pub struct BufferEditor {
  text:      String,
  selection: Range<usize>,
}

impl BufferEditor {
  #[must_use]
  pub fn new(text: impl Into<String>) -> Self {
    Self {
      text:      text.into(),
      selection: 0..0,
    }
  }

  /// Clamp an offset to the buffer length and the nearest char boundary at
  /// or below it.
  fn clamp(&self, offset: usize) -> usize {
    let mut clamped = offset.min(self.text.len());
    while clamped > 0 && !self.text.is_char_boundary(clamped) {
      clamped -= 1;
    }
    clamped
  }

  /// Normalize a range: clamp both ends and order them.
  fn clamp_range(&self, range: Range<usize>) -> Range<usize> {
    let start = self.clamp(range.start);
    let end = self.clamp(range.end);
    if start <= end { start..end } else { end..start }
  }
}

impl EditorHandle for BufferEditor {
  fn text(&self) -> String {
    self.text.clone()
  }

  fn replace_range(&mut self, range: Range<usize>, replacement: &str) {
    let range = self.clamp_range(range);
    let caret = range.start + replacement.len();
    self.text.replace_range(range, replacement);
    self.selection = caret..caret;
  }

  fn selection(&self) -> Range<usize> {
    self.selection.clone()
  }

  fn set_selection(&mut self, range: Range<usize>) {
    self.selection = self.clamp_range(range);
  }
}

/// Wrap the current selection in highlight markers, or insert an empty pair
/// at the caret.
///
/// The caret lands between the markers when nothing was selected, and after
/// the closing marker otherwise.
pub fn toggle_highlight(editor: &mut dyn EditorHandle) {
  let selection = editor.selection();
  let text = editor.text();
  let selected = text.get(selection.clone()).unwrap_or_default();

  if selected.is_empty() {
    editor.replace_range(selection.clone(), "====");
    editor.set_selection(selection.start + 2..selection.start + 2);
  } else {
    let wrapped = format!("=={selected}==");
    editor.replace_range(selection, &wrapped);
  }
}
