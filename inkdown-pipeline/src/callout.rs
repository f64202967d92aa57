//! Callout type registry.
//!
//! A callout is a styled, typed annotation block derived from a blockquote
//! whose first line carries a `[!type]` marker. The registry maps canonical
//! type names to display color, icon glyph, and alias names. Resolution is
//! total: an unknown identifier always falls back to the `note` type.

/// A single callout type definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalloutType {
  /// Canonical type name, lowercase.
  pub name:    &'static str,
  /// Default display color (CSS color value).
  pub color:   &'static str,
  /// Icon glyph shown in the title row.
  pub icon:    &'static str,
  /// Alias names resolving to this type. Disjoint across types.
  pub aliases: &'static [&'static str],
}

/// The fixed callout registry. The first entry (`note`) doubles as the
/// fallback type for unknown identifiers.
pub const CALLOUT_TYPES: &[CalloutType] = &[
  CalloutType {
    name:    "note",
    color:   "#448aff",
    icon:    "\u{270e}", // ✎
    aliases: &[],
  },
  CalloutType {
    name:    "abstract",
    color:   "#00b0ff",
    icon:    "\u{2630}", // ☰
    aliases: &["summary", "tldr"],
  },
  CalloutType {
    name:    "info",
    color:   "#00b8d4",
    icon:    "\u{2139}", // ℹ
    aliases: &[],
  },
  CalloutType {
    name:    "todo",
    color:   "#00b8d4",
    icon:    "\u{2611}", // ☑
    aliases: &[],
  },
  CalloutType {
    name:    "tip",
    color:   "#00bfa5",
    icon:    "\u{1f525}", // 🔥
    aliases: &["hint", "important"],
  },
  CalloutType {
    name:    "success",
    color:   "#00c853",
    icon:    "\u{2713}", // ✓
    aliases: &["check", "done"],
  },
  CalloutType {
    name:    "question",
    color:   "#64dd17",
    icon:    "\u{003f}", // ?
    aliases: &["help", "faq"],
  },
  CalloutType {
    name:    "warning",
    color:   "#ff9100",
    icon:    "\u{26a0}", // ⚠
    aliases: &["caution", "attention"],
  },
  CalloutType {
    name:    "failure",
    color:   "#ff5252",
    icon:    "\u{2717}", // ✗
    aliases: &["fail", "missing"],
  },
  CalloutType {
    name:    "danger",
    color:   "#ff1744",
    icon:    "\u{26a1}", // ⚡
    aliases: &["error"],
  },
  CalloutType {
    name:    "bug",
    color:   "#f50057",
    icon:    "\u{1f41b}", // 🐛
    aliases: &[],
  },
  CalloutType {
    name:    "example",
    color:   "#7c4dff",
    icon:    "\u{2756}", // ❖
    aliases: &[],
  },
  CalloutType {
    name:    "quote",
    color:   "#9e9e9e",
    icon:    "\u{201c}", // “
    aliases: &["cite"],
  },
];

/// The type unknown identifiers resolve to.
#[must_use]
pub fn fallback_type() -> &'static CalloutType {
  &CALLOUT_TYPES[0]
}

/// Resolve a callout identifier to a registry entry.
///
/// Matching is case-insensitive; canonical names are checked before aliases.
/// Never fails: unmatched identifiers yield [`fallback_type`].
#[must_use]
pub fn resolve(identifier: &str) -> &'static CalloutType {
  let lowered = identifier.to_lowercase();

  CALLOUT_TYPES
    .iter()
    .find(|t| t.name == lowered)
    .or_else(|| {
      CALLOUT_TYPES
        .iter()
        .find(|t| t.aliases.contains(&lowered.as_str()))
    })
    .unwrap_or_else(fallback_type)
}
