//! Thin helpers over kuchikikiki for fragment-level DOM work.
//!
//! The post-processor and the highlighting pass both parse HTML strings into
//! a tree, mutate it in place, and serialize back. html5ever always builds a
//! full document (html/head/body); these helpers keep the rest of the crate
//! working in terms of body fragments so wrapper elements never leak into
//! output strings.

use kuchikikiki::{Attribute, ExpandedName, NodeRef};
use markup5ever::{LocalName, QualName, ns};
use tendril::TendrilSink;

/// Parse an HTML string into a full document tree.
#[must_use]
pub fn parse_document(html: &str) -> NodeRef {
  kuchikikiki::parse_html().one(html)
}

/// The `<body>` element of a parsed document, if present.
#[must_use]
pub fn body_node(document: &NodeRef) -> Option<NodeRef> {
  document
    .select_first("body")
    .ok()
    .map(|body| body.as_node().clone())
}

/// Parse an HTML string and return the top-level nodes of its body content.
#[must_use]
pub fn parse_fragment_nodes(html: &str) -> Vec<NodeRef> {
  let document = parse_document(html);
  body_node(&document).map_or_else(Vec::new, |body| body.children().collect())
}

/// Serialize the body content of a document tree, without the body wrapper.
#[must_use]
pub fn serialize_fragment(document: &NodeRef) -> String {
  let Some(body) = body_node(document) else {
    return String::new();
  };

  let mut out = Vec::new();
  for child in body.children() {
    let _ = child.serialize(&mut out);
  }
  String::from_utf8(out).unwrap_or_default()
}

/// Build a new HTML element with the given attributes.
#[must_use]
pub fn new_element<'a, I>(name: &str, attributes: I) -> NodeRef
where
  I: IntoIterator<Item = (&'a str, String)>,
{
  NodeRef::new_element(
    QualName::new(None, ns!(html), LocalName::from(name)),
    attributes.into_iter().map(|(attr_name, value)| {
      (
        ExpandedName::new("", attr_name),
        Attribute {
          prefix: None,
          value,
        },
      )
    }),
  )
}

/// Whether a node sits inside a `code` or `pre` element.
#[must_use]
pub fn in_code_context(node: &NodeRef) -> bool {
  let mut parent = node.parent();
  while let Some(p) = parent {
    if let Some(element) = p.as_element() {
      let tag = element.name.local.as_ref();
      if tag == "code" || tag == "pre" {
        return true;
      }
    }
    parent = p.parent();
  }
  false
}
