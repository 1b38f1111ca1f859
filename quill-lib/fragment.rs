//! Inline markup carried inside a run's CDATA block.
//!
//! The literal is usually a handful of siblings (`<b>Hi</b> there`) with no
//! single root, so it is parsed inside a synthetic wrapper element. Only the
//! wrapper's children are ever written back out.

use crate::markup::{
  Element,
  MarkupError,
  Node,
  Result,
  Text,
  parse_nodes,
};

const WRAPPER: &str = "x";
const SPAN: &str = "span";
const STYLE: &str = "style";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
  nodes: Vec<Node>,
}

impl Fragment {
  pub fn parse(literal: &str) -> Result<Self> {
    let wrapped = format!("<{WRAPPER}>{literal}</{WRAPPER}>");
    let mut nodes = parse_nodes(&wrapped)?;

    match (nodes.pop(), nodes.is_empty()) {
      (Some(Node::Element(mut wrapper)), true) => {
        Ok(Self {
          nodes: std::mem::take(wrapper.children_mut()),
        })
      },
      _ => Err(MarkupError::MissingRoot),
    }
  }

  pub fn nodes(&self) -> &[Node] {
    &self.nodes
  }

  /// Rewrite every text node, depth first, with `transform`. Elements are
  /// left as they are. Text whose value does not change keeps its original
  /// escaped form.
  pub fn map_text<F>(&mut self, transform: &mut F) -> Result<()>
  where
    F: FnMut(&str) -> String,
  {
    map_nodes(&mut self.nodes, transform)
  }

  /// Give the whole fragment an inline `style`.
  ///
  /// A fragment that is already one styled span gets its style replaced, so
  /// applying styles repeatedly does not nest spans. Anything else is wrapped
  /// in a new span.
  pub fn set_style(&mut self, css: &str) {
    if let [Node::Element(span)] = self.nodes.as_mut_slice()
      && span.name() == SPAN
      && span.attribute(STYLE).is_some()
    {
      span.set_attribute(STYLE, css);
      return;
    }

    let mut span = Element::new(SPAN).with_attribute(STYLE, css);
    *span.children_mut() = std::mem::take(&mut self.nodes);
    self.nodes.push(Node::Element(span));
  }

  /// Concatenate the serialized children into a new literal.
  pub fn to_literal(&self) -> String {
    let mut out = String::new();
    for node in &self.nodes {
      node.write_to(&mut out);
    }
    out
  }
}

fn map_nodes<F>(nodes: &mut [Node], transform: &mut F) -> Result<()>
where
  F: FnMut(&str) -> String,
{
  for node in nodes {
    match node {
      Node::Element(element) => map_nodes(element.children_mut(), transform)?,
      Node::Text(text) => {
        let value = text.value()?;
        let rewritten = transform(&value);
        if rewritten != value {
          *text = Text::new(&rewritten);
        }
      },
      Node::CData(data) => *data = transform(data),
      Node::Markup(_) => {},
    }
  }
  Ok(())
}
