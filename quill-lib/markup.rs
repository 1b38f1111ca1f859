//! Lossless XML tree for host pages.
//!
//! Every node remembers the exact source text it was parsed from. Serializing
//! a tree that was never edited reproduces the input byte for byte; editing a
//! node only changes the bytes of that node.

use std::{
  borrow::Cow,
  fmt,
  str,
};

use quick_xml::{
  Reader,
  escape::{
    EscapeError,
    escape,
    partial_escape,
    unescape_with,
  },
  events::{
    BytesStart,
    Event,
    attributes::AttrError,
  },
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MarkupError {
  #[error("malformed markup: {0}")]
  Xml(#[from] quick_xml::Error),
  #[error("malformed attribute: {0}")]
  Attribute(#[from] AttrError),
  #[error("invalid escape sequence: {0}")]
  Escape(#[from] EscapeError),
  #[error("markup is not valid UTF-8: {0}")]
  Utf8(#[from] str::Utf8Error),
  #[error("unexpected closing tag </{0}>")]
  UnexpectedEnd(String),
  #[error("expected </{expected}>, found </{found}>")]
  MismatchedEnd { expected: String, found: String },
  #[error("element <{0}> is never closed")]
  Unclosed(String),
  #[error("markup has no root element")]
  MissingRoot,
}

pub type Result<T> = std::result::Result<T, MarkupError>;

/// Entities understood in addition to numeric character references.
fn resolve_entity(name: &str) -> Option<&'static str> {
  match name {
    "lt" => Some("<"),
    "gt" => Some(">"),
    "amp" => Some("&"),
    "apos" => Some("'"),
    "quot" => Some("\""),
    "nbsp" => Some("\u{a0}"),
    _ => None,
  }
}

/// Character data as it appears in the source, still escaped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Text {
  raw: String,
}

impl Text {
  /// Build a text node from an unescaped value.
  pub fn new(value: &str) -> Self {
    Self {
      raw: partial_escape(value).into_owned(),
    }
  }

  pub fn from_raw(raw: impl Into<String>) -> Self {
    Self { raw: raw.into() }
  }

  pub fn raw(&self) -> &str {
    &self.raw
  }

  /// The decoded value of this text node.
  pub fn value(&self) -> Result<Cow<'_, str>> {
    Ok(unescape_with(&self.raw, resolve_entity)?)
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
  pub name:  String,
  pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
  Element(Element),
  Text(Text),
  CData(String),
  /// Comments, processing instructions, declarations and doctypes, verbatim.
  Markup(String),
}

impl Node {
  pub fn as_element(&self) -> Option<&Element> {
    match self {
      Node::Element(element) => Some(element),
      _ => None,
    }
  }

  pub fn as_element_mut(&mut self) -> Option<&mut Element> {
    match self {
      Node::Element(element) => Some(element),
      _ => None,
    }
  }

  pub fn write_to(&self, out: &mut String) {
    match self {
      Node::Element(element) => element.write_to(out),
      Node::Text(text) => out.push_str(&text.raw),
      Node::CData(data) => {
        out.push_str("<![CDATA[");
        out.push_str(data);
        out.push_str("]]>");
      },
      Node::Markup(raw) => out.push_str(raw),
    }
  }
}

impl fmt::Display for Node {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let mut out = String::new();
    self.write_to(&mut out);
    f.write_str(&out)
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
  name:         String,
  attributes:   Vec<Attribute>,
  children:     Vec<Node>,
  /// Everything between `<` and `>` (or `/>`) of the start tag.
  tag:          String,
  /// Everything between `</` and `>` of the end tag.
  end_tag:      String,
  self_closing: bool,
}

impl Element {
  pub fn new(name: impl Into<String>) -> Self {
    let name = name.into();
    Self {
      tag: name.clone(),
      end_tag: name.clone(),
      name,
      attributes: Vec::new(),
      children: Vec::new(),
      self_closing: false,
    }
  }

  pub fn with_attribute(mut self, name: &str, value: &str) -> Self {
    self.set_attribute(name, value);
    self
  }

  pub fn with_child(mut self, child: Node) -> Self {
    self.children.push(child);
    self
  }

  fn from_tag(start: &BytesStart<'_>, self_closing: bool) -> Result<Self> {
    let tag = str::from_utf8(start)?.to_owned();
    let name = str::from_utf8(start.name().as_ref())?.to_owned();

    let mut attributes = Vec::new();
    for attr in start.attributes() {
      let attr = attr?;
      let raw = str::from_utf8(&attr.value)?;
      attributes.push(Attribute {
        name:  str::from_utf8(attr.key.as_ref())?.to_owned(),
        value: unescape_with(raw, resolve_entity)?.into_owned(),
      });
    }

    Ok(Self {
      end_tag: name.clone(),
      name,
      attributes,
      children: Vec::new(),
      tag,
      self_closing,
    })
  }

  /// Qualified name, including any prefix.
  pub fn name(&self) -> &str {
    &self.name
  }

  pub fn prefix(&self) -> Option<&str> {
    self.name.split_once(':').map(|(prefix, _)| prefix)
  }

  pub fn local_name(&self) -> &str {
    self
      .name
      .split_once(':')
      .map_or(self.name.as_str(), |(_, local)| local)
  }

  pub fn attributes(&self) -> &[Attribute] {
    &self.attributes
  }

  pub fn attribute(&self, name: &str) -> Option<&str> {
    self
      .attributes
      .iter()
      .find(|attr| attr.name == name)
      .map(|attr| attr.value.as_str())
  }

  /// Set or replace an attribute. The start tag is regenerated, so its
  /// original spacing and quoting are not kept.
  pub fn set_attribute(&mut self, name: &str, value: &str) {
    match self.attributes.iter_mut().find(|attr| attr.name == name) {
      Some(attr) => attr.value = value.to_owned(),
      None => {
        self.attributes.push(Attribute {
          name:  name.to_owned(),
          value: value.to_owned(),
        })
      },
    }

    let mut tag = self.name.clone();
    for attr in &self.attributes {
      tag.push(' ');
      tag.push_str(&attr.name);
      tag.push_str("=\"");
      tag.push_str(&escape(attr.value.as_str()));
      tag.push('"');
    }
    self.tag = tag;
  }

  /// The namespace URI this element declares for `prefix`, if any.
  /// An empty prefix looks up the default namespace.
  pub fn namespace_declaration(&self, prefix: &str) -> Option<&str> {
    self.attributes.iter().find_map(|attr| {
      let declared = match attr.name.strip_prefix("xmlns") {
        Some("") => "",
        Some(rest) => rest.strip_prefix(':')?,
        None => return None,
      };
      (declared == prefix).then_some(attr.value.as_str())
    })
  }

  pub fn children(&self) -> &[Node] {
    &self.children
  }

  pub fn children_mut(&mut self) -> &mut Vec<Node> {
    &mut self.children
  }

  pub fn elements(&self) -> impl Iterator<Item = &Element> {
    self.children.iter().filter_map(Node::as_element)
  }

  pub fn insert(&mut self, index: usize, child: Node) {
    self.children.insert(index, child);
  }

  pub fn push(&mut self, child: Node) {
    self.children.push(child);
  }

  pub fn write_to(&self, out: &mut String) {
    out.push('<');
    out.push_str(&self.tag);
    if self.self_closing && self.children.is_empty() {
      out.push_str("/>");
      return;
    }

    out.push('>');
    for child in &self.children {
      child.write_to(out);
    }
    out.push_str("</");
    out.push_str(&self.end_tag);
    out.push('>');
  }
}

impl fmt::Display for Element {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let mut out = String::new();
    self.write_to(&mut out);
    f.write_str(&out)
  }
}

/// Adjacent text pieces (text split around entity references) become one node.
fn append(siblings: &mut Vec<Node>, node: Node) {
  if let Node::Text(next) = &node {
    if let Some(Node::Text(previous)) = siblings.last_mut() {
      previous.raw.push_str(&next.raw);
      return;
    }
  }
  siblings.push(node);
}

/// Parse a sequence of sibling nodes.
pub(crate) fn parse_nodes(input: &str) -> Result<Vec<Node>> {
  let mut reader = Reader::from_str(input);
  // End tags are matched here so their trailing whitespace survives.
  reader.config_mut().trim_markup_names_in_closing_tags = false;
  reader.config_mut().check_end_names = false;
  let mut open: Vec<Element> = Vec::new();
  let mut top = Vec::new();

  loop {
    let node = match reader.read_event()? {
      Event::Start(start) => {
        open.push(Element::from_tag(&start, false)?);
        continue;
      },
      Event::Empty(start) => Node::Element(Element::from_tag(&start, true)?),
      Event::End(end) => {
        let raw = str::from_utf8(&end)?;
        let found = raw.trim_end_matches(|c: char| c.is_ascii_whitespace());
        let mut element = open
          .pop()
          .ok_or_else(|| MarkupError::UnexpectedEnd(found.to_owned()))?;
        if found != element.name {
          return Err(MarkupError::MismatchedEnd {
            expected: element.name,
            found:    found.to_owned(),
          });
        }
        element.end_tag = raw.to_owned();
        Node::Element(element)
      },
      Event::Text(text) => Node::Text(Text::from_raw(str::from_utf8(&text)?)),
      Event::GeneralRef(reference) => {
        Node::Text(Text::from_raw(format!("&{};", str::from_utf8(&reference)?)))
      },
      Event::CData(data) => Node::CData(str::from_utf8(&data)?.to_owned()),
      Event::Comment(comment) => Node::Markup(format!("<!--{}-->", str::from_utf8(&comment)?)),
      Event::PI(pi) => Node::Markup(format!("<?{}?>", str::from_utf8(&pi)?)),
      Event::Decl(decl) => Node::Markup(format!("<?{}?>", str::from_utf8(&decl)?)),
      Event::DocType(doctype) => {
        Node::Markup(format!("<!DOCTYPE {}>", str::from_utf8(&doctype)?))
      },
      Event::Eof => break,
    };

    match open.last_mut() {
      Some(parent) => append(&mut parent.children, node),
      None => append(&mut top, node),
    }
  }

  match open.pop() {
    Some(unclosed) => Err(MarkupError::Unclosed(unclosed.name)),
    None => Ok(top),
  }
}

/// A parsed host page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
  nodes: Vec<Node>,
}

impl Document {
  pub fn parse(input: &str) -> Result<Self> {
    let nodes = parse_nodes(input)?;
    if !nodes.iter().any(|node| matches!(node, Node::Element(_))) {
      return Err(MarkupError::MissingRoot);
    }
    Ok(Self { nodes })
  }

  pub fn root(&self) -> Option<&Element> {
    self.nodes.iter().find_map(Node::as_element)
  }

  pub fn root_mut(&mut self) -> Option<&mut Element> {
    self.nodes.iter_mut().find_map(Node::as_element_mut)
  }

  /// The namespace URI the root element binds to `prefix`.
  pub fn namespace_of_prefix(&self, prefix: &str) -> Option<&str> {
    self.root()?.namespace_declaration(prefix)
  }

  pub fn to_xml(&self) -> String {
    let mut out = String::new();
    for node in &self.nodes {
      node.write_to(&mut out);
    }
    out
  }
}

impl fmt::Display for Document {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.to_xml())
  }
}
