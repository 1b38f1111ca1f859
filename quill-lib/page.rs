//! Page schema helpers: paragraphs, runs and their selection state.
//!
//! Element names are matched by namespace URI rather than by prefix. The URI
//! is whatever the page binds to [`NAMESPACE_PREFIX`], so a page that declares
//! a different URI, or re-declares the prefix further down, still resolves.

use std::str::FromStr;

use thiserror::Error;

use crate::markup::{
  Document,
  Element,
  MarkupError,
  Node,
};

pub const NAMESPACE_PREFIX: &str = "one";
pub const PARAGRAPH: &str = "OE";
pub const RUN: &str = "T";
pub const TITLE: &str = "Title";
pub const SELECTED: &str = "selected";

#[derive(Debug, Error)]
pub enum PageError {
  #[error("page does not declare the '{0}' namespace prefix")]
  UnboundPrefix(String),
  #[error(transparent)]
  Markup(#[from] MarkupError),
}

pub type Result<T> = std::result::Result<T, PageError>;

/// Value of a run's `selected` attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionState {
  None,
  Partial,
  All,
}

impl FromStr for SelectionState {
  type Err = String;

  fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
    match s {
      "none" => Ok(Self::None),
      "partial" => Ok(Self::Partial),
      "all" => Ok(Self::All),
      other => Err(format!("unknown selection state '{other}'")),
    }
  }
}

impl SelectionState {
  /// Selection state of `run`. A missing or unrecognized attribute counts as
  /// unselected.
  pub fn of(run: &Element) -> Self {
    run
      .attribute(SELECTED)
      .and_then(|value| value.parse().ok())
      .unwrap_or(Self::None)
  }

  pub fn is_selected(self) -> bool {
    self != Self::None
  }
}

/// Where a run sits on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunContext {
  pub selection: SelectionState,
  /// Inside the page title rather than the body.
  pub in_title:  bool,
}

impl RunContext {
  pub fn is_body_selection(&self) -> bool {
    self.selection.is_selected() && !self.in_title
  }
}

/// In-scope namespace bindings while walking the tree.
#[derive(Default)]
struct Scope {
  bindings: Vec<(String, String)>,
}

impl Scope {
  fn enter(&mut self, element: &Element) -> usize {
    let mark = self.bindings.len();
    for attr in element.attributes() {
      let prefix = match attr.name.strip_prefix("xmlns") {
        Some("") => "",
        Some(rest) => {
          match rest.strip_prefix(':') {
            Some(prefix) => prefix,
            None => continue,
          }
        },
        None => continue,
      };
      self.bindings.push((prefix.to_owned(), attr.value.clone()));
    }
    mark
  }

  fn leave(&mut self, mark: usize) {
    self.bindings.truncate(mark);
  }

  fn resolve(&self, prefix: &str) -> Option<&str> {
    self
      .bindings
      .iter()
      .rev()
      .find(|(bound, _)| bound == prefix)
      .map(|(_, uri)| uri.as_str())
  }

  /// Whether `element`, with its own declarations already entered, is
  /// `{namespace}local`.
  fn is(&self, element: &Element, namespace: &str, local: &str) -> bool {
    element.local_name() == local
      && self.resolve(element.prefix().unwrap_or("")) == Some(namespace)
  }

  /// Like [`Scope::is`] for an element whose declarations are not entered yet.
  fn child_is(&mut self, element: &Element, namespace: &str, local: &str) -> bool {
    let mark = self.enter(element);
    let matched = self.is(element, namespace, local);
    self.leave(mark);
    matched
  }
}

/// The namespace URI runs and paragraphs must belong to.
pub fn page_namespace(doc: &Document) -> Result<String> {
  doc
    .namespace_of_prefix(NAMESPACE_PREFIX)
    .map(str::to_owned)
    .ok_or_else(|| PageError::UnboundPrefix(NAMESPACE_PREFIX.to_owned()))
}

/// Every run of every paragraph in document order.
pub fn runs(doc: &Document) -> Result<Vec<(&Element, RunContext)>> {
  let namespace = page_namespace(doc)?;
  let mut found = Vec::new();
  if let Some(root) = doc.root() {
    collect_runs(root, &mut Scope::default(), &namespace, false, &mut found);
  }
  Ok(found)
}

fn collect_runs<'a>(
  element: &'a Element,
  scope: &mut Scope,
  namespace: &str,
  in_title: bool,
  found: &mut Vec<(&'a Element, RunContext)>,
) {
  let mark = scope.enter(element);
  let in_title = in_title || scope.is(element, namespace, TITLE);
  let paragraph = scope.is(element, namespace, PARAGRAPH);

  for child in element.elements() {
    if paragraph && scope.child_is(child, namespace, RUN) {
      found.push((child, RunContext {
        selection: SelectionState::of(child),
        in_title,
      }));
    } else {
      collect_runs(child, scope, namespace, in_title, found);
    }
  }

  scope.leave(mark);
}

/// Visit every run mutably, in document order.
pub fn for_each_run_mut<E, F>(doc: &mut Document, mut visit: F) -> std::result::Result<(), E>
where
  E: From<PageError>,
  F: FnMut(&mut Element, RunContext) -> std::result::Result<(), E>,
{
  let namespace = page_namespace(doc)?;
  match doc.root_mut() {
    Some(root) => visit_runs(root, &mut Scope::default(), &namespace, false, &mut visit),
    None => Ok(()),
  }
}

fn visit_runs<E, F>(
  element: &mut Element,
  scope: &mut Scope,
  namespace: &str,
  in_title: bool,
  visit: &mut F,
) -> std::result::Result<(), E>
where
  F: FnMut(&mut Element, RunContext) -> std::result::Result<(), E>,
{
  let mark = scope.enter(element);
  let in_title = in_title || scope.is(element, namespace, TITLE);
  let paragraph = scope.is(element, namespace, PARAGRAPH);

  for child in element.children_mut().iter_mut().filter_map(Node::as_element_mut) {
    if paragraph && scope.child_is(child, namespace, RUN) {
      let context = RunContext {
        selection: SelectionState::of(child),
        in_title,
      };
      visit(child, context)?;
    } else {
      visit_runs(child, scope, namespace, in_title, visit)?;
    }
  }

  scope.leave(mark);
  Ok(())
}

/// Whether any run outside the title is at least partly selected.
pub fn has_body_selection(doc: &Document) -> Result<bool> {
  Ok(runs(doc)?.iter().any(|(_, context)| context.is_body_selection()))
}

/// Insert a paragraph holding a single CDATA run right after the first body
/// paragraph that contains a selection. Returns `false` when the page has no
/// such paragraph.
pub fn insert_paragraph_after_selection(doc: &mut Document, literal: &str) -> Result<bool> {
  let namespace = page_namespace(doc)?;
  Ok(match doc.root_mut() {
    Some(root) => insert_after(root, &mut Scope::default(), &namespace, false, literal),
    None => false,
  })
}

fn insert_after(
  element: &mut Element,
  scope: &mut Scope,
  namespace: &str,
  in_title: bool,
  literal: &str,
) -> bool {
  let mark = scope.enter(element);
  let in_title = in_title || scope.is(element, namespace, TITLE);

  let mut index = 0;
  while index < element.children().len() {
    let target = match &element.children()[index] {
      Node::Element(child) if !in_title => selected_paragraph(child, scope, namespace),
      _ => None,
    };

    if let Some(prefix) = target {
      element.insert(index + 1, Node::Element(line_paragraph(prefix.as_deref(), literal)));
      scope.leave(mark);
      return true;
    }

    if let Some(child) = element.children_mut()[index].as_element_mut() {
      if insert_after(child, scope, namespace, in_title, literal) {
        scope.leave(mark);
        return true;
      }
    }
    index += 1;
  }

  scope.leave(mark);
  false
}

/// If `element` is a paragraph with a selected run, the prefix it is written
/// with.
fn selected_paragraph(
  element: &Element,
  scope: &mut Scope,
  namespace: &str,
) -> Option<Option<String>> {
  let mark = scope.enter(element);
  let selected = scope.is(element, namespace, PARAGRAPH)
    && element.elements().any(|child| {
      scope.child_is(child, namespace, RUN) && SelectionState::of(child).is_selected()
    });
  scope.leave(mark);

  selected.then(|| element.prefix().map(str::to_owned))
}

fn line_paragraph(prefix: Option<&str>, literal: &str) -> Element {
  let qualify = |local: &str| {
    match prefix {
      Some(prefix) => format!("{prefix}:{local}"),
      None => local.to_owned(),
    }
  };

  Element::new(qualify(PARAGRAPH))
    .with_child(Node::Element(
      Element::new(qualify(RUN)).with_child(Node::CData(literal.to_owned())),
    ))
}
