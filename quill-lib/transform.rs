//! Text transforms over fully-selected runs.

use thiserror::Error;

pub use crate::case_convention::Case;
use crate::{
  fragment::Fragment,
  markup::{
    Document,
    MarkupError,
    Node,
  },
  page::{
    PageError,
    SelectionState,
    for_each_run_mut,
  },
};

#[derive(Debug, Error)]
pub enum TransformError {
  #[error(transparent)]
  Page(#[from] PageError),
  #[error("run content is not well-formed: {0}")]
  Fragment(#[from] MarkupError),
}

pub type Result<T> = std::result::Result<T, TransformError>;

/// Apply `transform` to the text of every run whose `selected` attribute is
/// `all`.
///
/// Only runs whose content starts with a CDATA block are touched; the block is
/// parsed as inline markup, its text nodes rewritten and the block replaced in
/// place. Partly selected runs and plain-text runs are skipped. Returns the
/// number of runs rewritten.
///
/// On error the page may already hold some rewritten runs; callers discard it
/// instead of committing.
pub fn apply_text_transform<F>(doc: &mut Document, mut transform: F) -> Result<usize>
where
  F: FnMut(&str) -> String,
{
  edit_selected_fragments(doc, |fragment| Ok(fragment.map_text(&mut transform)?))
}

/// Give the content of every fully-selected CDATA run the inline `css` style.
/// Returns the number of runs restyled.
pub fn apply_inline_style(doc: &mut Document, css: &str) -> Result<usize> {
  edit_selected_fragments(doc, |fragment| {
    fragment.set_style(css);
    Ok(())
  })
}

/// Parse the CDATA block of every fully-selected run, hand it to `edit` and
/// write it back in place.
pub fn edit_selected_fragments<F>(doc: &mut Document, mut edit: F) -> Result<usize>
where
  F: FnMut(&mut Fragment) -> Result<()>,
{
  let mut rewritten = 0;

  for_each_run_mut(doc, |run, context| -> Result<()> {
    if context.selection != SelectionState::All {
      return Ok(());
    }

    let Some((index, literal)) = leading_cdata(run.children()) else {
      log::trace!("skipping selected run without a CDATA block");
      return Ok(());
    };

    let mut fragment = Fragment::parse(literal)?;
    edit(&mut fragment)?;
    run.children_mut()[index] = Node::CData(fragment.to_literal());
    rewritten += 1;
    Ok(())
  })?;

  Ok(rewritten)
}

/// The run's first meaningful child when it is a CDATA block, with its index.
/// Indentation around the block is not content.
pub(crate) fn leading_cdata(children: &[Node]) -> Option<(usize, &str)> {
  let index = children.iter().position(|node| !is_blank(node))?;
  match &children[index] {
    Node::CData(literal) => Some((index, literal)),
    _ => None,
  }
}

fn is_blank(node: &Node) -> bool {
  matches!(node, Node::Text(text) if text.raw().chars().all(|c| c.is_ascii_whitespace()))
}

#[cfg(test)]
mod tests {
  use quickcheck::quickcheck;

  use super::*;

  const NS: &str = "http://schemas.microsoft.com/office/onenote/2013/onenote";

  fn page(body: &str) -> Document {
    Document::parse(&format!("<one:Page xmlns:one=\"{NS}\">{body}</one:Page>")).unwrap()
  }

  fn upper(doc: &mut Document) -> usize {
    apply_text_transform(doc, |text| Case::Upper.apply(text)).unwrap()
  }

  #[test]
  fn test_uppercase_selected_cdata() {
    let mut doc = page("<one:OE><one:T selected=\"all\"><![CDATA[<b>Hi</b> there]]></one:T></one:OE>");
    assert_eq!(upper(&mut doc), 1);
    assert_eq!(
      doc.to_xml(),
      format!(
        "<one:Page xmlns:one=\"{NS}\"><one:OE><one:T selected=\"all\"><![CDATA[<b>HI</b> \
         THERE]]></one:T></one:OE></one:Page>"
      )
    );
  }

  #[test]
  fn test_lowercase_selected_cdata() {
    let mut doc = page(
      "<one:OE><one:T selected=\"all\"><![CDATA[<span \
       style='font-style:italic'>LOUD</span>]]></one:T></one:OE>",
    );
    let count = apply_text_transform(&mut doc, |text| Case::Lower.apply(text)).unwrap();
    assert_eq!(count, 1);
    assert!(
      doc
        .to_xml()
        .contains("<![CDATA[<span style='font-style:italic'>loud</span>]]>")
    );
  }

  #[test]
  fn test_partial_and_unselected_runs_are_untouched() {
    let body = concat!(
      "<one:OE>",
      "<one:T selected=\"partial\"><![CDATA[part]]></one:T>",
      "<one:T selected=\"none\"><![CDATA[none]]></one:T>",
      "<one:T><![CDATA[bare]]></one:T>",
      "<one:T selected=\"all\"><![CDATA[all]]></one:T>",
      "</one:OE>",
    );
    let mut doc = page(body);
    assert_eq!(upper(&mut doc), 1);

    let xml = doc.to_xml();
    assert!(xml.contains("<![CDATA[part]]>"));
    assert!(xml.contains("<![CDATA[none]]>"));
    assert!(xml.contains("<![CDATA[bare]]>"));
    assert!(xml.contains("<![CDATA[ALL]]>"));
  }

  #[test]
  fn test_plain_text_runs_are_skipped() {
    let mut doc = page("<one:OE><one:T selected=\"all\">plain &amp; simple</one:T></one:OE>");
    let before = doc.to_xml();
    assert_eq!(upper(&mut doc), 0);
    assert_eq!(doc.to_xml(), before);
  }

  #[test]
  fn test_title_runs_are_transformed_too() {
    let mut doc = page(
      "<one:Title><one:OE><one:T selected=\"all\"><![CDATA[title]]></one:T></one:OE></one:Title>",
    );
    assert_eq!(upper(&mut doc), 1);
    assert!(doc.to_xml().contains("<![CDATA[TITLE]]>"));
  }

  #[test]
  fn test_identity_is_byte_identical() {
    let body = concat!(
      "<one:OE><one:T selected=\"all\"><![CDATA[<span style='font-weight:bold' ",
      "lang=\"en-US\">a&nbsp;b</span><br/>&amp; <i >c</i>&#65;<b>Hi</b >]]></one:T></one:OE>",
    );
    let mut doc = page(body);
    let before = doc.to_xml();
    let count = apply_text_transform(&mut doc, |text| text.to_owned()).unwrap();
    assert_eq!(count, 1);
    assert_eq!(doc.to_xml(), before);
  }

  #[test]
  fn test_indented_run_is_transformed() {
    let mut doc = page(concat!(
      "\n  <one:OE>\n    <one:T selected=\"all\">\n      ",
      "<![CDATA[<b>Hi</b> there]]>\n    </one:T>\n  </one:OE>\n",
    ));
    assert_eq!(upper(&mut doc), 1);
    assert_eq!(
      doc.to_xml(),
      format!(
        "<one:Page xmlns:one=\"{NS}\">\n  <one:OE>\n    <one:T selected=\"all\">\n      \
         <![CDATA[<b>HI</b> THERE]]>\n    </one:T>\n  </one:OE>\n</one:Page>"
      )
    );
  }

  #[test]
  fn test_text_before_cdata_is_not_skipped() {
    let mut doc = page("<one:OE><one:T selected=\"all\">lead<![CDATA[tail]]></one:T></one:OE>");
    assert_eq!(upper(&mut doc), 0);
    assert!(doc.to_xml().contains("lead<![CDATA[tail]]>"));
  }

  #[test]
  fn test_inline_style_wraps_selected_runs() {
    let mut doc = page(concat!(
      "<one:OE><one:T selected=\"all\"><![CDATA[<b>Hi</b> there]]></one:T></one:OE>",
      "<one:OE><one:T selected=\"partial\"><![CDATA[Keep]]></one:T></one:OE>",
    ));
    assert_eq!(apply_inline_style(&mut doc, "color:#2e74b5").unwrap(), 1);

    let xml = doc.to_xml();
    assert!(xml.contains("<![CDATA[<span style=\"color:#2e74b5\"><b>Hi</b> there</span>]]>"));
    assert!(xml.contains("<![CDATA[Keep]]>"));

    // Restyling replaces the span's style.
    assert_eq!(apply_inline_style(&mut doc, "color:#000000").unwrap(), 1);
    assert!(doc.to_xml().contains("<![CDATA[<span style=\"color:#000000\"><b>Hi</b> there</span>]]>"));
  }

  #[test]
  fn test_malformed_fragment_is_an_error() {
    let mut doc = page("<one:OE><one:T selected=\"all\"><![CDATA[<b>open]]></one:T></one:OE>");
    assert!(matches!(
      apply_text_transform(&mut doc, |text| text.to_owned()),
      Err(TransformError::Fragment(_))
    ));
  }

  #[test]
  fn test_missing_namespace_is_an_error() {
    let mut doc = Document::parse("<Page><OE><T selected=\"all\"><![CDATA[x]]></T></OE></Page>").unwrap();
    assert!(matches!(
      apply_text_transform(&mut doc, |text| text.to_owned()),
      Err(TransformError::Page(PageError::UnboundPrefix(_)))
    ));
  }

  fn cdata_page(words: &[String]) -> Document {
    let literal: String = words
      .iter()
      .map(|word| {
        let word: String = word
          .chars()
          .filter(|c| c.is_ascii_alphanumeric() || *c == ' ')
          .collect();
        format!("<b>{word}</b> {word}")
      })
      .collect();
    page(&format!(
      "<one:OE><one:T selected=\"all\"><![CDATA[{literal}]]></one:T></one:OE>"
    ))
  }

  quickcheck! {
    fn uppercase_is_idempotent(words: Vec<String>) -> bool {
      let mut once = cdata_page(&words);
      upper(&mut once);
      let mut twice = once.clone();
      upper(&mut twice);
      once.to_xml() == twice.to_xml()
    }

    fn identity_round_trips(words: Vec<String>) -> bool {
      let mut doc = cdata_page(&words);
      let before = doc.to_xml();
      apply_text_transform(&mut doc, |text| text.to_owned()).unwrap();
      doc.to_xml() == before
    }
  }
}
