//! Read-modify-write cycles against a store, the way commands drive them.

use quill_lib::{
  markup::Document,
  page::{
    SelectionState,
    runs,
  },
  store::{
    DocumentStore,
    MemoryStore,
  },
  transform::{
    Case,
    apply_text_transform,
  },
};

const PAGE: &str = r#"<?xml version="1.0"?>
<one:Page xmlns:one="http://schemas.microsoft.com/office/onenote/2013/onenote" ID="{8B1}" name="Notes">
  <one:Title lang="en-US">
    <one:OE><one:T><![CDATA[Meeting notes]]></one:T></one:OE>
  </one:Title>
  <one:Outline>
    <one:OEChildren>
      <one:OE><one:T selected="all"><![CDATA[<span style='font-weight:bold'>Hi</span> there]]></one:T></one:OE>
      <one:OE><one:T selected="partial"><![CDATA[keep me]]></one:T></one:OE>
      <one:OE><one:T><![CDATA[also keep]]></one:T></one:OE>
    </one:OEChildren>
  </one:Outline>
</one:Page>"#;

fn transform_page(store: &MemoryStore, case: Case) -> usize {
  let mut doc = store.current_document().unwrap();
  let count = apply_text_transform(&mut doc, |text| case.apply(text)).unwrap();
  store.update_document(&doc).unwrap();
  count
}

#[test]
fn test_uppercase_cycle_touches_only_selected_text() {
  let store = MemoryStore::new(PAGE);
  assert_eq!(transform_page(&store, Case::Upper), 1);

  let expected = PAGE.replace(
    "<span style='font-weight:bold'>Hi</span> there",
    "<span style='font-weight:bold'>HI</span> THERE",
  );
  assert_eq!(store.xml().unwrap(), expected);
  assert_eq!((store.reads(), store.writes()), (1, 1));
}

#[test]
fn test_lowercase_after_uppercase() {
  let store = MemoryStore::new(PAGE);
  transform_page(&store, Case::Upper);
  transform_page(&store, Case::Lower);

  let expected = PAGE.replace(
    "<span style='font-weight:bold'>Hi</span> there",
    "<span style='font-weight:bold'>hi</span> there",
  );
  assert_eq!(store.xml().unwrap(), expected);
}

#[test]
fn test_selection_states_are_reported() {
  let doc = Document::parse(PAGE).unwrap();
  let states: Vec<_> = runs(&doc)
    .unwrap()
    .into_iter()
    .map(|(_, context)| (context.selection, context.in_title))
    .collect();

  assert_eq!(states, vec![
    (SelectionState::None, true),
    (SelectionState::All, false),
    (SelectionState::Partial, false),
    (SelectionState::None, false),
  ]);
}

#[test]
fn test_untouched_page_round_trips() {
  let store = MemoryStore::new(PAGE);
  let doc = store.current_document().unwrap();
  store.update_document(&doc).unwrap();
  assert_eq!(store.xml().unwrap(), PAGE);
}
