//! Document model and selection-aware editing for hosted notebook pages.
//!
//! A page arrives from the host as XML. [`markup::Document`] keeps the source
//! text of every node so a page can be read, edited in a few places and handed
//! back without disturbing anything that was not touched. Runs of text carry
//! their formatting as an HTML-like fragment inside a CDATA block; that inner
//! layer is only parsed on demand through [`fragment::Fragment`].
//!
//! # Example
//!
//! ```
//! use quill_lib::{
//!   markup::Document,
//!   transform::{
//!     Case,
//!     apply_text_transform,
//!   },
//! };
//!
//! let xml = r#"<one:Page xmlns:one="urn:notes"><one:OE><one:T selected="all"><![CDATA[<b>Hi</b> there]]></one:T></one:OE></one:Page>"#;
//! let mut page = Document::parse(xml).unwrap();
//! let rewritten = apply_text_transform(&mut page, |text| Case::Upper.apply(text)).unwrap();
//!
//! assert_eq!(rewritten, 1);
//! assert!(page.to_xml().contains("<![CDATA[<b>HI</b> THERE]]>"));
//! ```

use smartstring::{
  LazyCompact,
  SmartString,
};

pub mod case_convention;
pub mod fragment;
pub mod markup;
pub mod page;
pub mod store;
pub mod transform;

pub type Tendril = SmartString<LazyCompact>;
