//! Dublin Core record processing
//!
//! This module turns a Dublin Core XML payload into a [`DcRecord`] with a
//! guaranteed local ID, and derives from it the search index fields and the
//! keys used for record deduplication.

pub mod document;
pub mod fields;
pub mod isbn;
pub mod normalize;
pub mod record;

pub use document::{XmlDocument, XmlElement, XmlNode};
pub use fields::{FieldValue, IndexFields};
pub use record::{DcRecord, DcTag, DedupKeys};
