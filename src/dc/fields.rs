//! Search index field extraction
//!
//! Builds the field map sent to the search index from a [`DcRecord`]. Every
//! field is always present (empty string or empty list when the record has
//! no value) except `title_sub`, which only exists for titles with a
//! subtitle.

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use super::normalize::strip_trailing_punctuation;
use super::record::{DcRecord, DcTag};

static URL_PREFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^https?").expect("valid URL regex"));

/// Decimal classification code such as a UDC or Dewey number
static CLASSIFICATION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]+\.[0-9]+$").expect("valid classification regex"));

/// Separator between a title and its subtitle
const SUBTITLE_SEPARATOR: &str = " : ";

/// A single index field value
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Single(String),
    Multiple(Vec<String>),
}

/// Ordered map of index field name to value
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct IndexFields(IndexMap<String, FieldValue>);

impl IndexFields {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, name: &str, value: impl Into<String>) {
        self.0.insert(name.to_string(), FieldValue::Single(value.into()));
    }

    pub fn set_all(&mut self, name: &str, values: Vec<String>) {
        self.0.insert(name.to_string(), FieldValue::Multiple(values));
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.0.get(name)
    }

    /// Value of a scalar field
    pub fn single(&self, name: &str) -> Option<&str> {
        match self.0.get(name)? {
            FieldValue::Single(value) => Some(value),
            FieldValue::Multiple(_) => None,
        }
    }

    /// Values of a list field
    pub fn multiple(&self, name: &str) -> Option<&[String]> {
        match self.0.get(name)? {
            FieldValue::Multiple(values) => Some(values),
            FieldValue::Single(_) => None,
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl DcRecord {
    /// Build the search index fields for this record
    ///
    /// `articles` are the non-filing articles used for `title_sort`.
    pub fn to_index_fields(&self, articles: &[String]) -> IndexFields {
        let mut fields = IndexFields::new();

        fields.set("ctrlnum", self.id());
        fields.set("fullrecord", self.to_xml());

        let all_fields = self
            .document()
            .root()
            .elements()
            .map(|element| strip_trailing_punctuation(element.text().trim()))
            .collect();
        fields.set_all("allfields", all_fields);

        fields.set_all("language", self.languages());
        fields.set("format", self.first_or_empty(DcTag::Type));

        let author = strip_trailing_punctuation(self.first_or_empty(DcTag::Creator));
        fields.set("author", author.clone());
        fields.set("author-letter", author);
        fields.set_all("author2", self.stripped_values(DcTag::Contributor));

        let title = self.title(false, articles);
        fields.set("title", title.clone());
        fields.set("title_full", title.clone());
        let mut parts = title.splitn(2, SUBTITLE_SEPARATOR);
        fields.set("title_short", parts.next().unwrap_or_default());
        if let Some(subtitle) = parts.next() {
            fields.set("title_sub", subtitle);
        }
        fields.set("title_sort", self.title(true, articles));

        fields.set(
            "publisher",
            strip_trailing_punctuation(self.first_or_empty(DcTag::Publisher)),
        );
        fields.set("publishDate", self.publication_year().unwrap_or_default());
        fields.set_all("isbn", self.isbns());

        let topics = self.stripped_values(DcTag::Subject);
        fields.set_all("topic", topics.clone());
        fields.set_all("topic_facet", topics);

        let (url, contents) = self.links_and_contents();
        fields.set("url", url.unwrap_or_default());
        fields.set_all("contents", contents);

        fields
    }

    /// Resolve the record URL and the free-text descriptions
    ///
    /// The last URL wins: identifiers are scanned first and any URL found in
    /// the descriptions afterwards overrides them. Descriptions holding a
    /// classification code are dropped.
    fn links_and_contents(&self) -> (Option<String>, Vec<String>) {
        let mut url = None;
        for identifier in self.stripped_values(DcTag::Identifier) {
            if URL_PREFIX.is_match(&identifier) {
                url = Some(identifier);
            }
        }

        let mut contents = Vec::new();
        for description in self.stripped_values(DcTag::Description) {
            if URL_PREFIX.is_match(&description) {
                url = Some(description);
            } else if !CLASSIFICATION.is_match(&description) {
                contents.push(description);
            }
        }

        (url, contents)
    }
}
