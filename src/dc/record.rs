//! Dublin Core record
//!
//! Wraps a parsed payload, resolves the local record ID at construction and
//! provides the single-value accessors used for indexing and deduplication.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use utoipa::ToSchema;

use super::document::XmlDocument;
use super::isbn;
use super::normalize::{
    fold_case, strip_leading_punctuation, strip_trailing_punctuation, trim_xml_whitespace,
};
use crate::error::DcError;

static FOUR_DIGIT_YEAR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{4}$").expect("valid year regex"));

static LANGUAGE_CODE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z]{2,3}$").expect("valid language code regex"));

/// Language codes that do not name a language
const NON_LANGUAGE_CODES: &[&str] = &["zxx", "und"];

/// Format reported to deduplication when the record has no type
const UNKNOWN_FORMAT: &str = "Other";

/// Known Dublin Core element names
///
/// Child elements are matched on their local name, so `dc:title` and `title`
/// are both [`DcTag::Title`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DcTag {
    RecordId,
    Title,
    Creator,
    Subject,
    Description,
    Publisher,
    Contributor,
    Date,
    Type,
    Format,
    Identifier,
    Source,
    Language,
    Relation,
    Coverage,
    Rights,
}

impl DcTag {
    /// Resolve an element's local name
    pub fn from_local_name(name: &str) -> Option<Self> {
        let tag = match name {
            "recordID" => DcTag::RecordId,
            "title" => DcTag::Title,
            "creator" => DcTag::Creator,
            "subject" => DcTag::Subject,
            "description" => DcTag::Description,
            "publisher" => DcTag::Publisher,
            "contributor" => DcTag::Contributor,
            "date" => DcTag::Date,
            "type" => DcTag::Type,
            "format" => DcTag::Format,
            "identifier" => DcTag::Identifier,
            "source" => DcTag::Source,
            "language" => DcTag::Language,
            "relation" => DcTag::Relation,
            "coverage" => DcTag::Coverage,
            "rights" => DcTag::Rights,
            _ => return None,
        };
        Some(tag)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DcTag::RecordId => "recordID",
            DcTag::Title => "title",
            DcTag::Creator => "creator",
            DcTag::Subject => "subject",
            DcTag::Description => "description",
            DcTag::Publisher => "publisher",
            DcTag::Contributor => "contributor",
            DcTag::Date => "date",
            DcTag::Type => "type",
            DcTag::Format => "format",
            DcTag::Identifier => "identifier",
            DcTag::Source => "source",
            DcTag::Language => "language",
            DcTag::Relation => "relation",
            DcTag::Coverage => "coverage",
            DcTag::Rights => "rights",
        }
    }
}

/// Keys handed to the deduplication component
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct DedupKeys {
    pub full_title: String,
    pub title: String,
    pub filing_title: String,
    pub main_author: String,
    pub isbns: Vec<String>,
    pub format: String,
    pub publication_year: Option<String>,
    pub series_issn: Option<String>,
    pub series_numbering: Option<String>,
    pub page_count: Option<String>,
}

/// A Dublin Core record with a guaranteed local ID
#[derive(Debug, Clone)]
pub struct DcRecord {
    document: XmlDocument,
    values: HashMap<DcTag, Vec<String>>,
    id: String,
    oai_id: String,
    source: String,
}

impl DcRecord {
    /// Build a record from a payload
    ///
    /// When the payload has no non-empty `recordID`, one is derived from
    /// `oai_id` by taking everything after its second colon
    /// (`oai:source:local-id` gives `local-id`) and written into the document.
    pub fn new(data: &str, oai_id: &str, source: &str) -> Result<Self, DcError> {
        let mut document = XmlDocument::parse(data)?;

        let embedded = document
            .root()
            .elements()
            .find(|e| DcTag::from_local_name(e.local_name()) == Some(DcTag::RecordId))
            .map(|e| e.text());

        let id = match embedded {
            Some(id) if !id.trim().is_empty() => id,
            existing => {
                let id = local_id_from_oai_id(oai_id)?;
                tracing::debug!("Derived record ID '{}' from '{}'", id, oai_id);
                let root = document.root_mut();
                match existing {
                    Some(_) => {
                        if let Some(element) = root
                            .elements_mut()
                            .find(|e| e.local_name() == DcTag::RecordId.as_str())
                        {
                            element.set_text(id.clone());
                        }
                    }
                    None => root.append_text_element(DcTag::RecordId.as_str(), id.clone()),
                }
                id
            }
        };

        let mut values: HashMap<DcTag, Vec<String>> = HashMap::new();
        for element in document.root().elements() {
            if let Some(tag) = DcTag::from_local_name(element.local_name()) {
                values.entry(tag).or_default().push(element.text());
            }
        }

        Ok(Self {
            document,
            values,
            id,
            oai_id: oai_id.to_string(),
            source: source.to_string(),
        })
    }

    /// Local record ID, never empty
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn oai_id(&self) -> &str {
        &self.oai_id
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn document(&self) -> &XmlDocument {
        &self.document
    }

    /// Storage form: the export form with whitespace between tags removed
    pub fn serialize(&self) -> String {
        trim_xml_whitespace(&self.document.to_xml())
    }

    /// Export form
    pub fn to_xml(&self) -> String {
        self.document.to_xml()
    }

    /// All values of a tag, verbatim, in document order
    pub fn values(&self, tag: DcTag) -> &[String] {
        self.values.get(&tag).map(Vec::as_slice).unwrap_or(&[])
    }

    /// First value of a tag, verbatim
    pub fn first(&self, tag: DcTag) -> Option<&str> {
        self.values(tag).first().map(String::as_str)
    }

    /// First value of a tag, or an empty string
    pub fn first_or_empty(&self, tag: DcTag) -> &str {
        self.first(tag).unwrap_or("")
    }

    /// All values of a tag with trailing punctuation stripped
    pub fn stripped_values(&self, tag: DcTag) -> Vec<String> {
        self.values(tag)
            .iter()
            .map(|v| strip_trailing_punctuation(v))
            .collect()
    }

    /// Language codes, without "no linguistic content" and "undetermined"
    pub fn languages(&self) -> Vec<String> {
        self.first_or_empty(DcTag::Language)
            .split(' ')
            .filter(|code| LANGUAGE_CODE.is_match(code) && !NON_LANGUAGE_CODES.contains(code))
            .map(String::from)
            .collect()
    }

    /// Title exactly as it appears in the record
    pub fn full_title(&self) -> String {
        self.first_or_empty(DcTag::Title).to_string()
    }

    /// Title without surrounding whitespace and trailing punctuation
    ///
    /// With `for_filing`, leading punctuation and the first matching
    /// non-filing article are removed and the result is lowercased.
    pub fn title(&self, for_filing: bool, articles: &[String]) -> String {
        let title = strip_trailing_punctuation(self.first_or_empty(DcTag::Title).trim());
        if !for_filing {
            return title;
        }

        let mut title = strip_leading_punctuation(&title);
        if let Some(rest) = articles
            .iter()
            .find_map(|article| strip_article(&title, article))
        {
            title = rest.to_string();
        }
        fold_case(&strip_leading_punctuation(&title))
    }

    /// Main author exactly as it appears in the record
    pub fn main_author(&self) -> String {
        self.first_or_empty(DcTag::Creator).to_string()
    }

    /// ISBNs in ISBN-13 form without dashes
    pub fn isbns(&self) -> Vec<String> {
        isbn::extract_isbns(self.values(DcTag::Identifier).iter().map(String::as_str))
    }

    /// Record type, or "Other" when the record has none
    pub fn format(&self) -> String {
        match self.first(DcTag::Type) {
            Some(kind) if !kind.is_empty() => kind.to_string(),
            _ => UNKNOWN_FORMAT.to_string(),
        }
    }

    /// First date that is exactly a four-digit year
    pub fn publication_year(&self) -> Option<String> {
        self.values(DcTag::Date)
            .iter()
            .find(|date| FOUR_DIGIT_YEAR.is_match(date))
            .cloned()
    }

    /// Dublin Core carries no series ISSN
    pub fn series_issn(&self) -> Option<String> {
        None
    }

    /// Dublin Core carries no series numbering
    pub fn series_numbering(&self) -> Option<String> {
        None
    }

    /// Dublin Core carries no page count
    pub fn page_count(&self) -> Option<String> {
        None
    }

    pub fn dedup_keys(&self, articles: &[String]) -> DedupKeys {
        DedupKeys {
            full_title: self.full_title(),
            title: self.title(false, articles),
            filing_title: self.title(true, articles),
            main_author: self.main_author(),
            isbns: self.isbns(),
            format: self.format(),
            publication_year: self.publication_year(),
            series_issn: self.series_issn(),
            series_numbering: self.series_numbering(),
            page_count: self.page_count(),
        }
    }
}

/// Everything after the second colon of an origin identifier
fn local_id_from_oai_id(oai_id: &str) -> Result<String, DcError> {
    let local = oai_id
        .split_once(':')
        .and_then(|(_, rest)| rest.split_once(':'))
        .map(|(_, local)| local)
        .filter(|local| !local.trim().is_empty())
        .ok_or_else(|| DcError::AmbiguousOriginIdentifier(oai_id.to_string()))?;
    Ok(local.to_string())
}

/// Remainder of `title` when it starts with `article`, ignoring case
fn strip_article<'a>(title: &'a str, article: &str) -> Option<&'a str> {
    if article.is_empty() {
        return None;
    }
    let mut title_chars = title.char_indices();
    for article_char in article.chars() {
        let (_, title_char) = title_chars.next()?;
        if !title_char.to_lowercase().eq(article_char.to_lowercase()) {
            return None;
        }
    }
    let end = title_chars.next().map(|(i, _)| i).unwrap_or(title.len());
    Some(&title[end..])
}
