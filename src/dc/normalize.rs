//! Text normalization helpers shared by the record accessors
//!
//! Punctuation stripping follows the usual cataloguing conventions: ISBD
//! separators (` / `, ` : `, ` ; `, ` = `) dangling at the end of a value are
//! removed, and so is a final period unless it closes an initial or an
//! ellipsis.

use once_cell::sync::Lazy;
use regex::Regex;

/// Characters removed from the end of a value
const TRAILING_PUNCTUATION: &[char] = &[' ', '/', ':', ';', ',', '=', '(', '['];

/// Characters removed from the start of a filing value
const LEADING_PUNCTUATION: &[char] = &[
    ' ', '\t', '\\', '#', '*', '!', '¡', '?', '/', ':', ';', '.', ',', '=', '(', '[', '\'', '"',
    '´', '`', '”', '“',
];

static INTER_TAG_WHITESPACE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r">\s+<").expect("valid inter-tag whitespace regex"));

/// Strip trailing punctuation and whitespace from a value
pub fn strip_trailing_punctuation(value: &str) -> String {
    let trimmed = value.trim_end_matches(|c: char| c.is_whitespace() || TRAILING_PUNCTUATION.contains(&c));

    match trimmed.strip_suffix('.') {
        Some(rest) if !keeps_final_period(rest) => rest
            .trim_end_matches(|c: char| c.is_whitespace() || TRAILING_PUNCTUATION.contains(&c))
            .to_string(),
        _ => trimmed.to_string(),
    }
}

/// A final period is kept after an ellipsis ("...") or a lone initial ("Smith, J.")
fn keeps_final_period(before_period: &str) -> bool {
    if before_period.ends_with("..") {
        return true;
    }
    let mut chars = before_period.chars().rev();
    match (chars.next(), chars.next()) {
        (Some(last), None) => last.is_alphabetic(),
        (Some(last), Some(prev)) => last.is_alphabetic() && !prev.is_alphanumeric(),
        _ => false,
    }
}

/// Strip leading punctuation and whitespace from a value
pub fn strip_leading_punctuation(value: &str) -> String {
    value
        .trim_start_matches(|c: char| c.is_whitespace() || LEADING_PUNCTUATION.contains(&c))
        .to_string()
}

/// Remove whitespace-only runs between tags so re-serialization is stable
pub fn trim_xml_whitespace(xml: &str) -> String {
    INTER_TAG_WHITESPACE.replace_all(xml.trim(), "><").into_owned()
}

/// Lowercase a value with full Unicode case mapping
pub fn fold_case(value: &str) -> String {
    value.to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_trailing_punctuation() {
        assert_eq!(strip_trailing_punctuation("The Great Book."), "The Great Book");
        assert_eq!(strip_trailing_punctuation("Title /"), "Title");
        assert_eq!(strip_trailing_punctuation("Helsinki :"), "Helsinki");
        assert_eq!(strip_trailing_punctuation("Otava,"), "Otava");
        assert_eq!(strip_trailing_punctuation("Title. ;"), "Title");
        assert_eq!(strip_trailing_punctuation(""), "");
    }

    #[test]
    fn test_strip_trailing_punctuation_keeps_initials() {
        assert_eq!(strip_trailing_punctuation("Tolkien, J.R.R."), "Tolkien, J.R.R.");
        assert_eq!(strip_trailing_punctuation("Smith, J."), "Smith, J.");
        assert_eq!(strip_trailing_punctuation("And then..."), "And then...");
        assert_eq!(strip_trailing_punctuation("Vol. 2."), "Vol. 2");
    }

    #[test]
    fn test_strip_leading_punctuation() {
        assert_eq!(strip_leading_punctuation("\"Quoted\" title"), "Quoted\" title");
        assert_eq!(strip_leading_punctuation(" ...and more"), "and more");
        assert_eq!(strip_leading_punctuation("[Untitled]"), "Untitled]");
    }

    #[test]
    fn test_trim_xml_whitespace() {
        let xml = "<dc>\n  <title>A  B</title>\n  <creator>C</creator>\n</dc>\n";
        assert_eq!(trim_xml_whitespace(xml), "<dc><title>A  B</title><creator>C</creator></dc>");
    }

    #[test]
    fn test_fold_case() {
        assert_eq!(fold_case("ÄÖ Straße"), "äö straße");
    }
}
