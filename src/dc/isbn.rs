//! ISBN discovery and ISBN-10 to ISBN-13 conversion

use indexmap::IndexSet;
use once_cell::sync::Lazy;
use regex::Regex;

/// Nine to twelve digits followed by a digit or check character X
static ISBN_CANDIDATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[0-9]{9,12}[0-9xX]").expect("valid ISBN candidate regex"));

/// Convert an ISBN-10 to its ISBN-13 form
///
/// Returns `None` when the input is not a well-formed ISBN-10 or its check
/// digit does not match the other nine digits.
pub fn isbn10_to_13(isbn10: &str) -> Option<String> {
    let chars: Vec<char> = isbn10.chars().collect();
    if chars.len() != 10 {
        return None;
    }

    let mut digits = [0u32; 10];
    for (i, c) in chars.iter().enumerate() {
        digits[i] = match c {
            'x' | 'X' if i == 9 => 10,
            _ => c.to_digit(10)?,
        };
    }

    let weighted: u32 = digits
        .iter()
        .enumerate()
        .map(|(i, d)| (10 - i as u32) * d)
        .sum();
    if weighted % 11 != 0 {
        return None;
    }

    let body = format!("978{}", &isbn10[..9]);

    let sum: u32 = body
        .chars()
        .filter_map(|c| c.to_digit(10))
        .enumerate()
        .map(|(i, d)| if i % 2 == 0 { d } else { d * 3 })
        .sum();
    let check = (10 - sum % 10) % 10;

    Some(format!("{}{}", body, check))
}

/// Find an ISBN in a single identifier value, normalized to ISBN-13
pub fn extract_isbn(identifier: &str) -> Option<String> {
    let cleaned = identifier.replace('-', "");
    let candidate = ISBN_CANDIDATE.find(&cleaned)?.as_str();

    match candidate.len() {
        10 => {
            let converted = isbn10_to_13(candidate);
            if converted.is_none() {
                tracing::debug!("Discarding ISBN-10 candidate with bad check digit: {}", candidate);
            }
            converted
        }
        13 if candidate.chars().all(|c| c.is_ascii_digit()) => Some(candidate.to_string()),
        _ => {
            tracing::debug!("Discarding ISBN candidate of unexpected form: {}", candidate);
            None
        }
    }
}

/// Collect the distinct ISBNs of a record's identifiers in first-seen order
pub fn extract_isbns<'a, I>(identifiers: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    identifiers
        .into_iter()
        .filter_map(extract_isbn)
        .collect::<IndexSet<String>>()
        .into_iter()
        .collect()
}
