//! Per-campaign checklist encoding.
//!
//! A campaign's progress against a global status is stored as free text: a
//! comma-separated list of 1-based checkbox indices (`""` means nothing is
//! checked). Blank and non-numeric tokens are ignored. A token that reads as
//! a number but is not a usable index (fractional, exponent form, or too
//! large for an `i64`) counts as out of range.

use std::collections::BTreeSet;

use crate::error::CoreError;

/// One comma-separated token of a `checked_boxes` value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token<'a> {
    Ignored,
    Index(i64),
    /// Numeric, but not representable as a checkbox index.
    NotAnIndex(&'a str),
}

fn classify(token: &str) -> Token<'_> {
    let token = token.trim();
    if token.is_empty() {
        return Token::Ignored;
    }
    if let Ok(n) = token.parse::<i64>() {
        return Token::Index(n);
    }
    match token.parse::<f64>() {
        Ok(value) if !value.is_nan() => Token::NotAnIndex(token),
        _ => Token::Ignored,
    }
}

/// Parse a stored `checked_boxes` value into its integer indices.
///
/// Order and duplicates are preserved; anything that is not an integer is
/// skipped.
pub fn parse_checked_boxes(raw: &str) -> Vec<i64> {
    raw.split(',')
        .filter_map(|token| match classify(token) {
            Token::Index(n) => Some(n),
            _ => None,
        })
        .collect()
}

/// Validate a submitted `checked_boxes` value against a status.
///
/// Every numeric token must be an index in `1..=checkbox_count`. Returns the
/// set of checked indices on success.
pub fn validate_checked_boxes(raw: &str, checkbox_count: i32) -> Result<BTreeSet<i64>, CoreError> {
    let max = i64::from(checkbox_count);
    let out_of_range = |got: &dyn std::fmt::Display| {
        CoreError::Validation(format!(
            "Checkbox numbers must be between 1 and {checkbox_count}, got {got}"
        ))
    };

    let mut boxes = BTreeSet::new();
    for token in raw.split(',') {
        match classify(token) {
            Token::Ignored => {}
            Token::Index(n) if (1..=max).contains(&n) => {
                boxes.insert(n);
            }
            Token::Index(n) => return Err(out_of_range(&n)),
            Token::NotAnIndex(text) => return Err(out_of_range(&text)),
        }
    }
    Ok(boxes)
}
