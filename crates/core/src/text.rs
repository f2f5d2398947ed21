//! Free-text normalisation shared by every aggregate.

use crate::error::CoreError;

/// Trim `value` and reject it if nothing is left.
///
/// Returns the trimmed text, which is what gets persisted.
pub fn require_text(field: &str, value: &str) -> Result<String, CoreError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation(format!("{field} is required")));
    }
    Ok(trimmed.to_string())
}

/// Collapse an empty string to `None`.
///
/// Optional text fields on create treat `""` the same as absent.
pub fn empty_to_none(value: Option<&str>) -> Option<String> {
    value.filter(|v| !v.is_empty()).map(str::to_string)
}
