//! Scoped numbering rules for locations and entries.
//!
//! Locations are numbered uniquely within their campaign, entries uniquely
//! within their location. The rules here decide whether a candidate number
//! may be assigned; looking up the current holder of a number is the
//! caller's job (see the `find_id_by_number` repository helpers).

use std::collections::HashSet;
use std::fmt;

use crate::error::CoreError;
use crate::types::DbId;

/// The parent within which a `number` must be unique.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberScope {
    /// Location numbers, unique per campaign.
    Campaign,
    /// Entry numbers, unique per location.
    Location,
}

impl NumberScope {
    /// Entity name of the numbered child, used in error messages.
    pub fn child_entity(self) -> &'static str {
        match self {
            NumberScope::Campaign => "Location",
            NumberScope::Location => "Entry",
        }
    }
}

impl fmt::Display for NumberScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumberScope::Campaign => f.write_str("campaign"),
            NumberScope::Location => f.write_str("location"),
        }
    }
}

/// Numbers start at 1.
pub fn validate_number(scope: NumberScope, number: i32) -> Result<(), CoreError> {
    if number < 1 {
        return Err(CoreError::Validation(format!(
            "{} number must be at least 1, got {number}",
            scope.child_entity()
        )));
    }
    Ok(())
}

/// Whether assigning `candidate` needs a sibling lookup at all.
///
/// `current` is `None` for a new record. A record keeping its own number
/// never conflicts with itself, so no lookup is needed.
pub fn requires_check(current: Option<i32>, candidate: i32) -> bool {
    current != Some(candidate)
}

/// Decide whether `candidate` may be assigned to `record`.
///
/// `holder` is the id of the sibling currently holding `candidate` in the
/// same scope, if any. `record` is `None` on create.
pub fn ensure_available(
    scope: NumberScope,
    candidate: i32,
    holder: Option<DbId>,
    record: Option<DbId>,
) -> Result<(), CoreError> {
    match holder {
        Some(holder_id) if Some(holder_id) != record => Err(CoreError::Conflict(format!(
            "{} number {candidate} already exists in this {scope}",
            scope.child_entity()
        ))),
        _ => Ok(()),
    }
}

/// First number appearing more than once, in input order.
pub fn find_duplicate<I>(numbers: I) -> Option<i32>
where
    I: IntoIterator<Item = i32>,
{
    let mut seen = HashSet::new();
    numbers.into_iter().find(|n| !seen.insert(*n))
}

/// Validate a batch of numbers destined for one scope.
///
/// Used when several children are written together (location with nested
/// entries, entries replacement): each must be valid and the batch must not
/// collide with itself.
pub fn ensure_distinct<I>(scope: NumberScope, numbers: I) -> Result<(), CoreError>
where
    I: IntoIterator<Item = i32>,
{
    let numbers: Vec<i32> = numbers.into_iter().collect();
    for &n in &numbers {
        validate_number(scope, n)?;
    }
    if let Some(dup) = find_duplicate(numbers) {
        return Err(CoreError::Conflict(format!(
            "{} number {dup} appears more than once in this {scope}",
            scope.child_entity()
        )));
    }
    Ok(())
}
