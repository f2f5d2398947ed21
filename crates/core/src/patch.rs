//! Partial update merge policies.
//!
//! Two policies coexist as separate functions:
//!
//! - [`coalesce`]: an absent (or `null`) incoming value keeps the existing
//!   one; anything else, including `false` and `0`, replaces it. Update DTOs
//!   model these fields as plain `Option<T>`.
//! - [`apply_presence`]: an absent key keeps the existing value, while an
//!   explicit `null` clears it. Update DTOs model these fields as
//!   [`Patch<T>`] with `#[serde(default)]`.

use serde::{Deserialize, Deserializer};

/// Tri-state field of a partial update.
///
/// Deserializes `null` as [`Patch::Clear`] and any value as [`Patch::Set`].
/// A missing key never reaches the deserializer, so the field must carry
/// `#[serde(default)]` to come out as [`Patch::Keep`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Patch<T> {
    /// Key absent from the input.
    Keep,
    /// Key present with `null`.
    Clear,
    /// Key present with a value.
    Set(T),
}

impl<T> Default for Patch<T> {
    fn default() -> Self {
        Patch::Keep
    }
}

impl<'de, T> Deserialize<'de> for Patch<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Option::<T>::deserialize(deserializer)? {
            Some(value) => Patch::Set(value),
            None => Patch::Clear,
        })
    }
}

/// Coalesce-if-defined: keep `existing` unless a value was supplied.
pub fn coalesce<T>(incoming: Option<T>, existing: T) -> T {
    incoming.unwrap_or(existing)
}

/// Explicit-presence: keep `existing` only when the key was absent.
pub fn apply_presence<T>(incoming: Patch<T>, existing: Option<T>) -> Option<T> {
    match incoming {
        Patch::Keep => existing,
        Patch::Clear => None,
        Patch::Set(value) => Some(value),
    }
}
