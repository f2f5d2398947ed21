//! Location entity model and DTOs.
//!
//! Update DTOs mix both merge policies: `number`, `name` and `has_menhir`
//! coalesce, while the nullable text fields use explicit presence so a
//! client can clear them by sending `null`.

use grail_core::error::CoreError;
use grail_core::numbering::{self, NumberScope};
use grail_core::patch::{apply_presence, coalesce, Patch};
use grail_core::text::{empty_to_none, require_text};
use grail_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::entry::{Entry, EntryWrite, NewEntry};

/// A row from the `locations` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub id: DbId,
    pub campaign_id: DbId,
    pub number: i32,
    pub name: String,
    pub dream: Option<String>,
    pub nightmare: Option<String>,
    pub has_menhir: bool,
    pub menhir_note: Option<String>,
    pub notes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A location with its entries sorted by number ascending.
#[derive(Debug, Clone, Serialize)]
pub struct LocationWithEntries {
    #[serde(flatten)]
    pub location: Location,
    pub entries: Vec<Entry>,
}

/// DTO for creating a location, optionally with nested entries.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateLocation {
    pub number: Option<i32>,
    #[serde(default)]
    pub name: String,
    pub dream: Option<String>,
    pub nightmare: Option<String>,
    pub has_menhir: Option<bool>,
    pub menhir_note: Option<String>,
    pub notes: Option<String>,
    #[serde(default)]
    pub entries: Vec<NewEntry>,
}

/// DTO for partially updating a location.
///
/// When `entries` is present the location's entries are replaced by it.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateLocation {
    pub number: Option<i32>,
    pub name: Option<String>,
    #[serde(default)]
    pub dream: Patch<String>,
    #[serde(default)]
    pub nightmare: Patch<String>,
    pub has_menhir: Option<bool>,
    #[serde(default)]
    pub menhir_note: Patch<String>,
    #[serde(default)]
    pub notes: Patch<String>,
    pub entries: Option<Vec<NewEntry>>,
}

/// Fully resolved column values for an insert or update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationWrite {
    pub number: i32,
    pub name: String,
    pub dream: Option<String>,
    pub nightmare: Option<String>,
    pub has_menhir: bool,
    pub menhir_note: Option<String>,
    pub notes: Option<String>,
}

impl CreateLocation {
    /// Validate required fields and normalise optional text.
    pub fn resolve(&self) -> Result<LocationWrite, CoreError> {
        let number = self.number.ok_or_else(|| {
            CoreError::Validation("Location number and name are required".to_string())
        })?;
        numbering::validate_number(NumberScope::Campaign, number)?;
        let name = require_text("Location name", &self.name)?;

        Ok(LocationWrite {
            number,
            name,
            dream: empty_to_none(self.dream.as_deref()),
            nightmare: empty_to_none(self.nightmare.as_deref()),
            has_menhir: self.has_menhir.unwrap_or(false),
            menhir_note: empty_to_none(self.menhir_note.as_deref()),
            notes: empty_to_none(self.notes.as_deref()),
        })
    }

    /// Validate the nested entries as one batch.
    pub fn resolve_entries(&self) -> Result<Vec<EntryWrite>, CoreError> {
        resolve_entry_batch(&self.entries)
    }
}

impl UpdateLocation {
    /// Merge this patch over `existing`.
    ///
    /// A supplied `number` is taken as sent, `0` included; only its
    /// uniqueness within the campaign is checked, by the caller.
    pub fn resolve(&self, existing: &Location) -> Result<LocationWrite, CoreError> {
        let name = match &self.name {
            Some(name) => require_text("Location name", name)?,
            None => existing.name.clone(),
        };

        Ok(LocationWrite {
            number: coalesce(self.number, existing.number),
            name,
            dream: apply_presence(self.dream.clone(), existing.dream.clone()),
            nightmare: apply_presence(self.nightmare.clone(), existing.nightmare.clone()),
            has_menhir: coalesce(self.has_menhir, existing.has_menhir),
            menhir_note: apply_presence(self.menhir_note.clone(), existing.menhir_note.clone()),
            notes: apply_presence(self.notes.clone(), existing.notes.clone()),
        })
    }

    /// Validate a replacement entry list, if one was supplied.
    pub fn resolve_entries(&self) -> Result<Option<Vec<EntryWrite>>, CoreError> {
        self.entries.as_deref().map(resolve_entry_batch).transpose()
    }
}

fn resolve_entry_batch(entries: &[NewEntry]) -> Result<Vec<EntryWrite>, CoreError> {
    numbering::ensure_distinct(NumberScope::Location, entries.iter().map(|e| e.number))?;
    Ok(entries.iter().map(NewEntry::resolve).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use chrono::Utc;

    fn existing() -> Location {
        Location {
            id: 1,
            campaign_id: 1,
            number: 101,
            name: "Cuanacht".to_string(),
            dream: Some("a dream".to_string()),
            nightmare: None,
            has_menhir: true,
            menhir_note: Some("lit".to_string()),
            notes: Some("old notes".to_string()),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn update(json: serde_json::Value) -> UpdateLocation {
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn create_requires_number_and_name() {
        let input = CreateLocation {
            name: "Avalon".into(),
            ..Default::default()
        };
        assert_matches!(input.resolve(), Err(CoreError::Validation(_)));

        let input = CreateLocation {
            number: Some(3),
            name: "  ".into(),
            ..Default::default()
        };
        assert_matches!(input.resolve(), Err(CoreError::Validation(_)));
    }

    #[test]
    fn create_normalises_empty_text_and_defaults_menhir() {
        let input = CreateLocation {
            number: Some(7),
            name: "Avalon".into(),
            dream: Some(String::new()),
            notes: Some("n".into()),
            ..Default::default()
        };
        let write = input.resolve().unwrap();
        assert_eq!(write.dream, None);
        assert_eq!(write.notes.as_deref(), Some("n"));
        assert!(!write.has_menhir);
    }

    #[test]
    fn explicit_null_clears_notes() {
        let write = update(serde_json::json!({"notes": null}))
            .resolve(&existing())
            .unwrap();
        assert_eq!(write.notes, None);
        assert_eq!(write.dream.as_deref(), Some("a dream"));
    }

    #[test]
    fn omitted_notes_are_kept() {
        let write = update(serde_json::json!({"name": "Renamed"}))
            .resolve(&existing())
            .unwrap();
        assert_eq!(write.notes.as_deref(), Some("old notes"));
        assert_eq!(write.name, "Renamed");
        assert_eq!(write.number, 101);
    }

    #[test]
    fn false_menhir_is_applied() {
        let write = update(serde_json::json!({"hasMenhir": false}))
            .resolve(&existing())
            .unwrap();
        assert!(!write.has_menhir);
        assert_eq!(write.menhir_note.as_deref(), Some("lit"));
    }

    #[test]
    fn explicit_zero_number_is_applied() {
        let write = update(serde_json::json!({"number": 0}))
            .resolve(&existing())
            .unwrap();
        assert_eq!(write.number, 0);
        assert_eq!(write.name, "Cuanacht");
    }

    #[test]
    fn create_rejects_zero_number() {
        let input = CreateLocation {
            number: Some(0),
            name: "Avalon".into(),
            ..Default::default()
        };
        assert_matches!(input.resolve(), Err(CoreError::Validation(_)));
    }

    #[test]
    fn null_name_keeps_existing() {
        let write = update(serde_json::json!({"name": null, "number": null}))
            .resolve(&existing())
            .unwrap();
        assert_eq!(write.name, "Cuanacht");
        assert_eq!(write.number, 101);
    }

    #[test]
    fn entries_absent_means_untouched() {
        assert_eq!(update(serde_json::json!({})).resolve_entries().unwrap(), None);
        let replaced = update(serde_json::json!({"entries": []}))
            .resolve_entries()
            .unwrap();
        assert_eq!(replaced, Some(vec![]));
    }

    #[test]
    fn duplicate_nested_entries_conflict() {
        let input = CreateLocation {
            number: Some(1),
            name: "A".into(),
            entries: vec![
                NewEntry { number: 2, info: None, status: None },
                NewEntry { number: 2, info: None, status: None },
            ],
            ..Default::default()
        };
        assert_matches!(input.resolve_entries(), Err(CoreError::Conflict(_)));
    }
}
