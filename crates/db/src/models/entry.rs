//! Entry entity model and DTOs.

use grail_core::error::CoreError;
use grail_core::numbering::{self, NumberScope};
use grail_core::patch::{apply_presence, coalesce, Patch};
use grail_core::text::empty_to_none;
use grail_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Status given to entries created on their own without one.
pub const DEFAULT_ENTRY_STATUS: &str = "unknown";

/// A row from the `entries` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    pub id: DbId,
    pub location_id: DbId,
    pub number: i32,
    pub info: Option<String>,
    pub status: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// An entry nested in a location create or entries replacement.
#[derive(Debug, Clone, Deserialize)]
pub struct NewEntry {
    pub number: i32,
    pub info: Option<String>,
    pub status: Option<String>,
}

/// DTO for creating a single entry under an existing location.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateEntry {
    pub number: i32,
    pub info: Option<String>,
    pub status: Option<String>,
}

/// DTO for partially updating an entry. `info` can be cleared with `null`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateEntry {
    pub number: Option<i32>,
    #[serde(default)]
    pub info: Patch<String>,
    pub status: Option<String>,
}

/// Fully resolved column values for an insert or update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryWrite {
    pub number: i32,
    pub info: Option<String>,
    pub status: Option<String>,
}

impl NewEntry {
    /// Nested entries keep a missing status as null.
    pub fn resolve(&self) -> EntryWrite {
        EntryWrite {
            number: self.number,
            info: empty_to_none(self.info.as_deref()),
            status: empty_to_none(self.status.as_deref()),
        }
    }
}

impl CreateEntry {
    pub fn resolve(&self) -> Result<EntryWrite, CoreError> {
        numbering::validate_number(NumberScope::Location, self.number)?;
        let status = empty_to_none(self.status.as_deref())
            .unwrap_or_else(|| DEFAULT_ENTRY_STATUS.to_string());
        Ok(EntryWrite {
            number: self.number,
            info: empty_to_none(self.info.as_deref()),
            status: Some(status),
        })
    }
}

impl UpdateEntry {
    /// Merge this patch over `existing`. A supplied `number` is taken as
    /// sent, `0` included.
    pub fn resolve(&self, existing: &Entry) -> EntryWrite {
        EntryWrite {
            number: coalesce(self.number, existing.number),
            info: apply_presence(self.info.clone(), existing.info.clone()),
            status: coalesce(self.status.clone().map(Some), existing.status.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use chrono::Utc;

    fn existing() -> Entry {
        Entry {
            id: 5,
            location_id: 2,
            number: 3,
            info: Some("met the druid".to_string()),
            status: Some("done".to_string()),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn single_create_defaults_status_to_unknown() {
        let input = CreateEntry { number: 1, info: Some(String::new()), status: None };
        let write = input.resolve().unwrap();
        assert_eq!(write.status.as_deref(), Some(DEFAULT_ENTRY_STATUS));
        assert_eq!(write.info, None);
    }

    #[test]
    fn nested_entry_status_stays_null() {
        let entry = NewEntry { number: 1, info: Some("x".into()), status: None };
        assert_eq!(entry.resolve().status, None);
    }

    #[test]
    fn create_rejects_non_positive_number() {
        let input = CreateEntry { number: 0, info: None, status: None };
        assert_matches!(input.resolve(), Err(CoreError::Validation(_)));
    }

    #[test]
    fn update_keeps_status_and_clears_info() {
        let patch: UpdateEntry = serde_json::from_str(r#"{"info": null}"#).unwrap();
        let write = patch.resolve(&existing());
        assert_eq!(write.info, None);
        assert_eq!(write.status.as_deref(), Some("done"));
        assert_eq!(write.number, 3);
    }

    #[test]
    fn update_applies_explicit_zero_number() {
        let patch: UpdateEntry = serde_json::from_str(r#"{"number": 0}"#).unwrap();
        let write = patch.resolve(&existing());
        assert_eq!(write.number, 0);
        assert_eq!(write.status.as_deref(), Some("done"));
    }

    #[test]
    fn update_without_info_keeps_it() {
        let patch: UpdateEntry = serde_json::from_str(r#"{"status": "todo", "number": 9}"#).unwrap();
        let write = patch.resolve(&existing());
        assert_eq!(write.info.as_deref(), Some("met the druid"));
        assert_eq!(write.status.as_deref(), Some("todo"));
        assert_eq!(write.number, 9);
    }
}
