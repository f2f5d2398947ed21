//! Global checklist catalog model.
//!
//! Statuses are seeded by migration and shared by every campaign; each
//! campaign tracks its own progress in `campaign_statuses`.

use grail_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `statuses` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Status {
    pub id: DbId,
    pub name: String,
    pub checkbox_count: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
