//! Campaign entity model and DTOs.

use grail_core::error::CoreError;
use grail_core::text::require_text;
use grail_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::location::LocationWithEntries;

/// A row from the `campaigns` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Campaign {
    pub id: DbId,
    pub name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Campaign list item with its location count.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignSummary {
    pub id: DbId,
    pub name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub location_count: i64,
}

/// A campaign with its locations (number ascending) and their entries.
#[derive(Debug, Clone, Serialize)]
pub struct CampaignDetail {
    #[serde(flatten)]
    pub campaign: Campaign,
    pub locations: Vec<LocationWithEntries>,
}

/// DTO for creating a campaign.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCampaign {
    #[serde(default)]
    pub name: String,
}

/// DTO for renaming a campaign. The name is the only mutable field.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateCampaign {
    #[serde(default)]
    pub name: String,
}

/// Trimmed, non-blank campaign name.
pub fn campaign_name(name: &str) -> Result<String, CoreError> {
    require_text("Campaign name", name)
}
