//! Handlers for entries nested under
//! `/campaigns/{campaign_id}/locations/{location_id}/entries`.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use grail_core::numbering::{self, NumberScope};
use grail_core::types::DbId;
use grail_db::models::entry::{CreateEntry, UpdateEntry};
use grail_db::models::location::Location;
use grail_db::repositories::{EntryRepo, LocationRepo};

use crate::error::{AppError, AppResult};
use crate::extract::PathIds;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Verify the location exists and belongs to the campaign.
async fn ensure_location_exists(
    pool: &sqlx::PgPool,
    campaign_id: DbId,
    location_id: DbId,
) -> AppResult<Location> {
    LocationRepo::find_in_campaign(pool, campaign_id, location_id)
        .await?
        .ok_or_else(|| AppError::not_found("Location", location_id))
}

/// Reject `number` if another entry of the location already holds it.
async fn ensure_number_available(
    pool: &sqlx::PgPool,
    location_id: DbId,
    number: i32,
    entry_id: Option<DbId>,
) -> AppResult<()> {
    let holder = EntryRepo::find_id_by_number(pool, location_id, number).await?;
    numbering::ensure_available(NumberScope::Location, number, holder, entry_id)?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/campaigns/{campaign_id}/locations/{location_id}/entries
pub async fn create(
    State(state): State<AppState>,
    PathIds((campaign_id, location_id)): PathIds<(DbId, DbId)>,
    Json(input): Json<CreateEntry>,
) -> AppResult<impl IntoResponse> {
    let write = input.resolve()?;
    ensure_location_exists(&state.pool, campaign_id, location_id).await?;
    ensure_number_available(&state.pool, location_id, write.number, None).await?;

    let entry = EntryRepo::create(&state.pool, location_id, &write).await?;
    tracing::info!(location_id, entry_id = entry.id, number = entry.number, "Entry created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: entry })))
}

/// PUT /api/v1/campaigns/{campaign_id}/locations/{location_id}/entries/{entry_id}
pub async fn update(
    State(state): State<AppState>,
    PathIds((campaign_id, location_id, entry_id)): PathIds<(DbId, DbId, DbId)>,
    Json(input): Json<UpdateEntry>,
) -> AppResult<impl IntoResponse> {
    ensure_location_exists(&state.pool, campaign_id, location_id).await?;
    let existing = EntryRepo::find_in_location(&state.pool, location_id, entry_id)
        .await?
        .ok_or_else(|| AppError::not_found("Entry", entry_id))?;

    let write = input.resolve(&existing);
    if numbering::requires_check(Some(existing.number), write.number) {
        ensure_number_available(&state.pool, location_id, write.number, Some(existing.id))
            .await?;
    }

    let entry = EntryRepo::update(&state.pool, existing.id, &write)
        .await?
        .ok_or_else(|| AppError::not_found("Entry", entry_id))?;
    tracing::info!(location_id, entry_id, "Entry updated");
    Ok(Json(DataResponse { data: entry }))
}

/// DELETE /api/v1/campaigns/{campaign_id}/locations/{location_id}/entries/{entry_id}
pub async fn delete(
    State(state): State<AppState>,
    PathIds((campaign_id, location_id, entry_id)): PathIds<(DbId, DbId, DbId)>,
) -> AppResult<StatusCode> {
    ensure_location_exists(&state.pool, campaign_id, location_id).await?;
    if EntryRepo::delete_in_location(&state.pool, location_id, entry_id).await? {
        tracing::info!(location_id, entry_id, "Entry deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found("Entry", entry_id))
    }
}
