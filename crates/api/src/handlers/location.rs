//! Handlers for locations nested under `/campaigns/{campaign_id}/locations`.
//!
//! Location numbers are unique per campaign. The numbering check runs
//! before any write; the `uq_locations_campaign_number` constraint catches
//! whatever races past it.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use grail_core::numbering::{self, NumberScope};
use grail_core::types::DbId;
use grail_db::models::location::{CreateLocation, UpdateLocation};
use grail_db::repositories::LocationRepo;

use crate::error::{AppError, AppResult};
use crate::extract::PathIds;
use crate::handlers::ensure_campaign_exists;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Reject `number` if another location in the campaign already holds it.
///
/// `location_id` is `None` on create.
async fn ensure_number_available(
    pool: &sqlx::PgPool,
    campaign_id: DbId,
    number: i32,
    location_id: Option<DbId>,
) -> AppResult<()> {
    let holder = LocationRepo::find_id_by_number(pool, campaign_id, number).await?;
    numbering::ensure_available(NumberScope::Campaign, number, holder, location_id)?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/campaigns/{campaign_id}/locations
pub async fn list_by_campaign(
    State(state): State<AppState>,
    PathIds(campaign_id): PathIds<DbId>,
) -> AppResult<impl IntoResponse> {
    ensure_campaign_exists(&state.pool, campaign_id).await?;
    let locations = LocationRepo::list_by_campaign(&state.pool, campaign_id).await?;
    tracing::debug!(campaign_id, count = locations.len(), "Listed locations");
    Ok(Json(DataResponse { data: locations }))
}

/// POST /api/v1/campaigns/{campaign_id}/locations
///
/// Creates the location and any nested entries atomically.
pub async fn create(
    State(state): State<AppState>,
    PathIds(campaign_id): PathIds<DbId>,
    Json(input): Json<CreateLocation>,
) -> AppResult<impl IntoResponse> {
    let write = input.resolve()?;
    let entries = input.resolve_entries()?;

    ensure_campaign_exists(&state.pool, campaign_id).await?;
    ensure_number_available(&state.pool, campaign_id, write.number, None).await?;

    let created =
        LocationRepo::create_with_entries(&state.pool, campaign_id, &write, &entries).await?;
    tracing::info!(
        campaign_id,
        location_id = created.location.id,
        number = created.location.number,
        entries = created.entries.len(),
        "Location created",
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: created })))
}

/// GET /api/v1/campaigns/{campaign_id}/locations/{location_id}
pub async fn get_by_id(
    State(state): State<AppState>,
    PathIds((campaign_id, location_id)): PathIds<(DbId, DbId)>,
) -> AppResult<impl IntoResponse> {
    let location = LocationRepo::find_with_entries(&state.pool, campaign_id, location_id)
        .await?
        .ok_or_else(|| AppError::not_found("Location", location_id))?;
    Ok(Json(DataResponse { data: location }))
}

/// PUT /api/v1/campaigns/{campaign_id}/locations/{location_id}
///
/// Partial update. Nullable text fields can be cleared with an explicit
/// `null`; an `entries` list, when present, replaces every entry.
pub async fn update(
    State(state): State<AppState>,
    PathIds((campaign_id, location_id)): PathIds<(DbId, DbId)>,
    Json(input): Json<UpdateLocation>,
) -> AppResult<impl IntoResponse> {
    let existing = LocationRepo::find_in_campaign(&state.pool, campaign_id, location_id)
        .await?
        .ok_or_else(|| AppError::not_found("Location", location_id))?;

    let write = input.resolve(&existing)?;
    let entries = input.resolve_entries()?;

    if numbering::requires_check(Some(existing.number), write.number) {
        ensure_number_available(&state.pool, campaign_id, write.number, Some(existing.id))
            .await?;
    }

    let updated = LocationRepo::update(&state.pool, existing.id, &write, entries.as_deref())
        .await?
        .ok_or_else(|| AppError::not_found("Location", location_id))?;
    tracing::info!(
        campaign_id,
        location_id,
        entries_replaced = entries.is_some(),
        "Location updated",
    );
    Ok(Json(DataResponse { data: updated }))
}

/// DELETE /api/v1/campaigns/{campaign_id}/locations/{location_id}
pub async fn delete(
    State(state): State<AppState>,
    PathIds((campaign_id, location_id)): PathIds<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    if LocationRepo::delete_in_campaign(&state.pool, campaign_id, location_id).await? {
        tracing::info!(campaign_id, location_id, "Location deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found("Location", location_id))
    }
}
