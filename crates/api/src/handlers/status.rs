//! Handlers for the checklist catalog and per-campaign checklist progress.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use grail_core::checklist;
use grail_core::types::DbId;
use grail_db::models::campaign_status::SetCheckedBoxes;
use grail_db::repositories::{CampaignStatusRepo, StatusRepo};

use crate::error::{AppError, AppResult};
use crate::extract::PathIds;
use crate::handlers::ensure_campaign_exists;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/statuses
pub async fn list_catalog(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let statuses = StatusRepo::list(&state.pool).await?;
    tracing::debug!(count = statuses.len(), "Listed statuses");
    Ok(Json(DataResponse { data: statuses }))
}

/// GET /api/v1/campaigns/{campaign_id}/statuses
///
/// Every catalog status with this campaign's progress. Read-only: statuses
/// the campaign has never touched are reported, not created.
pub async fn list_for_campaign(
    State(state): State<AppState>,
    PathIds(campaign_id): PathIds<DbId>,
) -> AppResult<impl IntoResponse> {
    ensure_campaign_exists(&state.pool, campaign_id).await?;
    let view = CampaignStatusRepo::list_for_campaign(&state.pool, campaign_id).await?;
    tracing::debug!(campaign_id, count = view.len(), "Listed campaign statuses");
    Ok(Json(DataResponse { data: view }))
}

/// PUT /api/v1/campaigns/{campaign_id}/statuses/{status_id}
///
/// Range-checks the boxes against the status once, then inserts or
/// updates the campaign's progress row. The raw value is stored as sent.
pub async fn set_checked_boxes(
    State(state): State<AppState>,
    PathIds((campaign_id, status_id)): PathIds<(DbId, DbId)>,
    Json(input): Json<SetCheckedBoxes>,
) -> AppResult<impl IntoResponse> {
    ensure_campaign_exists(&state.pool, campaign_id).await?;
    let status = StatusRepo::find_by_id(&state.pool, status_id)
        .await?
        .ok_or_else(|| AppError::not_found("Status", status_id))?;

    let raw = input.raw();
    let boxes = checklist::validate_checked_boxes(raw, status.checkbox_count)?;

    let progress =
        CampaignStatusRepo::set_checked_boxes(&state.pool, campaign_id, status_id, raw).await?;
    tracing::info!(
        campaign_id,
        status_id,
        checked = boxes.len(),
        "Checked boxes set",
    );
    Ok(Json(DataResponse { data: progress }))
}
