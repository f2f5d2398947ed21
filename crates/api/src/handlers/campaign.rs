//! Handlers for the `/campaigns` resource.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use grail_core::types::DbId;
use grail_db::models::campaign::{campaign_name, CreateCampaign, UpdateCampaign};
use grail_db::repositories::CampaignRepo;

use crate::error::{AppError, AppResult};
use crate::extract::PathIds;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/campaigns
pub async fn list(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let campaigns = CampaignRepo::list_summaries(&state.pool).await?;
    tracing::debug!(count = campaigns.len(), "Listed campaigns");
    Ok(Json(DataResponse { data: campaigns }))
}

/// POST /api/v1/campaigns
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateCampaign>,
) -> AppResult<impl IntoResponse> {
    let name = campaign_name(&input.name)?;
    let campaign = CampaignRepo::create(&state.pool, &name).await?;
    tracing::info!(campaign_id = campaign.id, name = %campaign.name, "Campaign created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: campaign })))
}

/// GET /api/v1/campaigns/{campaign_id}
///
/// Returns the campaign with its locations and their entries.
pub async fn get_by_id(
    State(state): State<AppState>,
    PathIds(campaign_id): PathIds<DbId>,
) -> AppResult<impl IntoResponse> {
    let detail = CampaignRepo::find_detail(&state.pool, campaign_id)
        .await?
        .ok_or_else(|| AppError::not_found("Campaign", campaign_id))?;
    Ok(Json(DataResponse { data: detail }))
}

/// PUT /api/v1/campaigns/{campaign_id}
pub async fn rename(
    State(state): State<AppState>,
    PathIds(campaign_id): PathIds<DbId>,
    Json(input): Json<UpdateCampaign>,
) -> AppResult<impl IntoResponse> {
    let name = campaign_name(&input.name)?;
    let campaign = CampaignRepo::rename(&state.pool, campaign_id, &name)
        .await?
        .ok_or_else(|| AppError::not_found("Campaign", campaign_id))?;
    tracing::info!(campaign_id, name = %campaign.name, "Campaign renamed");
    Ok(Json(DataResponse { data: campaign }))
}

/// DELETE /api/v1/campaigns/{campaign_id}
///
/// Cascades to locations, entries, characters, checklist progress and saves.
pub async fn delete(
    State(state): State<AppState>,
    PathIds(campaign_id): PathIds<DbId>,
) -> AppResult<StatusCode> {
    if CampaignRepo::delete(&state.pool, campaign_id).await? {
        tracing::info!(campaign_id, "Campaign deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found("Campaign", campaign_id))
    }
}
