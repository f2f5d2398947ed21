//! Handlers for saves under `/campaigns/{campaign_id}/saves`.
//!
//! A save is an immutable value copy of the roster's counters. Restoring
//! writes those counters back onto live characters matched by archetype.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use grail_core::snapshot::{self, CharacterSnapshot, RestoreReport};
use grail_core::types::DbId;
use grail_db::models::save::CreateSave;
use grail_db::repositories::{CharacterRepo, SaveRepo};

use crate::error::{AppError, AppResult};
use crate::extract::PathIds;
use crate::handlers::ensure_campaign_exists;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/campaigns/{campaign_id}/saves
///
/// Newest first, each with its captured characters.
pub async fn list_by_campaign(
    State(state): State<AppState>,
    PathIds(campaign_id): PathIds<DbId>,
) -> AppResult<impl IntoResponse> {
    ensure_campaign_exists(&state.pool, campaign_id).await?;
    let saves = SaveRepo::list_by_campaign(&state.pool, campaign_id).await?;
    tracing::debug!(campaign_id, count = saves.len(), "Listed saves");
    Ok(Json(DataResponse { data: saves }))
}

/// POST /api/v1/campaigns/{campaign_id}/saves
///
/// Uses the supplied `characters` as-is, or captures the live roster when
/// the field is omitted.
pub async fn create(
    State(state): State<AppState>,
    PathIds(campaign_id): PathIds<DbId>,
    Json(input): Json<CreateSave>,
) -> AppResult<impl IntoResponse> {
    let name = snapshot::validate_save_name(&input.name)?;
    ensure_campaign_exists(&state.pool, campaign_id).await?;

    let characters = match input.characters {
        Some(characters) => characters,
        None => CharacterRepo::list_by_campaign(&state.pool, campaign_id)
            .await?
            .iter()
            .map(|c| CharacterSnapshot::capture(&c.character_type, &c.player_name, c.counters()))
            .collect(),
    };

    let save =
        SaveRepo::create_with_characters(&state.pool, campaign_id, &name, &characters).await?;
    tracing::info!(
        campaign_id,
        save_id = save.save.id,
        characters = save.characters.len(),
        "Save created",
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: save })))
}

/// DELETE /api/v1/campaigns/{campaign_id}/saves/{save_id}
///
/// A save belonging to another campaign is reported as not found.
pub async fn delete(
    State(state): State<AppState>,
    PathIds((campaign_id, save_id)): PathIds<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    if SaveRepo::delete_in_campaign(&state.pool, campaign_id, save_id).await? {
        tracing::info!(campaign_id, save_id, "Save deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found("Save", save_id))
    }
}

/// POST /api/v1/campaigns/{campaign_id}/saves/{save_id}/restore
///
/// Archetypes no longer on the roster match nothing; they are listed in the
/// report with `matched = 0` and do not fail the request.
pub async fn restore(
    State(state): State<AppState>,
    PathIds((campaign_id, save_id)): PathIds<(DbId, DbId)>,
) -> AppResult<impl IntoResponse> {
    let save = SaveRepo::find_in_campaign(&state.pool, campaign_id, save_id)
        .await?
        .ok_or_else(|| AppError::not_found("Save", save_id))?;

    let restored = SaveRepo::restore(&state.pool, campaign_id, &save).await?;
    let report = RestoreReport::new(save.save.name, restored);

    let unmatched: Vec<&str> = report.unmatched().collect();
    if !unmatched.is_empty() {
        tracing::warn!(campaign_id, save_id, ?unmatched, "Restore matched no live character");
    }
    tracing::info!(campaign_id, save_id, "Save restored");
    Ok(Json(DataResponse { data: report }))
}
