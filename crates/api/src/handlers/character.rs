//! Handlers for the character roster under `/campaigns/{campaign_id}/characters`.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use grail_core::roster;
use grail_core::types::DbId;
use grail_db::models::character::{CreateCharacter, UpdateCharacter};
use grail_db::repositories::CharacterRepo;

use crate::error::{AppError, AppResult};
use crate::extract::PathIds;
use crate::handlers::ensure_campaign_exists;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/campaigns/{campaign_id}/characters
pub async fn list_by_campaign(
    State(state): State<AppState>,
    PathIds(campaign_id): PathIds<DbId>,
) -> AppResult<impl IntoResponse> {
    ensure_campaign_exists(&state.pool, campaign_id).await?;
    let characters = CharacterRepo::list_by_campaign(&state.pool, campaign_id).await?;
    tracing::debug!(campaign_id, count = characters.len(), "Listed characters");
    Ok(Json(DataResponse { data: characters }))
}

/// POST /api/v1/campaigns/{campaign_id}/characters
///
/// Checks, in order: archetype, player name, campaign, roster capacity,
/// duplicate archetype.
pub async fn create(
    State(state): State<AppState>,
    PathIds(campaign_id): PathIds<DbId>,
    Json(input): Json<CreateCharacter>,
) -> AppResult<impl IntoResponse> {
    let new = input.resolve()?;
    ensure_campaign_exists(&state.pool, campaign_id).await?;

    let roster_types = CharacterRepo::list_types_by_campaign(&state.pool, campaign_id).await?;
    roster::ensure_can_join(roster_types.iter().map(String::as_str), new.archetype)?;

    let character = CharacterRepo::create(&state.pool, campaign_id, &new).await?;
    tracing::info!(
        campaign_id,
        character_id = character.id,
        character_type = %character.character_type,
        "Character created",
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: character })))
}

/// PUT /api/v1/campaigns/{campaign_id}/characters/{character_id}
pub async fn update(
    State(state): State<AppState>,
    PathIds((campaign_id, character_id)): PathIds<(DbId, DbId)>,
    Json(input): Json<UpdateCharacter>,
) -> AppResult<impl IntoResponse> {
    let existing = CharacterRepo::find_in_campaign(&state.pool, campaign_id, character_id)
        .await?
        .ok_or_else(|| AppError::not_found("Character", character_id))?;

    let write = input.resolve(&existing)?;
    let character = CharacterRepo::update(&state.pool, existing.id, &write)
        .await?
        .ok_or_else(|| AppError::not_found("Character", character_id))?;
    tracing::info!(campaign_id, character_id, "Character updated");
    Ok(Json(DataResponse { data: character }))
}

/// DELETE /api/v1/campaigns/{campaign_id}/characters/{character_id}
///
/// Saves that captured this character are left as they are.
pub async fn delete(
    State(state): State<AppState>,
    PathIds((campaign_id, character_id)): PathIds<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    if CharacterRepo::delete_in_campaign(&state.pool, campaign_id, character_id).await? {
        tracing::info!(campaign_id, character_id, "Character deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found("Character", character_id))
    }
}
