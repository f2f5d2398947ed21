//! Route definitions for the `/campaigns` resource.
//!
//! Every other resource lives under a campaign and is nested here.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::{campaign, character, entry, location, save, status};
use crate::state::AppState;

/// Routes mounted at `/campaigns`.
///
/// ```text
/// GET    /                                                     -> list
/// POST   /                                                     -> create
/// GET    /{campaign_id}                                        -> get_by_id
/// PUT    /{campaign_id}                                        -> rename
/// DELETE /{campaign_id}                                        -> delete
///
/// GET    /{campaign_id}/locations                              -> list_by_campaign
/// POST   /{campaign_id}/locations                              -> create
/// GET    /{campaign_id}/locations/{location_id}                -> get_by_id
/// PUT    /{campaign_id}/locations/{location_id}                -> update
/// DELETE /{campaign_id}/locations/{location_id}                -> delete
///
/// POST   /{campaign_id}/locations/{location_id}/entries            -> create
/// PUT    /{campaign_id}/locations/{location_id}/entries/{entry_id} -> update
/// DELETE /{campaign_id}/locations/{location_id}/entries/{entry_id} -> delete
///
/// GET    /{campaign_id}/statuses                               -> list_for_campaign
/// PUT    /{campaign_id}/statuses/{status_id}                   -> set_checked_boxes
///
/// GET    /{campaign_id}/characters                             -> list_by_campaign
/// POST   /{campaign_id}/characters                             -> create
/// PUT    /{campaign_id}/characters/{character_id}              -> update
/// DELETE /{campaign_id}/characters/{character_id}              -> delete
///
/// GET    /{campaign_id}/saves                                  -> list_by_campaign
/// POST   /{campaign_id}/saves                                  -> create
/// DELETE /{campaign_id}/saves/{save_id}                        -> delete
/// POST   /{campaign_id}/saves/{save_id}/restore                -> restore
/// ```
pub fn router() -> Router<AppState> {
    let entry_routes = Router::new()
        .route("/", post(entry::create))
        .route("/{entry_id}", put(entry::update).delete(entry::delete));

    let location_routes = Router::new()
        .route("/", get(location::list_by_campaign).post(location::create))
        .route(
            "/{location_id}",
            get(location::get_by_id)
                .put(location::update)
                .delete(location::delete),
        )
        .nest("/{location_id}/entries", entry_routes);

    let status_routes = Router::new()
        .route("/", get(status::list_for_campaign))
        .route("/{status_id}", put(status::set_checked_boxes));

    let character_routes = Router::new()
        .route("/", get(character::list_by_campaign).post(character::create))
        .route(
            "/{character_id}",
            put(character::update).delete(character::delete),
        );

    let save_routes = Router::new()
        .route("/", get(save::list_by_campaign).post(save::create))
        .route("/{save_id}", axum::routing::delete(save::delete))
        .route("/{save_id}/restore", post(save::restore));

    Router::new()
        .route("/", get(campaign::list).post(campaign::create))
        .route(
            "/{campaign_id}",
            get(campaign::get_by_id)
                .put(campaign::rename)
                .delete(campaign::delete),
        )
        .nest("/{campaign_id}/locations", location_routes)
        .nest("/{campaign_id}/statuses", status_routes)
        .nest("/{campaign_id}/characters", character_routes)
        .nest("/{campaign_id}/saves", save_routes)
}
