pub mod campaign;
pub mod health;

use axum::routing::get;
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /statuses                                        global checklist catalog
///
/// /campaigns                                       list, create
/// /campaigns/{campaign_id}                         get, rename, delete
/// /campaigns/{campaign_id}/locations/...           see routes::campaign
/// /campaigns/{campaign_id}/statuses/...
/// /campaigns/{campaign_id}/characters/...
/// /campaigns/{campaign_id}/saves/...
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/statuses", get(handlers::status::list_catalog))
        .nest("/campaigns", campaign::router())
}
