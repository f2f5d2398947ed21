//! Path-id extractor for Axum handlers.

use axum::extract::{FromRequestParts, Path};
use axum::http::request::Parts;
use grail_core::error::CoreError;
use grail_core::types::{parse_id, DbId};

use crate::error::AppError;

/// Positive integer ids taken from the request path.
///
/// Every path parameter must parse as an id of at least 1; anything else is
/// rejected with a validation error before the handler runs.
///
/// ```ignore
/// async fn get_location(
///     State(state): State<AppState>,
///     PathIds((campaign_id, location_id)): PathIds<(DbId, DbId)>,
/// ) -> AppResult<impl IntoResponse> { ... }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct PathIds<T>(pub T);

/// Shapes a list of validated path ids can be collected into.
pub trait FromIds: Sized {
    const ARITY: usize;

    fn from_ids(ids: &[DbId]) -> Self;
}

impl FromIds for DbId {
    const ARITY: usize = 1;

    fn from_ids(ids: &[DbId]) -> Self {
        ids[0]
    }
}

impl FromIds for (DbId, DbId) {
    const ARITY: usize = 2;

    fn from_ids(ids: &[DbId]) -> Self {
        (ids[0], ids[1])
    }
}

impl FromIds for (DbId, DbId, DbId) {
    const ARITY: usize = 3;

    fn from_ids(ids: &[DbId]) -> Self {
        (ids[0], ids[1], ids[2])
    }
}

impl<S, T> FromRequestParts<S> for PathIds<T>
where
    S: Send + Sync,
    T: FromIds,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(params) = Path::<Vec<(String, String)>>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| {
                AppError::Core(CoreError::Validation(format!(
                    "Invalid path parameters: {}",
                    rejection.body_text()
                )))
            })?;

        let ids = params
            .iter()
            .map(|(name, raw)| parse_id(name, raw))
            .collect::<Result<Vec<_>, _>>()?;

        if ids.len() != T::ARITY {
            return Err(AppError::InternalError(format!(
                "Route has {} path ids, handler expects {}",
                ids.len(),
                T::ARITY
            )));
        }

        Ok(PathIds(T::from_ids(&ids)))
    }
}
