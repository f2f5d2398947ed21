//! Repository for the global `statuses` catalog.

use grail_core::types::DbId;
use sqlx::PgPool;

use crate::models::status::Status;

const COLUMNS: &str = "id, name, checkbox_count, created_at, updated_at";

/// Read-only access to the seeded checklist catalog.
pub struct StatusRepo;

impl StatusRepo {
    /// List every status, ordered by name.
    pub async fn list(pool: &PgPool) -> Result<Vec<Status>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM statuses ORDER BY name ASC");
        sqlx::query_as::<_, Status>(&query).fetch_all(pool).await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Status>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM statuses WHERE id = $1");
        sqlx::query_as::<_, Status>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
