//! Repository for the `cameras` table.

use sqlx::{PgExecutor, PgPool};
use watchpost_core::types::DbId;

use crate::models::camera::{Camera, CreateCamera};

/// Column list for `cameras` queries.
const COLUMNS: &str = "id, name, location, created_at, updated_at";

/// Provides read access and inserts for cameras.
pub struct CameraRepo;

impl CameraRepo {
    /// Insert a camera, returning the full row.
    pub async fn create<'e, E: PgExecutor<'e>>(
        executor: E,
        input: &CreateCamera,
    ) -> Result<Camera, sqlx::Error> {
        let query = format!(
            "INSERT INTO cameras (name, location) VALUES ($1, $2) RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Camera>(&query)
            .bind(&input.name)
            .bind(&input.location)
            .fetch_one(executor)
            .await
    }

    /// Find a camera by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Camera>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM cameras WHERE id = $1");
        sqlx::query_as::<_, Camera>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all cameras in creation order.
    pub async fn list(pool: &PgPool) -> Result<Vec<Camera>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM cameras ORDER BY id ASC");
        sqlx::query_as::<_, Camera>(&query).fetch_all(pool).await
    }

    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM cameras")
            .fetch_one(pool)
            .await?;
        Ok(row.0)
    }
}
