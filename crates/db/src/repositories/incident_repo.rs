//! Repository for the `incidents` table.
//!
//! Reads always join the owning camera so callers get
//! [`IncidentWithCamera`] rows. The only update is the resolution toggle.

use sqlx::{PgExecutor, PgPool};
use watchpost_core::resolution::ResolutionState;
use watchpost_core::types::DbId;

use crate::models::incident::{
    CreateIncident, Incident, IncidentCameraRow, IncidentWithCamera, ToggleOutcome,
};

/// Column list for plain `incidents` queries.
const COLUMNS: &str = "\
    id, camera_id, incident_type, ts_start, ts_end, \
    thumbnail_url, resolved, created_at, updated_at";

/// Column list for `incidents i JOIN cameras c` queries.
const JOINED_COLUMNS: &str = "\
    i.id, i.camera_id, i.incident_type, i.ts_start, i.ts_end, \
    i.thumbnail_url, i.resolved, i.created_at, i.updated_at, \
    c.name AS camera_name, c.location AS camera_location, \
    c.created_at AS camera_created_at, c.updated_at AS camera_updated_at";

/// Provides reads, inserts and the resolution toggle for incidents.
pub struct IncidentRepo;

impl IncidentRepo {
    /// Insert an incident, returning the full row.
    pub async fn create<'e, E: PgExecutor<'e>>(
        executor: E,
        input: &CreateIncident,
    ) -> Result<Incident, sqlx::Error> {
        let query = format!(
            "INSERT INTO incidents \
                (camera_id, incident_type, ts_start, ts_end, thumbnail_url, resolved) \
             VALUES ($1, $2, $3, $4, $5, COALESCE($6, FALSE)) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Incident>(&query)
            .bind(input.camera_id)
            .bind(&input.incident_type)
            .bind(input.ts_start)
            .bind(input.ts_end)
            .bind(&input.thumbnail_url)
            .bind(input.resolved)
            .fetch_one(executor)
            .await
    }

    /// Find an incident (with its camera) by ID.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<IncidentWithCamera>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS} FROM incidents i \
             JOIN cameras c ON c.id = i.camera_id \
             WHERE i.id = $1"
        );
        let row = sqlx::query_as::<_, IncidentCameraRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(row.map(Into::into))
    }

    /// List incidents with optional resolution and camera filters.
    ///
    /// Results are ordered most recent start first.
    pub async fn list_filtered(
        pool: &PgPool,
        resolved: Option<bool>,
        camera_id: Option<DbId>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<IncidentWithCamera>, sqlx::Error> {
        let mut conditions: Vec<String> = Vec::new();
        let mut param_idx: usize = 1;

        if resolved.is_some() {
            conditions.push(format!("i.resolved = ${param_idx}"));
            param_idx += 1;
        }
        if camera_id.is_some() {
            conditions.push(format!("i.camera_id = ${param_idx}"));
            param_idx += 1;
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let query = format!(
            "SELECT {JOINED_COLUMNS} FROM incidents i \
             JOIN cameras c ON c.id = i.camera_id \
             {where_clause} \
             ORDER BY i.ts_start DESC, i.id DESC \
             LIMIT ${param_idx} OFFSET ${}",
            param_idx + 1
        );

        let mut q = sqlx::query_as::<_, IncidentCameraRow>(&query);

        if let Some(r) = resolved {
            q = q.bind(r);
        }
        if let Some(cid) = camera_id {
            q = q.bind(cid);
        }
        q = q.bind(limit).bind(offset);

        let rows = q.fetch_all(pool).await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Every incident in one resolution state, most recent start first.
    pub async fn list_by_resolution(
        pool: &PgPool,
        resolved: bool,
    ) -> Result<Vec<IncidentWithCamera>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS} FROM incidents i \
             JOIN cameras c ON c.id = i.camera_id \
             WHERE i.resolved = $1 \
             ORDER BY i.ts_start DESC, i.id DESC"
        );
        let rows = sqlx::query_as::<_, IncidentCameraRow>(&query)
            .bind(resolved)
            .fetch_all(pool)
            .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Flip the `resolved` flag of one incident.
    ///
    /// The row is locked with `SELECT ... FOR UPDATE` before the new flag is
    /// written, all in one transaction, so concurrent toggles serialize and
    /// each one sees the flag left by the previous. When `expected` is given
    /// and differs from the locked flag, nothing is written and that flag is
    /// reported as [`ToggleOutcome::Stale`]; it always differs from
    /// `expected`.
    pub async fn toggle_resolved(
        pool: &PgPool,
        id: DbId,
        expected: Option<bool>,
    ) -> Result<ToggleOutcome, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let locked: Option<(bool,)> =
            sqlx::query_as("SELECT resolved FROM incidents WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?;

        let Some((current,)) = locked else {
            return Ok(ToggleOutcome::NotFound);
        };
        if expected.is_some_and(|e| e != current) {
            return Ok(ToggleOutcome::Stale { current });
        }

        let next = ResolutionState::from_flag(current).toggled();
        let query = format!(
            "WITH i AS ( \
                UPDATE incidents \
                SET resolved = $2, updated_at = NOW() \
                WHERE id = $1 \
                RETURNING {COLUMNS} \
             ) \
             SELECT {JOINED_COLUMNS} FROM i \
             JOIN cameras c ON c.id = i.camera_id"
        );
        let row = sqlx::query_as::<_, IncidentCameraRow>(&query)
            .bind(id)
            .bind(next.is_resolved())
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(ToggleOutcome::Toggled(row.into()))
    }

    /// Count incidents, optionally restricted to one resolution state.
    pub async fn count(pool: &PgPool, resolved: Option<bool>) -> Result<i64, sqlx::Error> {
        let row: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM incidents WHERE ($1::BOOLEAN IS NULL OR resolved = $1)",
        )
        .bind(resolved)
        .fetch_one(pool)
        .await?;
        Ok(row.0)
    }
}
