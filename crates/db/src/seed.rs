//! Demo data insertion.
//!
//! Inserts the fixed demo cameras and a planned set of incidents in one
//! transaction. Planning (randomness included) happens in
//! `watchpost_core::seed`; this module only writes.

use sqlx::PgPool;
use watchpost_core::seed::{PlannedIncident, SEED_CAMERAS};

use crate::models::camera::CreateCamera;
use crate::models::incident::CreateIncident;
use crate::repositories::{CameraRepo, IncidentRepo};

/// What a seeding run wrote.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedSummary {
    pub cameras: usize,
    pub incidents: usize,
    pub resolved: usize,
}

/// Insert the demo cameras and `plan` in a single transaction.
///
/// With `reset`, existing incidents and cameras are removed first so the
/// database ends up holding exactly the seeded rows. Planned incidents whose
/// `camera_index` is out of range are skipped.
pub async fn seed_demo_data(
    pool: &PgPool,
    plan: &[PlannedIncident],
    reset: bool,
) -> Result<SeedSummary, sqlx::Error> {
    let mut tx = pool.begin().await?;

    if reset {
        sqlx::query("DELETE FROM incidents").execute(&mut *tx).await?;
        sqlx::query("DELETE FROM cameras").execute(&mut *tx).await?;
        tracing::info!("Cleared existing cameras and incidents");
    }

    let mut camera_ids = Vec::with_capacity(SEED_CAMERAS.len());
    for seed in &SEED_CAMERAS {
        let input = CreateCamera {
            name: seed.name.to_string(),
            location: seed.location.to_string(),
        };
        let camera = CameraRepo::create(&mut *tx, &input).await?;
        tracing::debug!(camera_id = camera.id, name = %camera.name, "Seeded camera");
        camera_ids.push(camera.id);
    }

    let mut summary = SeedSummary {
        cameras: camera_ids.len(),
        incidents: 0,
        resolved: 0,
    };

    for planned in plan {
        let Some(&camera_id) = camera_ids.get(planned.camera_index) else {
            tracing::warn!(
                camera_index = planned.camera_index,
                "Skipping planned incident with no matching camera",
            );
            continue;
        };

        let input = CreateIncident {
            camera_id,
            incident_type: planned.incident_type.to_string(),
            ts_start: planned.ts_start,
            ts_end: planned.ts_end,
            thumbnail_url: planned.thumbnail_url.clone(),
            resolved: Some(planned.resolved),
        };
        let incident = IncidentRepo::create(&mut *tx, &input).await?;

        summary.incidents += 1;
        if incident.resolved {
            summary.resolved += 1;
        }
    }

    tx.commit().await?;

    tracing::info!(
        cameras = summary.cameras,
        incidents = summary.incidents,
        resolved = summary.resolved,
        "Seed data inserted",
    );

    Ok(summary)
}
