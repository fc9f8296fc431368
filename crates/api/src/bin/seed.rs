//! Populate the database with the demo cameras and a day of incidents.
//!
//! ```text
//! watchpost-seed            # add demo rows
//! watchpost-seed --reset    # replace all cameras and incidents
//! ```

use anyhow::{Context, Result};
use chrono::Utc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use watchpost_core::seed::{plan_incidents, SEED_CAMERAS, SEED_INCIDENT_COUNT};
use watchpost_db::repositories::IncidentRepo;

/// How many of the newest incidents to log after seeding.
const SAMPLE_SIZE: i64 = 5;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "watchpost_seed=info,watchpost_db=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let reset = std::env::args().skip(1).any(|arg| arg == "--reset");

    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
    let pool = watchpost_db::create_pool(&database_url)
        .await
        .context("Failed to connect to database")?;
    watchpost_db::run_migrations(&pool)
        .await
        .context("Failed to run database migrations")?;

    let plan = plan_incidents(
        &mut rand::rng(),
        Utc::now(),
        SEED_CAMERAS.len(),
        SEED_INCIDENT_COUNT,
    );
    let summary = watchpost_db::seed::seed_demo_data(&pool, &plan, reset)
        .await
        .context("Failed to insert seed data")?;
    tracing::info!(?summary, reset, "Seeding finished");

    let sample = IncidentRepo::list_filtered(&pool, None, None, SAMPLE_SIZE, 0).await?;
    for item in &sample {
        tracing::info!(
            incident_id = item.incident.id,
            camera = %item.camera.name,
            incident_type = %item.incident.incident_type,
            ts_start = %item.incident.ts_start,
            resolved = item.incident.resolved,
            "Sample incident",
        );
    }

    pool.close().await;
    Ok(())
}
