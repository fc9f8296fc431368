//! Integration tests for the camera and incident repositories.
//!
//! Exercises the repository layer against a real database:
//! - Camera embedding on every incident read
//! - Resolution toggle (plain and guarded)
//! - Listing filters and ordering
//! - Foreign key enforcement

use assert_matches::assert_matches;
use chrono::{TimeDelta, TimeZone, Utc};
use sqlx::PgPool;
use watchpost_core::incident_type::IncidentType;
use watchpost_core::types::{DbId, Timestamp};
use watchpost_db::models::camera::CreateCamera;
use watchpost_db::models::incident::{CreateIncident, ToggleOutcome};
use watchpost_db::repositories::{CameraRepo, IncidentRepo};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn base_time() -> Timestamp {
    Utc.with_ymd_and_hms(2026, 10, 14, 12, 0, 0).unwrap()
}

async fn camera(pool: &PgPool, name: &str) -> DbId {
    let input = CreateCamera {
        name: name.to_string(),
        location: format!("{name} location"),
    };
    CameraRepo::create(pool, &input).await.unwrap().id
}

async fn incident(pool: &PgPool, camera_id: DbId, minutes: i64, resolved: bool) -> DbId {
    let ts_start = base_time() + TimeDelta::minutes(minutes);
    let input = CreateIncident {
        camera_id,
        incident_type: "Gun Threat".to_string(),
        ts_start,
        ts_end: ts_start + TimeDelta::minutes(2),
        thumbnail_url: "/thumbnails/incident1.jpg".to_string(),
        resolved: Some(resolved),
    };
    IncidentRepo::create(pool, &input).await.unwrap().id
}

// ---------------------------------------------------------------------------
// Reads
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn find_by_id_embeds_camera(pool: PgPool) {
    let camera_id = camera(&pool, "Vault").await;
    let id = incident(&pool, camera_id, 0, false).await;

    let found = IncidentRepo::find_by_id(&pool, id).await.unwrap().unwrap();

    assert_eq!(found.incident.id, id);
    assert_eq!(found.incident.incident_type, IncidentType::GunThreat);
    assert_eq!(found.camera.id, camera_id);
    assert_eq!(found.camera.name, "Vault");
    assert_eq!(found.camera.location, "Vault location");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn find_unknown_id_returns_none(pool: PgPool) {
    assert!(IncidentRepo::find_by_id(&pool, 999_999).await.unwrap().is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_defaults_to_unresolved(pool: PgPool) {
    let camera_id = camera(&pool, "Entrance").await;
    let input = CreateIncident {
        camera_id,
        incident_type: "Fire Detected".to_string(),
        ts_start: base_time(),
        ts_end: base_time(),
        thumbnail_url: "/thumbnails/incident2.jpg".to_string(),
        resolved: None,
    };

    let created = IncidentRepo::create(&pool, &input).await.unwrap();

    assert!(!created.resolved);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn unknown_type_and_reversed_times_are_accepted(pool: PgPool) {
    let camera_id = camera(&pool, "Parking Lot").await;
    let input = CreateIncident {
        camera_id,
        incident_type: "Traffic congestion".to_string(),
        ts_start: base_time(),
        ts_end: base_time() - TimeDelta::minutes(5),
        thumbnail_url: "/thumbnails/incident3.jpg".to_string(),
        resolved: None,
    };

    let created = IncidentRepo::create(&pool, &input).await.unwrap();

    assert_eq!(
        created.incident_type,
        IncidentType::Other("Traffic congestion".to_string())
    );
    assert!(created.ts_end < created.ts_start);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn incident_requires_existing_camera(pool: PgPool) {
    let input = CreateIncident {
        camera_id: 424_242,
        incident_type: "Theft Alert".to_string(),
        ts_start: base_time(),
        ts_end: base_time(),
        thumbnail_url: "/thumbnails/incident4.jpg".to_string(),
        resolved: None,
    };

    let err = IncidentRepo::create(&pool, &input).await.unwrap_err();

    let db_err = err.as_database_error().expect("expected a database error");
    assert_eq!(db_err.code().as_deref(), Some("23503"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn list_filters_by_resolution_newest_first(pool: PgPool) {
    let camera_id = camera(&pool, "Shop Floor A").await;
    let early = incident(&pool, camera_id, 0, false).await;
    let late = incident(&pool, camera_id, 60, false).await;
    let done = incident(&pool, camera_id, 30, true).await;

    let unresolved = IncidentRepo::list_filtered(&pool, Some(false), None, 100, 0)
        .await
        .unwrap();
    let ids: Vec<_> = unresolved.iter().map(|i| i.incident.id).collect();
    assert_eq!(ids, vec![late, early]);

    let resolved = IncidentRepo::list_by_resolution(&pool, true).await.unwrap();
    assert_eq!(resolved.len(), 1);
    assert_eq!(resolved[0].incident.id, done);

    let all = IncidentRepo::list_filtered(&pool, None, None, 100, 0).await.unwrap();
    assert_eq!(all.len(), 3);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn list_filters_by_camera_and_paginates(pool: PgPool) {
    let a = camera(&pool, "A").await;
    let b = camera(&pool, "B").await;
    for m in 0..4 {
        incident(&pool, a, m, false).await;
    }
    incident(&pool, b, 10, false).await;

    let only_b = IncidentRepo::list_filtered(&pool, None, Some(b), 100, 0).await.unwrap();
    assert_eq!(only_b.len(), 1);
    assert_eq!(only_b[0].camera.id, b);

    let page = IncidentRepo::list_filtered(&pool, None, Some(a), 2, 1).await.unwrap();
    assert_eq!(page.len(), 2);
    assert!(page[0].incident.ts_start > page[1].incident.ts_start);
}

// ---------------------------------------------------------------------------
// Resolution toggle
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn toggle_flips_and_returns_camera(pool: PgPool) {
    let camera_id = camera(&pool, "Vault").await;
    let id = incident(&pool, camera_id, 0, false).await;

    let outcome = IncidentRepo::toggle_resolved(&pool, id, None).await.unwrap();

    let updated = assert_matches!(outcome, ToggleOutcome::Toggled(i) => i);
    assert!(updated.incident.resolved);
    assert_eq!(updated.camera.name, "Vault");
    assert!(updated.incident.updated_at >= updated.incident.created_at);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn double_toggle_restores_initial_flag(pool: PgPool) {
    let camera_id = camera(&pool, "Vault").await;
    let id = incident(&pool, camera_id, 0, true).await;

    IncidentRepo::toggle_resolved(&pool, id, None).await.unwrap();
    let outcome = IncidentRepo::toggle_resolved(&pool, id, None).await.unwrap();

    assert_matches!(outcome, ToggleOutcome::Toggled(i) if i.incident.resolved);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn toggle_moves_incidents_between_sets(pool: PgPool) {
    let camera_id = camera(&pool, "Entrance").await;
    let a = incident(&pool, camera_id, 0, false).await;
    let b = incident(&pool, camera_id, 5, true).await;

    IncidentRepo::toggle_resolved(&pool, a, None).await.unwrap();
    IncidentRepo::toggle_resolved(&pool, b, None).await.unwrap();

    let resolved: Vec<_> = IncidentRepo::list_by_resolution(&pool, true)
        .await
        .unwrap()
        .into_iter()
        .map(|i| i.incident.id)
        .collect();
    let unresolved: Vec<_> = IncidentRepo::list_by_resolution(&pool, false)
        .await
        .unwrap()
        .into_iter()
        .map(|i| i.incident.id)
        .collect();

    assert_eq!(resolved, vec![a]);
    assert_eq!(unresolved, vec![b]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn toggle_unknown_id_is_not_found_and_changes_nothing(pool: PgPool) {
    let camera_id = camera(&pool, "Entrance").await;
    incident(&pool, camera_id, 0, false).await;

    let outcome = IncidentRepo::toggle_resolved(&pool, 999_999, None).await.unwrap();

    assert_eq!(outcome, ToggleOutcome::NotFound);
    assert_eq!(IncidentRepo::count(&pool, Some(true)).await.unwrap(), 0);
    assert_eq!(IncidentRepo::count(&pool, Some(false)).await.unwrap(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn guarded_toggle_applies_when_expectation_holds(pool: PgPool) {
    let camera_id = camera(&pool, "Vault").await;
    let id = incident(&pool, camera_id, 0, false).await;

    let outcome = IncidentRepo::toggle_resolved(&pool, id, Some(false)).await.unwrap();

    assert_matches!(outcome, ToggleOutcome::Toggled(i) if i.incident.resolved);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn guarded_toggle_on_stale_flag_writes_nothing(pool: PgPool) {
    let camera_id = camera(&pool, "Vault").await;
    let id = incident(&pool, camera_id, 0, true).await;

    let outcome = IncidentRepo::toggle_resolved(&pool, id, Some(false)).await.unwrap();

    assert_eq!(outcome, ToggleOutcome::Stale { current: true });
    let still = IncidentRepo::find_by_id(&pool, id).await.unwrap().unwrap();
    assert!(still.incident.resolved);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn guarded_toggle_on_unknown_id_is_not_found(pool: PgPool) {
    let outcome = IncidentRepo::toggle_resolved(&pool, 31_337, Some(true)).await.unwrap();
    assert_eq!(outcome, ToggleOutcome::NotFound);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn concurrent_toggles_cancel_out(pool: PgPool) {
    let camera_id = camera(&pool, "Vault").await;
    let id = incident(&pool, camera_id, 0, false).await;

    let (first, second) = tokio::join!(
        IncidentRepo::toggle_resolved(&pool, id, None),
        IncidentRepo::toggle_resolved(&pool, id, None),
    );
    first.unwrap();
    second.unwrap();

    let after = IncidentRepo::find_by_id(&pool, id).await.unwrap().unwrap();
    assert!(!after.incident.resolved);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn racing_guarded_toggles_report_a_consistent_stale_flag(pool: PgPool) {
    let camera_id = camera(&pool, "Vault").await;
    let id = incident(&pool, camera_id, 0, false).await;

    let mut handles = Vec::new();
    for n in 0..12 {
        let pool = pool.clone();
        let expected = match n % 3 {
            0 => None,
            1 => Some(false),
            _ => Some(true),
        };
        handles.push(tokio::spawn(async move {
            let outcome = IncidentRepo::toggle_resolved(&pool, id, expected).await.unwrap();
            (expected, outcome)
        }));
    }

    let mut flips = 0;
    for handle in handles {
        let (expected, outcome) = handle.await.unwrap();
        match outcome {
            ToggleOutcome::Toggled(_) => flips += 1,
            ToggleOutcome::Stale { current } => assert_ne!(Some(current), expected),
            ToggleOutcome::NotFound => panic!("incident {id} disappeared"),
        }
    }

    let after = IncidentRepo::find_by_id(&pool, id).await.unwrap().unwrap();
    assert_eq!(after.incident.resolved, flips % 2 == 1);
}
