//! Integration tests for `/api/timeline` and scrubbing.

mod common;

use axum::http::StatusCode;
use common::{at, body_json, create_camera, create_incident, get, post_json};
use serde_json::json;
use sqlx::PgPool;
use watchpost_core::timeline::Timeline;

// ---------------------------------------------------------------------------
// GET /api/timeline
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn timeline_groups_incidents_per_camera(pool: PgPool) {
    let vault = create_camera(&pool, "Vault").await;
    let entrance = create_camera(&pool, "Entrance").await;
    create_incident(&pool, vault, "Gun Threat", at(43_200), false).await;
    create_incident(&pool, entrance, "Face Recognised", at(21_600), false).await;
    create_incident(&pool, vault, "Theft Alert", at(3_600), true).await;

    let response = get(common::build_test_app(pool), "/api/timeline").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let data = &json["data"];

    let labels = data["hour_labels"].as_array().unwrap();
    assert_eq!(labels.len(), 25);
    assert_eq!(labels[0], "00:00");
    assert_eq!(labels[24], "24:00");

    let rows = data["rows"].as_array().unwrap();
    assert_eq!(rows.len(), 2);
    // Unresolved incidents are scanned first, newest first.
    assert_eq!(rows[0]["label"], "Camera - 01");
    assert_eq!(rows[0]["camera"]["name"], "Vault");
    assert_eq!(rows[0]["markers"].as_array().unwrap().len(), 2);
    assert_eq!(rows[0]["markers"][0]["position"], 50.0);
    assert_eq!(rows[0]["markers"][0]["icon"], "🔫");
    assert_eq!(rows[1]["label"], "Camera - 02");
    assert_eq!(rows[1]["camera"]["id"], entrance);
    assert_eq!(rows[1]["markers"][0]["position"], 25.0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn timeline_can_be_limited_to_one_date(pool: PgPool) {
    let camera_id = create_camera(&pool, "Vault").await;
    create_incident(&pool, camera_id, "Gun Threat", at(3_600), false).await;
    // The following day.
    create_incident(&pool, camera_id, "Gun Threat", at(90_000), false).await;

    let json = body_json(get(common::build_test_app(pool), "/api/timeline?date=2026-10-14").await).await;

    let markers = json["data"]["rows"][0]["markers"].as_array().unwrap();
    assert_eq!(markers.len(), 1);
    assert_eq!(json["data"]["date"], "2026-10-14");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn empty_timeline_has_no_rows(pool: PgPool) {
    let json = body_json(get(common::build_test_app(pool), "/api/timeline").await).await;
    assert!(json["data"]["rows"].as_array().unwrap().is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn timeline_positions_follow_configured_offset(pool: PgPool) {
    let camera_id = create_camera(&pool, "Vault").await;
    // 10:00 UTC is 12:00 at UTC+2.
    create_incident(&pool, camera_id, "Gun Threat", at(36_000), false).await;

    let mut config = common::test_config();
    config.timeline = Timeline::from_offset_minutes(120).unwrap();
    let app = common::build_test_app_with(pool, config);

    let json = body_json(get(app, "/api/timeline").await).await;
    let marker = &json["data"]["rows"][0]["markers"][0];
    assert_eq!(marker["position"], 50.0);
    assert_eq!(marker["time_label"], "12:00");
}

// ---------------------------------------------------------------------------
// POST /api/timeline/scrub
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn scrub_snaps_onto_nearby_incident(pool: PgPool) {
    let camera_id = create_camera(&pool, "Vault").await;
    let id = create_incident(&pool, camera_id, "Gun Threat", at(43_200), false).await;

    let response = post_json(
        common::build_test_app(pool),
        "/api/timeline/scrub",
        json!({ "position": 50.4, "date": "2026-10-14" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let data = &body_json(response).await["data"];
    assert_eq!(data["position"], 50.0);
    assert_eq!(data["selected"], id);
    assert_eq!(data["time"], "2026-10-14T12:00:00Z");
    assert_eq!(data["time_label"], "12:00");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn scrub_away_from_incidents_interpolates(pool: PgPool) {
    let camera_id = create_camera(&pool, "Vault").await;
    create_incident(&pool, camera_id, "Gun Threat", at(43_200), false).await;

    let response = post_json(
        common::build_test_app(pool),
        "/api/timeline/scrub",
        json!({ "position": 25.0, "date": "2026-10-14" }),
    )
    .await;

    let data = &body_json(response).await["data"];
    assert_eq!(data["position"], 25.0);
    assert!(data["selected"].is_null());
    assert_eq!(data["time"], "2026-10-14T06:00:00Z");
    assert_eq!(data["time_label"], "06:00");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn scrub_tolerance_is_strict(pool: PgPool) {
    let camera_id = create_camera(&pool, "Vault").await;
    create_incident(&pool, camera_id, "Gun Threat", at(43_200), false).await;

    let response = post_json(
        common::build_test_app(pool),
        "/api/timeline/scrub",
        json!({ "position": 51.0, "date": "2026-10-14" }),
    )
    .await;

    let data = &body_json(response).await["data"];
    assert_eq!(data["position"], 51.0);
    assert!(data["selected"].is_null());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn scrub_by_pointer_clamps_to_edges(pool: PgPool) {
    let response = post_json(
        common::build_test_app(pool),
        "/api/timeline/scrub",
        json!({ "pointer_x": 2000.0, "left": 100.0, "width": 800.0, "date": "2026-10-14" }),
    )
    .await;

    let data = &body_json(response).await["data"];
    assert_eq!(data["position"], 100.0);
    assert_eq!(data["time"], "2026-10-14T23:59:59Z");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn scrub_without_coordinates_is_400(pool: PgPool) {
    let response = post_json(
        common::build_test_app(pool),
        "/api/timeline/scrub",
        json!({ "left": 0.0 }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "BAD_REQUEST");
}
