//! Shared harness for the API integration tests.
//!
//! Every test gets its own database from `#[sqlx::test]`; the app is built
//! with [`build_app_router`] so requests run through the production
//! middleware stack.

#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use chrono::{TimeDelta, TimeZone, Utc};
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use watchpost_api::config::ServerConfig;
use watchpost_api::router::build_app_router;
use watchpost_api::state::AppState;
use watchpost_core::timeline::Timeline;
use watchpost_core::types::{DbId, Timestamp};
use watchpost_db::models::camera::CreateCamera;
use watchpost_db::models::incident::CreateIncident;
use watchpost_db::repositories::{CameraRepo, IncidentRepo};

pub const TEST_ORIGIN: &str = "http://localhost:3001";

pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec![TEST_ORIGIN.to_string()],
        request_timeout_secs: 30,
        timeline: Timeline::utc(),
    }
}

pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with(pool, test_config())
}

pub fn build_test_app_with(pool: PgPool, config: ServerConfig) -> Router {
    build_app_router(AppState::new(pool, config.clone()), &config)
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

pub async fn send(app: Router, method: Method, uri: &str, body: Option<serde_json::Value>) -> Response<Body> {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None).await
}

pub async fn patch(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::PATCH, uri, None).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::POST, uri, Some(body)).await
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// 2026-10-14 00:00:00 UTC.
pub fn day_start() -> Timestamp {
    Utc.with_ymd_and_hms(2026, 10, 14, 0, 0, 0).unwrap()
}

/// `seconds` after [`day_start`].
pub fn at(seconds: i64) -> Timestamp {
    day_start() + TimeDelta::seconds(seconds)
}

pub async fn create_camera(pool: &PgPool, name: &str) -> DbId {
    let input = CreateCamera {
        name: name.to_string(),
        location: format!("{name} location"),
    };
    CameraRepo::create(pool, &input).await.unwrap().id
}

pub async fn create_incident(
    pool: &PgPool,
    camera_id: DbId,
    incident_type: &str,
    ts_start: Timestamp,
    resolved: bool,
) -> DbId {
    let input = CreateIncident {
        camera_id,
        incident_type: incident_type.to_string(),
        ts_start,
        ts_end: ts_start + TimeDelta::minutes(3),
        thumbnail_url: "/thumbnails/incident3.jpg".to_string(),
        resolved: Some(resolved),
    };
    IncidentRepo::create(pool, &input).await.unwrap().id
}
