pub mod cameras;
pub mod dashboard;
pub mod health;
pub mod incidents;
pub mod timeline;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /cameras                         list
/// /cameras/{id}                    get
///
/// /incidents                       list (?resolved, camera_id, limit, offset)
/// /incidents/{id}                  get
/// /incidents/{id}/resolve          toggle resolved (PATCH, ?expected_resolved)
///
/// /timeline                        per-camera rows (?date)
/// /timeline/scrub                  snap a scrubber position (POST)
///
/// /dashboard                       initial dashboard snapshot (?show_resolved)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/cameras", cameras::router())
        .nest("/incidents", incidents::router())
        .nest("/timeline", timeline::router())
        .nest("/dashboard", dashboard::router())
}
