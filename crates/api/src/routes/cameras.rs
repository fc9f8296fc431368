//! Route definitions for cameras.

use axum::routing::get;
use axum::Router;

use crate::handlers::cameras;
use crate::state::AppState;

/// Mounted at `/cameras`.
///
/// ```text
/// GET    /                  -> list_cameras
/// GET    /{id}              -> get_camera
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(cameras::list_cameras))
        .route("/{id}", get(cameras::get_camera))
}
