//! Route definitions for incidents and the resolve toggle.

use axum::routing::{get, patch};
use axum::Router;

use crate::handlers::incidents;
use crate::state::AppState;

/// Mounted at `/incidents`.
///
/// ```text
/// GET    /                  -> list_incidents
/// GET    /{id}              -> get_incident
/// PATCH  /{id}/resolve      -> toggle_resolution
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(incidents::list_incidents))
        .route("/{id}", get(incidents::get_incident))
        .route("/{id}/resolve", patch(incidents::toggle_resolution))
}
