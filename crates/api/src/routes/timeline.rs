use axum::routing::{get, post};
use axum::Router;

use crate::handlers::timeline;
use crate::state::AppState;

/// Mounted at `/timeline`.
///
/// ```text
/// GET    /                  -> get_timeline
/// POST   /scrub             -> scrub
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(timeline::get_timeline))
        .route("/scrub", post(timeline::scrub))
}
