//! Handlers for camera lookup.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;

use watchpost_core::error::CoreError;
use watchpost_core::types::DbId;
use watchpost_db::repositories::CameraRepo;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// GET /cameras
// ---------------------------------------------------------------------------

/// List every camera in creation order.
pub async fn list_cameras(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let cameras = CameraRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: cameras }))
}

// ---------------------------------------------------------------------------
// GET /cameras/{id}
// ---------------------------------------------------------------------------

pub async fn get_camera(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let camera = CameraRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Camera",
            id,
        }))?;

    Ok(Json(DataResponse { data: camera }))
}
