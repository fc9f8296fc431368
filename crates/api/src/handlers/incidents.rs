//! Handlers for incident listing and the resolve/unresolve toggle.

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use watchpost_core::error::CoreError;
use watchpost_core::pagination::{clamp_limit, clamp_offset, DEFAULT_LIMIT, MAX_LIMIT};
use watchpost_core::resolution::{stale_toggle, ResolutionState};
use watchpost_core::types::DbId;
use watchpost_db::models::incident::{IncidentListParams, ToggleOutcome};
use watchpost_db::repositories::IncidentRepo;

use crate::error::{AppError, AppResult};
use crate::response::{DataResponse, PageResponse};
use crate::state::AppState;
use crate::views::IncidentView;

/// Query parameters for `PATCH /incidents/{id}/resolve`.
#[derive(Debug, Deserialize)]
pub struct ToggleParams {
    /// When set, the toggle only applies if the stored flag still equals it.
    pub expected_resolved: Option<bool>,
}

// ---------------------------------------------------------------------------
// GET /incidents
// ---------------------------------------------------------------------------

/// List incidents with their cameras, most recent start first.
///
/// `?resolved=` selects one side of the partition; omitted, both are listed.
pub async fn list_incidents(
    State(state): State<AppState>,
    Query(params): Query<IncidentListParams>,
) -> AppResult<impl IntoResponse> {
    let limit = clamp_limit(params.limit, DEFAULT_LIMIT, MAX_LIMIT);
    let offset = clamp_offset(params.offset);

    let incidents =
        IncidentRepo::list_filtered(&state.pool, params.resolved, params.camera_id, limit, offset)
            .await?;

    Ok(Json(PageResponse {
        data: IncidentView::many(incidents, &state.timeline()),
        limit,
        offset,
    }))
}

// ---------------------------------------------------------------------------
// GET /incidents/{id}
// ---------------------------------------------------------------------------

pub async fn get_incident(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let incident = IncidentRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Incident",
            id,
        }))?;

    Ok(Json(DataResponse {
        data: IncidentView::new(incident, &state.timeline()),
    }))
}

// ---------------------------------------------------------------------------
// PATCH /incidents/{id}/resolve
// ---------------------------------------------------------------------------

/// Flip an incident between unresolved and resolved.
///
/// Returns the updated incident with its camera. Unknown ids are 404; a
/// guarded toggle whose expectation no longer holds is 409 and changes
/// nothing.
pub async fn toggle_resolution(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Query(params): Query<ToggleParams>,
) -> AppResult<impl IntoResponse> {
    let outcome =
        IncidentRepo::toggle_resolved(&state.pool, id, params.expected_resolved).await?;

    match outcome {
        ToggleOutcome::Toggled(incident) => {
            let now = ResolutionState::from_flag(incident.incident.resolved);
            tracing::info!(
                incident_id = id,
                camera_id = incident.camera.id,
                state = now.label(),
                "Incident resolution toggled",
            );
            Ok(Json(DataResponse {
                data: IncidentView::new(incident, &state.timeline()),
            }))
        }
        ToggleOutcome::NotFound => Err(AppError::Core(CoreError::NotFound {
            entity: "Incident",
            id,
        })),
        ToggleOutcome::Stale { current } => {
            let expected = params.expected_resolved.unwrap_or(current);
            tracing::warn!(incident_id = id, expected, current, "Stale resolution toggle rejected");
            Err(AppError::Core(stale_toggle(id, expected, current)))
        }
    }
}
