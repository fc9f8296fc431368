//! Handler for the initial dashboard snapshot.

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use watchpost_core::dashboard::{update, DashboardAction, DashboardState};
use watchpost_core::timeline::TimelineEntry;
use watchpost_core::types::{DbId, Position, Timestamp};
use watchpost_db::models::incident::IncidentWithCamera;
use watchpost_db::repositories::IncidentRepo;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;
use crate::views::IncidentView;

#[derive(Debug, Deserialize)]
pub struct DashboardParams {
    #[serde(default)]
    pub show_resolved: bool,
}

#[derive(Debug, Serialize)]
pub struct DashboardCounts {
    pub unresolved: usize,
    pub resolved: usize,
}

/// What the operator sees on first load.
#[derive(Debug, Serialize)]
pub struct DashboardSnapshot {
    pub unresolved: Vec<IncidentView>,
    pub resolved: Vec<IncidentView>,
    pub selected_id: Option<DbId>,
    pub current_time: Timestamp,
    pub scrubber_position: Position,
    pub show_resolved: bool,
    pub counts: DashboardCounts,
}

// ---------------------------------------------------------------------------
// GET /dashboard
// ---------------------------------------------------------------------------

/// Load both collections and run them through the dashboard transitions.
///
/// With `?show_resolved=true` the view is switched after loading, which
/// selects the first resolved incident.
pub async fn get_dashboard(
    State(state): State<AppState>,
    Query(params): Query<DashboardParams>,
) -> AppResult<impl IntoResponse> {
    let timeline = state.timeline();
    let unresolved = IncidentRepo::list_by_resolution(&state.pool, false).await?;
    let resolved = IncidentRepo::list_by_resolution(&state.pool, true).await?;

    let mut dashboard = update(
        DashboardState::<IncidentWithCamera>::new(Utc::now()),
        DashboardAction::Loaded {
            unresolved,
            resolved,
        },
    )
    .state;
    if params.show_resolved {
        dashboard = update(dashboard, DashboardAction::ToggleView).state;
    }

    // The scrubber follows the selected incident when there is one.
    let selected_id = dashboard.selected;
    let current_time = dashboard
        .selected_incident()
        .map(TimelineEntry::started_at)
        .unwrap_or(dashboard.current_time);

    let snapshot = DashboardSnapshot {
        counts: DashboardCounts {
            unresolved: dashboard.unresolved.len(),
            resolved: dashboard.resolved.len(),
        },
        scrubber_position: timeline.position_of(current_time),
        show_resolved: dashboard.show_resolved,
        unresolved: IncidentView::many(dashboard.unresolved, &timeline),
        resolved: IncidentView::many(dashboard.resolved, &timeline),
        selected_id,
        current_time,
    };

    Ok(Json(DataResponse { data: snapshot }))
}
