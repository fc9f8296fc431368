//! Handlers for the 24-hour camera timeline.
//!
//! The timeline shows every incident, unresolved first and then resolved,
//! grouped into one row per camera. Scrubbing runs the same snap rule the
//! dashboard applies while dragging.

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use watchpost_core::error::CoreError;
use watchpost_core::format::format_time;
use watchpost_core::timeline::{group_by_camera, hour_labels, ScrubUpdate, TimelineBounds};
use watchpost_core::types::Position;
use watchpost_db::models::camera::Camera;
use watchpost_db::models::incident::IncidentWithCamera;
use watchpost_db::repositories::IncidentRepo;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;
use crate::views::IncidentView;

#[derive(Debug, Deserialize)]
pub struct TimelineParams {
    /// Only show incidents starting on this date (timeline offset).
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Serialize)]
pub struct TimelineRow {
    /// `Camera - 01`, `Camera - 02`, ... in row order.
    pub label: String,
    pub camera: Camera,
    pub markers: Vec<IncidentView>,
}

#[derive(Debug, Serialize)]
pub struct TimelineResponse {
    pub date: Option<NaiveDate>,
    pub hour_labels: Vec<String>,
    pub rows: Vec<TimelineRow>,
}

/// Body of `POST /timeline/scrub`.
///
/// Either `position` (already a percentage) or `pointer_x` with the
/// timeline's `left` and `width` must be given.
#[derive(Debug, Deserialize)]
pub struct ScrubRequest {
    pub position: Option<Position>,
    pub pointer_x: Option<f64>,
    pub left: Option<f64>,
    pub width: Option<f64>,
    /// Date used for interpolated times; defaults to today.
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Serialize)]
pub struct ScrubResponse {
    #[serde(flatten)]
    pub update: ScrubUpdate,
    pub time_label: String,
}

/// All incidents in the order the timeline scans them.
async fn timeline_incidents(state: &AppState) -> AppResult<Vec<IncidentWithCamera>> {
    let mut incidents = IncidentRepo::list_by_resolution(&state.pool, false).await?;
    incidents.extend(IncidentRepo::list_by_resolution(&state.pool, true).await?);
    Ok(incidents)
}

// ---------------------------------------------------------------------------
// GET /timeline
// ---------------------------------------------------------------------------

pub async fn get_timeline(
    State(state): State<AppState>,
    Query(params): Query<TimelineParams>,
) -> AppResult<impl IntoResponse> {
    let timeline = state.timeline();
    let mut incidents = timeline_incidents(&state).await?;
    if let Some(date) = params.date {
        incidents.retain(|i| timeline.date_of(i.incident.ts_start) == date);
    }

    let rows = group_by_camera(&incidents, |i| i.camera.id)
        .into_iter()
        .enumerate()
        .map(|(index, (_, row))| TimelineRow {
            label: format!("Camera - {:02}", index + 1),
            camera: row[0].camera.clone(),
            markers: row
                .into_iter()
                .map(|i| IncidentView::new(i.clone(), &timeline))
                .collect(),
        })
        .collect();

    Ok(Json(DataResponse {
        data: TimelineResponse {
            date: params.date,
            hour_labels: hour_labels(),
            rows,
        },
    }))
}

// ---------------------------------------------------------------------------
// POST /timeline/scrub
// ---------------------------------------------------------------------------

/// Resolve a scrubber position (or pointer coordinate) to a time, snapping
/// onto the first incident within tolerance.
pub async fn scrub(
    State(state): State<AppState>,
    Json(input): Json<ScrubRequest>,
) -> AppResult<impl IntoResponse> {
    let timeline = state.timeline();
    let target = scrub_target(&input)?;
    let date = input.date.unwrap_or_else(|| timeline.date_of(Utc::now()));

    let incidents = timeline_incidents(&state).await?;
    let update = match target {
        ScrubTarget::Position(raw) => timeline.scrub(raw, &incidents, date),
        ScrubTarget::Pointer(x, bounds) => timeline.scrub_pointer(x, bounds, &incidents, date),
    };

    tracing::debug!(
        position = update.position,
        snapped = update.snapped(),
        selected = ?update.selected,
        "Timeline scrubbed",
    );

    let time_label = format_time(&update.time.with_timezone(&timeline.offset()));
    Ok(Json(DataResponse {
        data: ScrubResponse { update, time_label },
    }))
}

#[derive(Debug, PartialEq)]
enum ScrubTarget {
    /// Percentage, already clamped to [0, 100].
    Position(Position),
    Pointer(f64, TimelineBounds),
}

/// Validate a scrub request.
///
/// A body with neither a position nor a full pointer triple is malformed
/// (400 `BAD_REQUEST`); non-finite numbers fail validation.
fn scrub_target(input: &ScrubRequest) -> Result<ScrubTarget, AppError> {
    if let Some(position) = input.position {
        if !position.is_finite() {
            return Err(CoreError::Validation("position must be a finite number".into()).into());
        }
        return Ok(ScrubTarget::Position(position.clamp(0.0, 100.0)));
    }

    match (input.pointer_x, input.left, input.width) {
        (Some(x), Some(left), Some(width)) => {
            if !(x.is_finite() && left.is_finite() && width.is_finite()) {
                return Err(CoreError::Validation(
                    "pointer_x, left and width must be finite numbers".into(),
                )
                .into());
            }
            Ok(ScrubTarget::Pointer(x, TimelineBounds { left, width }))
        }
        _ => Err(AppError::BadRequest(
            "Provide either position or pointer_x, left and width".into(),
        )),
    }
}
