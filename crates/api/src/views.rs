//! Response shapes that decorate stored rows with display attributes.

use serde::Serialize;
use watchpost_core::format::{format_date, format_duration, format_time};
use watchpost_core::timeline::Timeline;
use watchpost_core::types::Position;
use watchpost_db::models::incident::IncidentWithCamera;

/// An incident with its camera, plus everything the dashboard needs to draw
/// it: marker position, color, icon and formatted labels. Labels are in the
/// timeline's offset.
#[derive(Debug, Clone, Serialize)]
pub struct IncidentView {
    #[serde(flatten)]
    pub incident: IncidentWithCamera,
    pub position: Position,
    pub color: &'static str,
    pub icon: &'static str,
    pub time_label: String,
    pub date_label: String,
    pub duration_label: String,
}

impl IncidentView {
    pub fn new(incident: IncidentWithCamera, timeline: &Timeline) -> Self {
        let row = &incident.incident;
        let local_start = row.ts_start.with_timezone(&timeline.offset());
        Self {
            position: timeline.position_of(row.ts_start),
            color: row.incident_type.color(),
            icon: row.incident_type.icon(),
            time_label: format_time(&local_start),
            date_label: format_date(&local_start),
            duration_label: format_duration(row.ts_start, row.ts_end),
            incident,
        }
    }

    pub fn many(incidents: Vec<IncidentWithCamera>, timeline: &Timeline) -> Vec<Self> {
        incidents
            .into_iter()
            .map(|i| Self::new(i, timeline))
            .collect()
    }
}
