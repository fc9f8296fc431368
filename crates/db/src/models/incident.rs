//! Incident entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use ts_rs::TS;
use watchpost_core::dashboard::DashboardIncident;
use watchpost_core::incident_type::IncidentType;
use watchpost_core::timeline::TimelineEntry;
use watchpost_core::types::{DbId, Timestamp};

use crate::models::camera::Camera;

/// A row from the `incidents` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, TS)]
#[ts(export)]
pub struct Incident {
    pub id: DbId,
    pub camera_id: DbId,
    #[sqlx(try_from = "String")]
    #[ts(type = "string")]
    pub incident_type: IncidentType,
    pub ts_start: Timestamp,
    pub ts_end: Timestamp,
    pub thumbnail_url: String,
    pub resolved: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// An incident with its owning camera embedded under `camera`.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export)]
pub struct IncidentWithCamera {
    #[serde(flatten)]
    pub incident: Incident,
    pub camera: Camera,
}

/// Flat row shape of an `incidents JOIN cameras` query. Camera columns are
/// aliased with a `camera_` prefix.
#[derive(Debug, FromRow)]
pub(crate) struct IncidentCameraRow {
    #[sqlx(flatten)]
    pub incident: Incident,
    pub camera_name: String,
    pub camera_location: String,
    pub camera_created_at: Timestamp,
    pub camera_updated_at: Timestamp,
}

impl From<IncidentCameraRow> for IncidentWithCamera {
    fn from(row: IncidentCameraRow) -> Self {
        let camera = Camera {
            id: row.incident.camera_id,
            name: row.camera_name,
            location: row.camera_location,
            created_at: row.camera_created_at,
            updated_at: row.camera_updated_at,
        };
        Self {
            incident: row.incident,
            camera,
        }
    }
}

impl TimelineEntry for Incident {
    fn entry_id(&self) -> DbId {
        self.id
    }

    fn started_at(&self) -> Timestamp {
        self.ts_start
    }
}

impl TimelineEntry for IncidentWithCamera {
    fn entry_id(&self) -> DbId {
        self.incident.id
    }

    fn started_at(&self) -> Timestamp {
        self.incident.ts_start
    }
}

impl DashboardIncident for IncidentWithCamera {
    fn is_resolved(&self) -> bool {
        self.incident.resolved
    }
}

/// DTO for creating an incident.
///
/// `incident_type` is accepted verbatim; unknown tags are stored as-is.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateIncident {
    pub camera_id: DbId,
    pub incident_type: String,
    pub ts_start: Timestamp,
    pub ts_end: Timestamp,
    pub thumbnail_url: String,
    pub resolved: Option<bool>,
}

/// Query parameters for listing incidents.
#[derive(Debug, Deserialize)]
pub struct IncidentListParams {
    pub resolved: Option<bool>,
    pub camera_id: Option<DbId>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Result of a resolution toggle.
#[derive(Debug, Clone, PartialEq)]
pub enum ToggleOutcome {
    /// The flag was flipped; carries the updated row.
    Toggled(IncidentWithCamera),
    /// No incident has the requested id.
    NotFound,
    /// A guarded toggle found the flag already changed. Nothing was written.
    Stale { current: bool },
}
