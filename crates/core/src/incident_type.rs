//! Incident type tags and their display attributes.
//!
//! Incident types are stored as free text. Known tags parse into a closed
//! enum; anything else is kept verbatim in [`IncidentType::Other`] so that
//! rows written by an external detection pipeline are never rejected.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Fallback marker color for unrecognised incident types.
pub const DEFAULT_COLOR: &str = "#6b7280";
/// Fallback icon for unrecognised incident types.
pub const DEFAULT_ICON: &str = "⚠️";

/// The type tag carried by an incident.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum IncidentType {
    UnauthorisedAccess,
    GunThreat,
    FaceRecognised,
    SuspiciousActivity,
    TheftAlert,
    FireDetected,
    /// A tag outside the known set, preserved as-is.
    Other(String),
}

impl IncidentType {
    /// Every known type, in the order the seeder draws from.
    pub const KNOWN: [IncidentType; 6] = [
        IncidentType::UnauthorisedAccess,
        IncidentType::GunThreat,
        IncidentType::FaceRecognised,
        IncidentType::SuspiciousActivity,
        IncidentType::TheftAlert,
        IncidentType::FireDetected,
    ];

    /// Parse a stored tag. Never fails.
    pub fn parse(tag: &str) -> Self {
        match tag {
            "Unauthorised Access" => Self::UnauthorisedAccess,
            "Gun Threat" => Self::GunThreat,
            "Face Recognised" => Self::FaceRecognised,
            "Suspicious Activity" => Self::SuspiciousActivity,
            "Theft Alert" => Self::TheftAlert,
            "Fire Detected" => Self::FireDetected,
            other => Self::Other(other.to_string()),
        }
    }

    /// The tag as stored in the `incidents.incident_type` column.
    pub fn as_str(&self) -> &str {
        match self {
            Self::UnauthorisedAccess => "Unauthorised Access",
            Self::GunThreat => "Gun Threat",
            Self::FaceRecognised => "Face Recognised",
            Self::SuspiciousActivity => "Suspicious Activity",
            Self::TheftAlert => "Theft Alert",
            Self::FireDetected => "Fire Detected",
            Self::Other(tag) => tag,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Other(_))
    }

    /// Timeline marker color (CSS hex).
    pub fn color(&self) -> &'static str {
        match self {
            Self::UnauthorisedAccess => "#f87171",
            Self::GunThreat => "#ef4444",
            Self::FaceRecognised => "#3b82f6",
            Self::SuspiciousActivity => "#eab308",
            Self::TheftAlert => "#eab308",
            Self::FireDetected => "#f97316",
            Self::Other(_) => DEFAULT_COLOR,
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Self::UnauthorisedAccess => "🚨",
            Self::GunThreat => "🔫",
            Self::FaceRecognised => "👤",
            Self::SuspiciousActivity => "👁️",
            Self::TheftAlert => "💰",
            Self::FireDetected => "🔥",
            Self::Other(_) => DEFAULT_ICON,
        }
    }
}

impl From<String> for IncidentType {
    fn from(tag: String) -> Self {
        Self::parse(&tag)
    }
}

impl From<IncidentType> for String {
    fn from(kind: IncidentType) -> Self {
        match kind {
            IncidentType::Other(tag) => tag,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for IncidentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
