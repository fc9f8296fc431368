//! Demo data planning for a fresh dashboard database.
//!
//! Planning is pure: given a random source and "now", it decides which
//! cameras and incidents to create. The `db` crate performs the inserts.

use chrono::TimeDelta;
use rand::Rng;

use crate::incident_type::IncidentType;
use crate::types::Timestamp;

/// A fixed demo camera.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedCamera {
    pub name: &'static str,
    pub location: &'static str,
}

pub const SEED_CAMERAS: [SeedCamera; 4] = [
    SeedCamera {
        name: "Shop Floor A",
        location: "Main Production Area - Level 1",
    },
    SeedCamera {
        name: "Vault",
        location: "Security Vault - Basement Level",
    },
    SeedCamera {
        name: "Entrance",
        location: "Main Entrance - Ground Floor",
    },
    SeedCamera {
        name: "Parking Lot",
        location: "Outdoor Parking Area - North Side",
    },
];

/// Number of incidents the seeder creates.
pub const SEED_INCIDENT_COUNT: usize = 15;

/// Chance that a seeded incident starts out resolved.
pub const RESOLVED_PROBABILITY: f64 = 0.3;

/// Incidents start somewhere in the trailing window ending at "now".
const WINDOW_MILLIS: i64 = 24 * 60 * 60 * 1000;
/// Incidents last between zero and ten minutes.
const MAX_DURATION_MILLIS: i64 = 10 * 60 * 1000;
/// Distinct thumbnail images available under `/thumbnails`.
const THUMBNAIL_COUNT: usize = 12;

/// One incident to insert. `camera_index` points into the inserted cameras.
#[derive(Debug, Clone, PartialEq)]
pub struct PlannedIncident {
    pub camera_index: usize,
    pub incident_type: IncidentType,
    pub ts_start: Timestamp,
    pub ts_end: Timestamp,
    pub thumbnail_url: String,
    pub resolved: bool,
}

/// Thumbnail path for the `n`th seeded incident (zero-based). Paths cycle
/// through the available images.
pub fn thumbnail_url(n: usize) -> String {
    format!("/thumbnails/incident{}.jpg", (n % THUMBNAIL_COUNT) + 1)
}

/// Plan `count` incidents spread across `camera_count` cameras.
///
/// Returns nothing when there are no cameras to attach incidents to.
pub fn plan_incidents<R: Rng + ?Sized>(
    rng: &mut R,
    now: Timestamp,
    camera_count: usize,
    count: usize,
) -> Vec<PlannedIncident> {
    if camera_count == 0 {
        return Vec::new();
    }

    let window_start = now - TimeDelta::milliseconds(WINDOW_MILLIS);

    (0..count)
        .map(|n| {
            let ts_start = window_start + TimeDelta::milliseconds(rng.random_range(0..WINDOW_MILLIS));
            let ts_end = ts_start + TimeDelta::milliseconds(rng.random_range(0..MAX_DURATION_MILLIS));
            let kind = &IncidentType::KNOWN[rng.random_range(0..IncidentType::KNOWN.len())];

            PlannedIncident {
                camera_index: rng.random_range(0..camera_count),
                incident_type: kind.clone(),
                ts_start,
                ts_end,
                thumbnail_url: thumbnail_url(n),
                resolved: rng.random_bool(RESOLVED_PROBABILITY),
            }
        })
        .collect()
}
