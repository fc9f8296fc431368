//! 24-hour timeline position mapping and scrubber snapping.
//!
//! A day maps linearly onto the horizontal range `0.0..100.0`. Positions are
//! measured in the timeline's configured UTC offset, so an incident stored at
//! `22:30Z` sits at 22:30 on a UTC timeline and at 00:30 on a `+02:00` one.

use chrono::{
    FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Offset, TimeDelta, TimeZone, Timelike, Utc,
};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::{DbId, Position, Timestamp};

/// Maximum distance (in percentage points) at which the scrubber snaps onto
/// an incident marker. The comparison is strict.
pub const SNAP_TOLERANCE: Position = 1.0;

const HOURS_PER_DAY: f64 = 24.0;
const SECONDS_PER_DAY: u32 = 86_400;

/// Absorbs float error when converting a position back to whole seconds, so
/// a position computed from an exact second maps back onto that second.
const SECOND_EPSILON: f64 = 1e-6;

/// Offsets beyond +/-14h do not exist in practice.
const MAX_OFFSET_MINUTES: i32 = 14 * 60;

// ---------------------------------------------------------------------------
// Pure mapping
// ---------------------------------------------------------------------------

/// Map a time of day onto the timeline. Sub-second precision is ignored.
///
/// The result is always in `0.0..100.0`.
pub fn time_to_position<T: Timelike>(t: &T) -> Position {
    let hours = f64::from(t.hour()) + f64::from(t.minute()) / 60.0 + f64::from(t.second()) / 3600.0;
    hours / HOURS_PER_DAY * 100.0
}

/// Map a timeline position back to a time of day, truncating to the second.
///
/// Positions outside `0.0..=100.0` are clamped; `100.0` (the right edge)
/// maps to the last second of the day. Non-finite input maps to midnight.
///
/// Truncation is not exact at second boundaries: a position less than
/// [`SECOND_EPSILON`] seconds short of the next whole second rounds up to it,
/// so `11:59:59.9999995` reads back as `12:00:00`. This keeps positions
/// computed from whole seconds mapping back onto the same second.
pub fn position_to_time(position: Position) -> NaiveTime {
    if !position.is_finite() {
        return NaiveTime::MIN;
    }
    let hours = position.clamp(0.0, 100.0) / 100.0 * HOURS_PER_DAY;
    let total = ((hours * 3600.0) + SECOND_EPSILON).floor() as u32;
    let total = total.min(SECONDS_PER_DAY - 1);

    let hour = total / 3600;
    let minute = (total % 3600) / 60;
    let second = total % 60;
    NaiveTime::from_hms_opt(hour, minute, second).unwrap_or(NaiveTime::MIN)
}

/// Like [`position_to_time`] but anchored to a calendar date.
pub fn position_to_datetime(position: Position, date: NaiveDate) -> NaiveDateTime {
    date.and_time(position_to_time(position))
}

/// Horizontal extent of the rendered timeline, in pointer coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimelineBounds {
    pub left: f64,
    pub width: f64,
}

/// Convert a pointer x-coordinate into a raw timeline position.
///
/// Pointers left or right of the timeline are clamped to its edges. A
/// degenerate (zero or negative width) timeline always yields `0.0`.
pub fn pointer_position(x: f64, bounds: TimelineBounds) -> Position {
    if !(bounds.width > 0.0) {
        return 0.0;
    }
    let raw = (x - bounds.left) / bounds.width * 100.0;
    if raw.is_nan() {
        return 0.0;
    }
    raw.clamp(0.0, 100.0)
}

/// The 25 ruler labels, `00:00` through `24:00`.
pub fn hour_labels() -> Vec<String> {
    (0..=24).map(|h| format!("{h:02}:00")).collect()
}

// ---------------------------------------------------------------------------
// Snapping
// ---------------------------------------------------------------------------

/// Anything that can be placed on the timeline.
pub trait TimelineEntry {
    fn entry_id(&self) -> DbId;
    fn started_at(&self) -> Timestamp;
}

impl<T: TimelineEntry + ?Sized> TimelineEntry for &T {
    fn entry_id(&self) -> DbId {
        (**self).entry_id()
    }
    fn started_at(&self) -> Timestamp {
        (**self).started_at()
    }
}

/// Result of one pointer-driven scrubber update.
///
/// `time` is the new current time. `selected` is set only when the scrubber
/// snapped onto an incident.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScrubUpdate {
    pub position: Position,
    pub time: Timestamp,
    pub selected: Option<DbId>,
}

impl ScrubUpdate {
    pub fn snapped(&self) -> bool {
        self.selected.is_some()
    }
}

/// A timeline measured in a fixed UTC offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeline {
    offset: FixedOffset,
}

impl Default for Timeline {
    fn default() -> Self {
        Self::utc()
    }
}

impl Timeline {
    pub fn utc() -> Self {
        Self { offset: Utc.fix() }
    }

    pub fn new(offset: FixedOffset) -> Self {
        Self { offset }
    }

    /// Build a timeline from an offset east of UTC, in minutes.
    pub fn from_offset_minutes(minutes: i32) -> Result<Self, CoreError> {
        if minutes.abs() > MAX_OFFSET_MINUTES {
            return Err(CoreError::Validation(format!(
                "UTC offset of {minutes} minutes is outside +/-{MAX_OFFSET_MINUTES}"
            )));
        }
        FixedOffset::east_opt(minutes * 60)
            .map(Self::new)
            .ok_or_else(|| CoreError::Validation(format!("Invalid UTC offset: {minutes} minutes")))
    }

    pub fn offset(&self) -> FixedOffset {
        self.offset
    }

    /// Calendar date of `now` on this timeline.
    pub fn date_of(&self, now: Timestamp) -> NaiveDate {
        now.with_timezone(&self.offset).date_naive()
    }

    /// Position of a stored timestamp on this timeline.
    pub fn position_of(&self, ts: Timestamp) -> Position {
        time_to_position(&ts.with_timezone(&self.offset))
    }

    /// The instant shown at `position` on `date` (a date on this timeline).
    pub fn time_at(&self, position: Position, date: NaiveDate) -> Timestamp {
        let local = position_to_datetime(position, date);
        let utc = local - TimeDelta::seconds(i64::from(self.offset.local_minus_utc()));
        Utc.from_utc_datetime(&utc)
    }

    /// Apply the snap rule to a raw scrubber position.
    ///
    /// Incidents are scanned in slice order and the first one whose marker
    /// lies strictly within [`SNAP_TOLERANCE`] wins, even if a later one is
    /// closer. Without a match, the raw position and the interpolated time on
    /// `date` are reported.
    pub fn scrub<I: TimelineEntry>(&self, raw: Position, incidents: &[I], date: NaiveDate) -> ScrubUpdate {
        for incident in incidents {
            let started_at = incident.started_at();
            let marker = self.position_of(started_at);
            if (raw - marker).abs() < SNAP_TOLERANCE {
                return ScrubUpdate {
                    position: marker,
                    time: started_at,
                    selected: Some(incident.entry_id()),
                };
            }
        }

        ScrubUpdate {
            position: raw,
            time: self.time_at(raw, date),
            selected: None,
        }
    }

    /// Pointer-driven update: clamp the pointer into the timeline, then snap.
    pub fn scrub_pointer<I: TimelineEntry>(
        &self,
        x: f64,
        bounds: TimelineBounds,
        incidents: &[I],
        date: NaiveDate,
    ) -> ScrubUpdate {
        self.scrub(pointer_position(x, bounds), incidents, date)
    }
}

/// Bucket entries into per-camera rows, keeping first-appearance order of
/// cameras and the input order within each row.
pub fn group_by_camera<'a, I, F>(entries: &'a [I], camera_of: F) -> Vec<(DbId, Vec<&'a I>)>
where
    F: Fn(&I) -> DbId,
{
    let mut rows: Vec<(DbId, Vec<&'a I>)> = Vec::new();
    for entry in entries {
        let camera_id = camera_of(entry);
        match rows.iter_mut().find(|(id, _)| *id == camera_id) {
            Some((_, row)) => row.push(entry),
            None => rows.push((camera_id, vec![entry])),
        }
    }
    rows
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
