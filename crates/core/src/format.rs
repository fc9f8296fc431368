//! Human-readable labels for incident times and durations.

use chrono::{DateTime, TimeZone};

use crate::types::Timestamp;

/// 24-hour `HH:MM`.
pub fn format_time<Tz: TimeZone>(t: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    t.format("%H:%M").to_string()
}

/// Short month and day, e.g. `Oct 15`.
pub fn format_date<Tz: TimeZone>(t: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    t.format("%b %-d").to_string()
}

/// Elapsed time between two instants as `"{m}m {s}s"`, or `"{s}s"` under a
/// minute. Both parts are floored; a negative span (end before start) is
/// reported as `0s`.
pub fn format_duration(start: Timestamp, end: Timestamp) -> String {
    let total_secs = (end - start).num_seconds().max(0);
    let minutes = total_secs / 60;
    let seconds = total_secs % 60;
    if minutes > 0 {
        format!("{minutes}m {seconds}s")
    } else {
        format!("{seconds}s")
    }
}
