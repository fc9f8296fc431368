/// Cameras and incidents are keyed by PostgreSQL BIGSERIAL ids.
pub type DbId = i64;

/// Stored timestamps are always UTC; time-of-day math converts explicitly.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Horizontal timeline position as a percentage of the day, `0.0..=100.0`.
pub type Position = f64;
