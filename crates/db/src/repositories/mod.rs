//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` (or any Postgres executor, for inserts that may run
//! inside a transaction) as the first argument.

pub mod camera_repo;
pub mod incident_repo;

pub use camera_repo::CameraRepo;
pub use incident_repo::IncidentRepo;
