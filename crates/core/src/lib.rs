//! Watchpost domain logic.
//!
//! Zero internal dependencies: everything here is usable from the repository
//! layer, the HTTP API, and the seeding tool alike.

pub mod dashboard;
pub mod error;
pub mod format;
pub mod incident_type;
pub mod pagination;
pub mod resolution;
pub mod seed;
pub mod timeline;
pub mod types;
