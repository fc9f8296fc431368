pub mod cameras;
pub mod dashboard;
pub mod incidents;
pub mod timeline;
