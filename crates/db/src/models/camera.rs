//! Camera entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use ts_rs::TS;
use watchpost_core::types::{DbId, Timestamp};

/// A row from the `cameras` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, TS)]
#[ts(export)]
pub struct Camera {
    pub id: DbId,
    pub name: String,
    pub location: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a camera.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCamera {
    pub name: String,
    pub location: String,
}
