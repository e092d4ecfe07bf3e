//! File metadata model and DTOs.
//!
//! This is a metadata registry only; there is no byte-upload path.

use clientpulse_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A file row from the `files` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProjectFile {
    pub id: DbId,
    pub project_id: DbId,
    pub name: String,
    pub url: String,
    pub size: i64,
    pub mime_type: String,
    pub uploaded_by: Option<DbId>,
    pub created_at: Timestamp,
}

/// DTO for registering file metadata against a project.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateFile {
    pub name: String,
    pub url: String,
    pub size: i64,
    pub mime_type: String,
}
