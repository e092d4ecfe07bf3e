//! Agency (tenant) entity model and DTOs.

use clientpulse_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// An agency row from the `agencies` table. The tenant root: every client,
/// project, and invoice belongs to exactly one agency.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Agency {
    pub id: DbId,
    pub name: String,
    pub slug: String,
    pub logo_url: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new agency (at signup).
#[derive(Debug, Clone)]
pub struct CreateAgency {
    pub name: String,
    pub slug: String,
}
