//! Client entity model and DTOs.

use clientpulse_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A client row from the `clients` table.
///
/// The `portal_token` is the bearer credential for the client portal; it is
/// visible to agency staff, so it is serialized here.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Client {
    pub id: DbId,
    pub agency_id: DbId,
    pub name: String,
    pub email: String,
    pub company: Option<String>,
    pub phone: Option<String>,
    pub portal_token: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A client row with its project count, for dashboard listings.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ClientWithProjectCount {
    pub id: DbId,
    pub agency_id: DbId,
    pub name: String,
    pub email: String,
    pub company: Option<String>,
    pub phone: Option<String>,
    pub portal_token: String,
    pub project_count: i64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new client. The portal token is generated
/// server-side, never accepted from the request.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateClient {
    pub name: String,
    pub email: String,
    pub company: Option<String>,
    pub phone: Option<String>,
}
