//! Invoice entity model and DTOs.

use chrono::NaiveDate;
use clientpulse_core::status::InvoiceStatus;
use clientpulse_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// An invoice row from the `invoices` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Invoice {
    pub id: DbId,
    pub agency_id: DbId,
    pub client_id: DbId,
    pub project_id: Option<DbId>,
    pub number: String,
    pub amount: f64,
    pub status: InvoiceStatus,
    pub due_date: NaiveDate,
    pub paid_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// An invoice row joined with client and project display names.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct InvoiceWithNames {
    pub id: DbId,
    pub agency_id: DbId,
    pub client_id: DbId,
    pub client_name: String,
    pub project_id: Option<DbId>,
    pub project_name: Option<String>,
    pub number: String,
    pub amount: f64,
    pub status: InvoiceStatus,
    pub due_date: NaiveDate,
    pub paid_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new invoice. The number is generated server-side.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateInvoice {
    pub client_id: DbId,
    pub project_id: Option<DbId>,
    pub amount: f64,
    pub due_date: NaiveDate,
}
