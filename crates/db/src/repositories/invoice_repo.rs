//! Repository for the `invoices` table.

use chrono::NaiveDate;
use clientpulse_core::status::InvoiceStatus;
use clientpulse_core::types::DbId;
use sqlx::PgPool;

use crate::models::invoice::{CreateInvoice, Invoice, InvoiceWithNames};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, agency_id, client_id, project_id, number, amount, status, \
                        due_date, paid_at, created_at, updated_at";

/// Provides CRUD operations for invoices, scoped to a single agency.
pub struct InvoiceRepo;

impl InvoiceRepo {
    /// Insert a new draft invoice with a server-generated number, returning
    /// the created row.
    pub async fn create(
        pool: &PgPool,
        agency_id: DbId,
        input: &CreateInvoice,
        number: &str,
    ) -> Result<Invoice, sqlx::Error> {
        let query = format!(
            "INSERT INTO invoices (agency_id, client_id, project_id, number, amount, due_date)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Invoice>(&query)
            .bind(agency_id)
            .bind(input.client_id)
            .bind(input.project_id)
            .bind(number)
            .bind(input.amount)
            .bind(input.due_date)
            .fetch_one(pool)
            .await
    }

    /// Find an invoice by ID within the given agency.
    pub async fn find_by_id(
        pool: &PgPool,
        agency_id: DbId,
        id: DbId,
    ) -> Result<Option<Invoice>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM invoices WHERE id = $1 AND agency_id = $2");
        sqlx::query_as::<_, Invoice>(&query)
            .bind(id)
            .bind(agency_id)
            .fetch_optional(pool)
            .await
    }

    /// List all invoices for an agency joined with client and project
    /// names, most recent first.
    pub async fn list(pool: &PgPool, agency_id: DbId) -> Result<Vec<InvoiceWithNames>, sqlx::Error> {
        sqlx::query_as::<_, InvoiceWithNames>(
            "SELECT i.id, i.agency_id, i.client_id, c.name AS client_name,
                    i.project_id, p.name AS project_name,
                    i.number, i.amount, i.status, i.due_date, i.paid_at,
                    i.created_at, i.updated_at
             FROM invoices i
             JOIN clients c ON c.id = i.client_id
             LEFT JOIN projects p ON p.id = i.project_id
             WHERE i.agency_id = $1
             ORDER BY i.created_at DESC",
        )
        .bind(agency_id)
        .fetch_all(pool)
        .await
    }

    /// Set an invoice's status. When moving to `paid`, also stamps
    /// `paid_at`. Returns the updated row, or `None` if no row matches.
    pub async fn set_status(
        pool: &PgPool,
        agency_id: DbId,
        id: DbId,
        status: InvoiceStatus,
    ) -> Result<Option<Invoice>, sqlx::Error> {
        let query = format!(
            "UPDATE invoices SET
                status = $3,
                paid_at = CASE WHEN $3 = 'paid'::invoice_status THEN NOW() ELSE paid_at END,
                updated_at = NOW()
             WHERE id = $1 AND agency_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Invoice>(&query)
            .bind(id)
            .bind(agency_id)
            .bind(status)
            .fetch_optional(pool)
            .await
    }

    /// Mark all `sent` invoices with a due date before `today` as
    /// `overdue`. Returns the number of rows updated. Runs across all
    /// agencies; invoked by the background sweep, not a request handler.
    pub async fn mark_overdue(pool: &PgPool, today: NaiveDate) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE invoices SET status = 'overdue', updated_at = NOW()
             WHERE status = 'sent' AND due_date < $1",
        )
        .bind(today)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }

    /// Sum of outstanding (sent + overdue) invoice amounts for an agency.
    pub async fn outstanding_total(pool: &PgPool, agency_id: DbId) -> Result<f64, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT COALESCE(SUM(amount), 0)
             FROM invoices
             WHERE agency_id = $1 AND status IN ('sent', 'overdue')",
        )
        .bind(agency_id)
        .fetch_one(pool)
        .await
    }

    /// Sum of paid invoice amounts for an agency.
    pub async fn paid_total(pool: &PgPool, agency_id: DbId) -> Result<f64, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT COALESCE(SUM(amount), 0)
             FROM invoices
             WHERE agency_id = $1 AND status = 'paid'",
        )
        .bind(agency_id)
        .fetch_one(pool)
        .await
    }

    /// Delete an invoice within the given agency. Returns `true` if a row
    /// was removed.
    pub async fn delete(pool: &PgPool, agency_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM invoices WHERE id = $1 AND agency_id = $2")
            .bind(id)
            .bind(agency_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
