//! Repository for the `clients` table.

use clientpulse_core::types::DbId;
use sqlx::PgPool;

use crate::models::client::{Client, ClientWithProjectCount, CreateClient};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, agency_id, name, email, company, phone, portal_token, created_at, updated_at";

/// Provides CRUD operations for clients, scoped to a single agency.
pub struct ClientRepo;

impl ClientRepo {
    /// Insert a new client with a server-generated portal token, returning
    /// the created row.
    pub async fn create(
        pool: &PgPool,
        agency_id: DbId,
        input: &CreateClient,
        portal_token: &str,
    ) -> Result<Client, sqlx::Error> {
        let query = format!(
            "INSERT INTO clients (agency_id, name, email, company, phone, portal_token)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Client>(&query)
            .bind(agency_id)
            .bind(&input.name)
            .bind(&input.email)
            .bind(&input.company)
            .bind(&input.phone)
            .bind(portal_token)
            .fetch_one(pool)
            .await
    }

    /// Find a client by ID within the given agency.
    pub async fn find_by_id(
        pool: &PgPool,
        agency_id: DbId,
        id: DbId,
    ) -> Result<Option<Client>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM clients WHERE id = $1 AND agency_id = $2");
        sqlx::query_as::<_, Client>(&query)
            .bind(id)
            .bind(agency_id)
            .fetch_optional(pool)
            .await
    }

    /// Resolve a client by its portal token. Exact match; tokens are stored
    /// in plaintext.
    pub async fn find_by_portal_token(
        pool: &PgPool,
        token: &str,
    ) -> Result<Option<Client>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM clients WHERE portal_token = $1");
        sqlx::query_as::<_, Client>(&query)
            .bind(token)
            .fetch_optional(pool)
            .await
    }

    /// List all clients for an agency with their project counts, ordered by
    /// name.
    pub async fn list(
        pool: &PgPool,
        agency_id: DbId,
    ) -> Result<Vec<ClientWithProjectCount>, sqlx::Error> {
        sqlx::query_as::<_, ClientWithProjectCount>(
            "SELECT c.id, c.agency_id, c.name, c.email, c.company, c.phone, c.portal_token,
                    COUNT(p.id) AS project_count, c.created_at, c.updated_at
             FROM clients c
             LEFT JOIN projects p ON p.client_id = c.id
             WHERE c.agency_id = $1
             GROUP BY c.id
             ORDER BY c.name",
        )
        .bind(agency_id)
        .fetch_all(pool)
        .await
    }

    /// Count the clients belonging to an agency.
    pub async fn count(pool: &PgPool, agency_id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM clients WHERE agency_id = $1")
            .bind(agency_id)
            .fetch_one(pool)
            .await
    }

    /// Delete a client within the given agency. Returns `true` if a row was
    /// removed. Cascades to the client's projects.
    pub async fn delete(pool: &PgPool, agency_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM clients WHERE id = $1 AND agency_id = $2")
            .bind(id)
            .bind(agency_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
