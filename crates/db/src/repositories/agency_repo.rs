//! Repository for the `agencies` table.

use clientpulse_core::types::DbId;
use sqlx::PgPool;

use crate::models::agency::{Agency, CreateAgency};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, slug, logo_url, created_at, updated_at";

/// Provides CRUD operations for agencies.
pub struct AgencyRepo;

impl AgencyRepo {
    /// Insert a new agency, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateAgency) -> Result<Agency, sqlx::Error> {
        let query = format!(
            "INSERT INTO agencies (name, slug)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Agency>(&query)
            .bind(&input.name)
            .bind(&input.slug)
            .fetch_one(pool)
            .await
    }

    /// Find an agency by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Agency>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM agencies WHERE id = $1");
        sqlx::query_as::<_, Agency>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Rename an agency, updating its slug at the same time.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn rename(
        pool: &PgPool,
        id: DbId,
        name: &str,
        slug: &str,
    ) -> Result<Option<Agency>, sqlx::Error> {
        let query = format!(
            "UPDATE agencies SET name = $2, slug = $3, updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Agency>(&query)
            .bind(id)
            .bind(name)
            .bind(slug)
            .fetch_optional(pool)
            .await
    }
}
