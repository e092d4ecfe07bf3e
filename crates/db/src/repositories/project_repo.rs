//! Repository for the `projects` table.

use clientpulse_core::types::DbId;
use sqlx::PgPool;

use crate::models::project::{
    CreateProject, Project, ProjectSummary, ProjectWithClient, UpdateProject,
};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, agency_id, client_id, name, description, status, progress, \
                        start_date, due_date, budget, created_at, updated_at";

/// Columns for the client-name join, prefixed to disambiguate.
const JOINED_COLUMNS: &str = "p.id, p.agency_id, p.client_id, c.name AS client_name, p.name, \
                               p.description, p.status, p.progress, p.start_date, p.due_date, \
                               p.budget, p.created_at, p.updated_at";

/// Provides CRUD operations for projects, scoped to a single agency.
pub struct ProjectRepo;

impl ProjectRepo {
    /// Insert a new project, returning the created row.
    ///
    /// `progress` is expected to be pre-clamped by the caller; the status
    /// defaults to `planning` if omitted.
    pub async fn create(
        pool: &PgPool,
        agency_id: DbId,
        input: &CreateProject,
    ) -> Result<Project, sqlx::Error> {
        let query = format!(
            "INSERT INTO projects (agency_id, client_id, name, description, status, progress,
                                   start_date, due_date, budget)
             VALUES ($1, $2, $3, $4, COALESCE($5, 'planning'), COALESCE($6, 0), $7, $8, $9)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(agency_id)
            .bind(input.client_id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.status)
            .bind(input.progress)
            .bind(input.start_date)
            .bind(input.due_date)
            .bind(input.budget)
            .fetch_one(pool)
            .await
    }

    /// Find a project by ID within the given agency.
    pub async fn find_by_id(
        pool: &PgPool,
        agency_id: DbId,
        id: DbId,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = $1 AND agency_id = $2");
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(agency_id)
            .fetch_optional(pool)
            .await
    }

    /// Find a project by ID belonging to the given client. Used by the
    /// portal, where the client (not the agency) is the trust anchor.
    pub async fn find_by_id_for_client(
        pool: &PgPool,
        client_id: DbId,
        id: DbId,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = $1 AND client_id = $2");
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(client_id)
            .fetch_optional(pool)
            .await
    }

    /// List all projects for an agency joined with client names, most
    /// recently updated first.
    pub async fn list(
        pool: &PgPool,
        agency_id: DbId,
    ) -> Result<Vec<ProjectWithClient>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS}
             FROM projects p
             JOIN clients c ON c.id = p.client_id
             WHERE p.agency_id = $1
             ORDER BY p.updated_at DESC"
        );
        sqlx::query_as::<_, ProjectWithClient>(&query)
            .bind(agency_id)
            .fetch_all(pool)
            .await
    }

    /// List a client's projects with task/message/file counts, most
    /// recently updated first. Backs the portal overview.
    pub async fn list_summaries_for_client(
        pool: &PgPool,
        client_id: DbId,
    ) -> Result<Vec<ProjectSummary>, sqlx::Error> {
        sqlx::query_as::<_, ProjectSummary>(
            "SELECT p.id, p.name, p.description, p.status, p.progress, p.start_date, p.due_date,
                    (SELECT COUNT(*) FROM tasks t WHERE t.project_id = p.id) AS task_count,
                    (SELECT COUNT(*) FROM messages m WHERE m.project_id = p.id) AS message_count,
                    (SELECT COUNT(*) FROM files f WHERE f.project_id = p.id) AS file_count,
                    p.updated_at
             FROM projects p
             WHERE p.client_id = $1
             ORDER BY p.updated_at DESC",
        )
        .bind(client_id)
        .fetch_all(pool)
        .await
    }

    /// Update a project. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row matches within the agency.
    pub async fn update(
        pool: &PgPool,
        agency_id: DbId,
        id: DbId,
        input: &UpdateProject,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!(
            "UPDATE projects SET
                name = COALESCE($3, name),
                description = COALESCE($4, description),
                status = COALESCE($5, status),
                progress = COALESCE($6, progress),
                start_date = COALESCE($7, start_date),
                due_date = COALESCE($8, due_date),
                budget = COALESCE($9, budget),
                updated_at = NOW()
             WHERE id = $1 AND agency_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(agency_id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.status)
            .bind(input.progress)
            .bind(input.start_date)
            .bind(input.due_date)
            .bind(input.budget)
            .fetch_optional(pool)
            .await
    }

    /// Count an agency's projects that are not completed or on hold.
    pub async fn count_active(pool: &PgPool, agency_id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT COUNT(*) FROM projects
             WHERE agency_id = $1 AND status NOT IN ('completed', 'on_hold')",
        )
        .bind(agency_id)
        .fetch_one(pool)
        .await
    }

    /// Delete a project within the given agency. Returns `true` if a row
    /// was removed. Cascades to tasks, messages, and files.
    pub async fn delete(pool: &PgPool, agency_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1 AND agency_id = $2")
            .bind(id)
            .bind(agency_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
