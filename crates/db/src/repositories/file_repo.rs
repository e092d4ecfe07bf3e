//! Repository for the `files` table (metadata registry only).

use clientpulse_core::types::DbId;
use sqlx::PgPool;

use crate::models::file::{CreateFile, ProjectFile};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, project_id, name, url, size, mime_type, uploaded_by, created_at";

/// Provides operations for project file metadata.
pub struct FileRepo;

impl FileRepo {
    /// Register file metadata against a project, returning the created row.
    pub async fn create(
        pool: &PgPool,
        project_id: DbId,
        uploaded_by: Option<DbId>,
        input: &CreateFile,
    ) -> Result<ProjectFile, sqlx::Error> {
        let query = format!(
            "INSERT INTO files (project_id, name, url, size, mime_type, uploaded_by)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ProjectFile>(&query)
            .bind(project_id)
            .bind(&input.name)
            .bind(&input.url)
            .bind(input.size)
            .bind(&input.mime_type)
            .bind(uploaded_by)
            .fetch_one(pool)
            .await
    }

    /// List all files for a project, newest first.
    pub async fn list_for_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<ProjectFile>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM files WHERE project_id = $1 ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, ProjectFile>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }
}
