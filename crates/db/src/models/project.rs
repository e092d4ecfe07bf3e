//! Project entity model and DTOs.

use chrono::NaiveDate;
use clientpulse_core::status::ProjectStatus;
use clientpulse_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A project row from the `projects` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Project {
    pub id: DbId,
    pub agency_id: DbId,
    pub client_id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub status: ProjectStatus,
    /// Manually set completion percentage in [0, 100]; independent of task
    /// statuses.
    pub progress: i32,
    pub start_date: Option<NaiveDate>,
    pub due_date: Option<NaiveDate>,
    pub budget: Option<f64>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A project row joined with its client's display name, for listings.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProjectWithClient {
    pub id: DbId,
    pub agency_id: DbId,
    pub client_id: DbId,
    pub client_name: String,
    pub name: String,
    pub description: Option<String>,
    pub status: ProjectStatus,
    pub progress: i32,
    pub start_date: Option<NaiveDate>,
    pub due_date: Option<NaiveDate>,
    pub budget: Option<f64>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A project row with task/message/file counts, for the client portal view.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProjectSummary {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub status: ProjectStatus,
    pub progress: i32,
    pub start_date: Option<NaiveDate>,
    pub due_date: Option<NaiveDate>,
    pub task_count: i64,
    pub message_count: i64,
    pub file_count: i64,
    pub updated_at: Timestamp,
}

/// DTO for creating a new project.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProject {
    pub client_id: DbId,
    pub name: String,
    pub description: Option<String>,
    /// Defaults to `planning` if omitted.
    pub status: Option<ProjectStatus>,
    /// Defaults to 0; clamped to [0, 100] by the handler.
    pub progress: Option<i32>,
    pub start_date: Option<NaiveDate>,
    pub due_date: Option<NaiveDate>,
    pub budget: Option<f64>,
}

/// DTO for updating an existing project. All fields are optional.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateProject {
    pub name: Option<String>,
    pub description: Option<String>,
    pub status: Option<ProjectStatus>,
    pub progress: Option<i32>,
    pub start_date: Option<NaiveDate>,
    pub due_date: Option<NaiveDate>,
    pub budget: Option<f64>,
}
