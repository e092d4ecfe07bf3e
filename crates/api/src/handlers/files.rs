//! Handlers for the file metadata registry under `/projects/{id}/files`.
//!
//! Only metadata lives here; the bytes themselves live wherever `url`
//! points. There is no upload path.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use clientpulse_core::error::CoreError;
use clientpulse_core::types::DbId;
use clientpulse_db::models::file::{CreateFile, ProjectFile};
use clientpulse_db::repositories::{FileRepo, ProjectRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireStaff;
use crate::state::AppState;

/// GET /api/v1/projects/{id}/files
pub async fn list(
    State(state): State<AppState>,
    RequireStaff(user): RequireStaff,
    Path(project_id): Path<DbId>,
) -> AppResult<Json<Vec<ProjectFile>>> {
    ProjectRepo::find_by_id(&state.pool, user.agency_id, project_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id: project_id,
        }))?;

    let files = FileRepo::list_for_project(&state.pool, project_id).await?;
    Ok(Json(files))
}

/// POST /api/v1/projects/{id}/files
pub async fn create(
    State(state): State<AppState>,
    RequireStaff(user): RequireStaff,
    Path(project_id): Path<DbId>,
    Json(input): Json<CreateFile>,
) -> AppResult<(StatusCode, Json<ProjectFile>)> {
    if input.name.trim().is_empty() || input.url.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "File name and url must not be empty".into(),
        )));
    }
    if input.size < 0 {
        return Err(AppError::Core(CoreError::Validation(
            "File size must not be negative".into(),
        )));
    }

    ProjectRepo::find_by_id(&state.pool, user.agency_id, project_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id: project_id,
        }))?;

    let file = FileRepo::create(&state.pool, project_id, Some(user.user_id), &input).await?;
    Ok((StatusCode::CREATED, Json(file)))
}
