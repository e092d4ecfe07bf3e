//! Handlers for tasks nested under `/projects/{project_id}/tasks`.
//!
//! Every handler first pins the parent project to the caller's agency, so a
//! task id from another tenant's project can never be addressed.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use clientpulse_core::error::CoreError;
use clientpulse_core::types::DbId;
use clientpulse_db::models::task::{CreateTask, Task, UpdateTask};
use clientpulse_db::repositories::{ProjectRepo, TaskRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireStaff;
use crate::state::AppState;

/// Verify the project exists within the caller's agency.
async fn check_project(state: &AppState, agency_id: DbId, project_id: DbId) -> AppResult<()> {
    ProjectRepo::find_by_id(&state.pool, agency_id, project_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id: project_id,
        }))?;
    Ok(())
}

/// POST /api/v1/projects/{project_id}/tasks
pub async fn create(
    State(state): State<AppState>,
    RequireStaff(user): RequireStaff,
    Path(project_id): Path<DbId>,
    Json(input): Json<CreateTask>,
) -> AppResult<(StatusCode, Json<Task>)> {
    if input.title.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Task title must not be empty".into(),
        )));
    }
    check_project(&state, user.agency_id, project_id).await?;

    let task = TaskRepo::create(&state.pool, project_id, &input).await?;
    Ok((StatusCode::CREATED, Json(task)))
}

/// GET /api/v1/projects/{project_id}/tasks
pub async fn list(
    State(state): State<AppState>,
    RequireStaff(user): RequireStaff,
    Path(project_id): Path<DbId>,
) -> AppResult<Json<Vec<Task>>> {
    check_project(&state, user.agency_id, project_id).await?;

    let tasks = TaskRepo::list_for_project(&state.pool, project_id).await?;
    Ok(Json(tasks))
}

/// PUT /api/v1/projects/{project_id}/tasks/{id}
pub async fn update(
    State(state): State<AppState>,
    RequireStaff(user): RequireStaff,
    Path((project_id, id)): Path<(DbId, DbId)>,
    Json(input): Json<UpdateTask>,
) -> AppResult<Json<Task>> {
    check_project(&state, user.agency_id, project_id).await?;

    let task = TaskRepo::update(&state.pool, project_id, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Task", id }))?;
    Ok(Json(task))
}

/// POST /api/v1/projects/{project_id}/tasks/{id}/advance
///
/// Cycle the task status (todo -> in_progress -> done -> todo) and return
/// the updated row. Concurrent advances are last-write-wins.
pub async fn advance(
    State(state): State<AppState>,
    RequireStaff(user): RequireStaff,
    Path((project_id, id)): Path<(DbId, DbId)>,
) -> AppResult<Json<Task>> {
    check_project(&state, user.agency_id, project_id).await?;

    let task = TaskRepo::find_by_id(&state.pool, project_id, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Task", id }))?;

    let next = task.status.next();
    let updated = TaskRepo::set_status(&state.pool, project_id, id, next)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Task", id }))?;
    Ok(Json(updated))
}

/// DELETE /api/v1/projects/{project_id}/tasks/{id}
pub async fn delete(
    State(state): State<AppState>,
    RequireStaff(user): RequireStaff,
    Path((project_id, id)): Path<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    check_project(&state, user.agency_id, project_id).await?;

    let deleted = TaskRepo::delete(&state.pool, project_id, id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound { entity: "Task", id }))
    }
}
