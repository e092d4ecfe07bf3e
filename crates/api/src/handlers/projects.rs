//! Handlers for the `/projects` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use clientpulse_core::error::CoreError;
use clientpulse_core::types::DbId;
use clientpulse_core::validation::{clamp_progress, validate_date_range};
use clientpulse_db::models::project::{CreateProject, Project, ProjectWithClient, UpdateProject};
use clientpulse_db::repositories::{ClientRepo, ProjectRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireStaff;
use crate::state::AppState;

/// POST /api/v1/projects
pub async fn create(
    State(state): State<AppState>,
    RequireStaff(user): RequireStaff,
    Json(mut input): Json<CreateProject>,
) -> AppResult<(StatusCode, Json<Project>)> {
    if input.name.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Project name must not be empty".into(),
        )));
    }
    validate_date_range(input.start_date, input.due_date)?;

    // Progress is clamped server-side, never trusted from the body.
    input.progress = input.progress.map(clamp_progress);

    // The client must belong to the caller's agency.
    ClientRepo::find_by_id(&state.pool, user.agency_id, input.client_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Client",
            id: input.client_id,
        }))?;

    let project = ProjectRepo::create(&state.pool, user.agency_id, &input).await?;
    Ok((StatusCode::CREATED, Json(project)))
}

/// GET /api/v1/projects
pub async fn list(
    State(state): State<AppState>,
    RequireStaff(user): RequireStaff,
) -> AppResult<Json<Vec<ProjectWithClient>>> {
    let projects = ProjectRepo::list(&state.pool, user.agency_id).await?;
    Ok(Json(projects))
}

/// GET /api/v1/projects/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    RequireStaff(user): RequireStaff,
    Path(id): Path<DbId>,
) -> AppResult<Json<Project>> {
    let project = ProjectRepo::find_by_id(&state.pool, user.agency_id, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }))?;
    Ok(Json(project))
}

/// PUT /api/v1/projects/{id}
pub async fn update(
    State(state): State<AppState>,
    RequireStaff(user): RequireStaff,
    Path(id): Path<DbId>,
    Json(mut input): Json<UpdateProject>,
) -> AppResult<Json<Project>> {
    input.progress = input.progress.map(clamp_progress);

    // When only one end of the range changes, validate against the stored
    // other end.
    if input.start_date.is_some() || input.due_date.is_some() {
        let existing = ProjectRepo::find_by_id(&state.pool, user.agency_id, id)
            .await?
            .ok_or(AppError::Core(CoreError::NotFound {
                entity: "Project",
                id,
            }))?;
        let start = input.start_date.or(existing.start_date);
        let due = input.due_date.or(existing.due_date);
        validate_date_range(start, due)?;
    }

    let project = ProjectRepo::update(&state.pool, user.agency_id, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }))?;
    Ok(Json(project))
}

/// DELETE /api/v1/projects/{id}
pub async fn delete(
    State(state): State<AppState>,
    RequireStaff(user): RequireStaff,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = ProjectRepo::delete(&state.pool, user.agency_id, id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }))
    }
}
