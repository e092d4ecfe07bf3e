//! Handlers for staff-side project chat under `/projects/{id}/messages`.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use clientpulse_core::error::CoreError;
use clientpulse_core::types::DbId;
use clientpulse_db::models::message::{CreateMessage, MessageAuthor, MessageWithAuthor};
use clientpulse_db::repositories::{MessageRepo, ProjectRepo};
use clientpulse_events::PlatformEvent;
use serde::Deserialize;

use crate::chat::router::EVENT_MESSAGE_CREATED;
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireStaff;
use crate::state::AppState;

/// Request body for posting a chat message.
#[derive(Debug, Deserialize)]
pub struct SendMessageRequest {
    pub content: String,
}

/// GET /api/v1/projects/{id}/messages
///
/// Full history, ascending by (created_at, id).
pub async fn list(
    State(state): State<AppState>,
    RequireStaff(user): RequireStaff,
    Path(project_id): Path<DbId>,
) -> AppResult<Json<Vec<MessageWithAuthor>>> {
    ProjectRepo::find_by_id(&state.pool, user.agency_id, project_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id: project_id,
        }))?;

    let messages = MessageRepo::list_for_project(&state.pool, project_id).await?;
    Ok(Json(messages))
}

/// POST /api/v1/projects/{id}/messages
///
/// Insert a staff-authored message, publish `message.created` for realtime
/// fan-out, and return the created row with its author join.
pub async fn create(
    State(state): State<AppState>,
    RequireStaff(user): RequireStaff,
    Path(project_id): Path<DbId>,
    Json(input): Json<SendMessageRequest>,
) -> AppResult<(StatusCode, Json<MessageWithAuthor>)> {
    if input.content.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Message content must not be empty".into(),
        )));
    }

    ProjectRepo::find_by_id(&state.pool, user.agency_id, project_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id: project_id,
        }))?;

    let create = CreateMessage {
        project_id,
        author: MessageAuthor::Staff(user.user_id),
        content: input.content,
    };
    let message = MessageRepo::create(&state.pool, &create).await?;

    state.event_bus.publish(
        PlatformEvent::new(EVENT_MESSAGE_CREATED)
            .with_project(project_id)
            .with_source("message", message.id),
    );

    // The caller gets the same hydrated shape the WebSocket frame carries.
    let hydrated = MessageRepo::find_with_author(&state.pool, message.id)
        .await?
        .ok_or_else(|| AppError::InternalError("Created message vanished".into()))?;

    Ok((StatusCode::CREATED, Json(hydrated)))
}
