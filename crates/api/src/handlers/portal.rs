//! Handlers for the token-gated client portal under `/portal/{token}`.
//!
//! Every handler authenticates through [`PortalClient`], which resolves the
//! token path segment to a client row. The client, not the agency, is the
//! trust anchor here: project lookups pin `client_id`.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use clientpulse_core::error::CoreError;
use clientpulse_core::types::DbId;
use clientpulse_db::models::agency::Agency;
use clientpulse_db::models::client::Client;
use clientpulse_db::models::file::ProjectFile;
use clientpulse_db::models::message::{CreateMessage, MessageAuthor, MessageWithAuthor};
use clientpulse_db::models::project::{Project, ProjectSummary};
use clientpulse_db::models::task::Task;
use clientpulse_db::repositories::{
    AgencyRepo, FileRepo, MessageRepo, ProjectRepo, TaskRepo,
};
use clientpulse_events::PlatformEvent;
use serde::Serialize;

use crate::chat::router::EVENT_MESSAGE_CREATED;
use crate::error::{AppError, AppResult};
use crate::handlers::messages::SendMessageRequest;
use crate::middleware::portal::PortalClient;
use crate::state::AppState;

/// Response body for `GET /portal/{token}`.
#[derive(Debug, Serialize)]
pub struct PortalOverview {
    pub client: Client,
    /// The agency the client belongs to, for portal branding.
    pub agency: Agency,
    pub projects: Vec<ProjectSummary>,
}

/// Response body for `GET /portal/{token}/projects/{id}`.
#[derive(Debug, Serialize)]
pub struct PortalProjectDetail {
    pub project: Project,
    pub tasks: Vec<Task>,
    pub files: Vec<ProjectFile>,
}

/// GET /api/v1/portal/{token}
pub async fn overview(
    State(state): State<AppState>,
    PortalClient(client): PortalClient,
) -> AppResult<Json<PortalOverview>> {
    let agency = AgencyRepo::find_by_id(&state.pool, client.agency_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Agency",
            id: client.agency_id,
        }))?;

    let projects = ProjectRepo::list_summaries_for_client(&state.pool, client.id).await?;

    Ok(Json(PortalOverview {
        client,
        agency,
        projects,
    }))
}

/// GET /api/v1/portal/{token}/projects/{id}
pub async fn project_detail(
    State(state): State<AppState>,
    PortalClient(client): PortalClient,
    Path((_token, project_id)): Path<(String, DbId)>,
) -> AppResult<Json<PortalProjectDetail>> {
    let project = ProjectRepo::find_by_id_for_client(&state.pool, client.id, project_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id: project_id,
        }))?;

    let tasks = TaskRepo::list_for_project(&state.pool, project_id).await?;
    let files = FileRepo::list_for_project(&state.pool, project_id).await?;

    Ok(Json(PortalProjectDetail {
        project,
        tasks,
        files,
    }))
}

/// GET /api/v1/portal/{token}/projects/{id}/messages
pub async fn list_messages(
    State(state): State<AppState>,
    PortalClient(client): PortalClient,
    Path((_token, project_id)): Path<(String, DbId)>,
) -> AppResult<Json<Vec<MessageWithAuthor>>> {
    ProjectRepo::find_by_id_for_client(&state.pool, client.id, project_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id: project_id,
        }))?;

    let messages = MessageRepo::list_for_project(&state.pool, project_id).await?;
    Ok(Json(messages))
}

/// POST /api/v1/portal/{token}/projects/{id}/messages
///
/// Insert a client-authored message, publish `message.created` for realtime
/// fan-out, and return the created row with its author join.
pub async fn create_message(
    State(state): State<AppState>,
    PortalClient(client): PortalClient,
    Path((_token, project_id)): Path<(String, DbId)>,
    Json(input): Json<SendMessageRequest>,
) -> AppResult<(StatusCode, Json<MessageWithAuthor>)> {
    if input.content.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Message content must not be empty".into(),
        )));
    }

    ProjectRepo::find_by_id_for_client(&state.pool, client.id, project_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id: project_id,
        }))?;

    let create = CreateMessage {
        project_id,
        author: MessageAuthor::Client(client.id),
        content: input.content,
    };
    let message = MessageRepo::create(&state.pool, &create).await?;

    state.event_bus.publish(
        PlatformEvent::new(EVENT_MESSAGE_CREATED)
            .with_project(project_id)
            .with_source("message", message.id),
    );

    let hydrated = MessageRepo::find_with_author(&state.pool, message.id)
        .await?
        .ok_or_else(|| AppError::InternalError("Created message vanished".into()))?;

    Ok((StatusCode::CREATED, Json(hydrated)))
}
