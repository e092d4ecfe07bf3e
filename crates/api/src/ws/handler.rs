use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use clientpulse_core::error::CoreError;
use clientpulse_core::status::UserRole;
use clientpulse_core::types::DbId;
use clientpulse_db::repositories::ProjectRepo;
use futures::{SinkExt, StreamExt};
use serde::Deserialize;

use crate::auth::jwt::validate_token;
use crate::error::{AppError, AppResult};
use crate::middleware::portal::PortalClient;
use crate::state::AppState;
use crate::ws::manager::{WsManager, WsPeer};

/// Query parameters for the staff WebSocket upgrade.
///
/// Browsers cannot set headers on WebSocket requests, so the access token
/// travels as a query parameter instead of an `Authorization` header.
#[derive(Debug, Deserialize)]
pub struct WsAuthQuery {
    pub token: String,
}

/// GET /api/v1/projects/{id}/ws?token=...
///
/// Staff chat upgrade. Validates the JWT from the query string and checks
/// that the project belongs to the caller's agency before upgrading.
pub async fn staff_ws_handler(
    ws: WebSocketUpgrade,
    Path(project_id): Path<DbId>,
    Query(query): Query<WsAuthQuery>,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let claims = validate_token(&query.token, &state.config.jwt)
        .map_err(|_| AppError::Core(CoreError::Unauthorized("Invalid or expired token".into())))?;

    let role: UserRole = claims
        .role
        .parse()
        .map_err(|()| AppError::Core(CoreError::Unauthorized("Unknown role in token".into())))?;
    if role != UserRole::Admin && role != UserRole::Member {
        return Err(AppError::Core(CoreError::Forbidden(
            "Staff role required".into(),
        )));
    }

    ProjectRepo::find_by_id(&state.pool, claims.agency_id, project_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id: project_id,
        }))?;

    let peer = WsPeer::Staff(claims.sub);
    Ok(ws.on_upgrade(move |socket| handle_socket(socket, state.ws_manager, project_id, peer)))
}

/// GET /api/v1/portal/{token}/projects/{id}/ws
///
/// Portal chat upgrade. The portal token in the path authenticates the
/// client; the project must belong to that client.
pub async fn portal_ws_handler(
    ws: WebSocketUpgrade,
    PortalClient(client): PortalClient,
    Path((_token, project_id)): Path<(String, DbId)>,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    ProjectRepo::find_by_id_for_client(&state.pool, client.id, project_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id: project_id,
        }))?;

    let peer = WsPeer::Client(client.id);
    Ok(ws.on_upgrade(move |socket| handle_socket(socket, state.ws_manager, project_id, peer)))
}

/// Manage a single WebSocket connection after upgrade.
///
/// Splits the socket into a sink (outbound) and stream (inbound), then:
///   1. Registers the connection with `WsManager` under its project.
///   2. Spawns a sender task that forwards messages from the manager channel.
///   3. Processes inbound messages on the current task.
///   4. Cleans up on disconnect.
///
/// Chat messages are posted over REST; inbound frames other than Close and
/// Pong are ignored.
async fn handle_socket(
    socket: WebSocket,
    ws_manager: Arc<WsManager>,
    project_id: DbId,
    peer: WsPeer,
) {
    let conn_id = uuid::Uuid::new_v4().to_string();
    tracing::info!(conn_id = %conn_id, project_id, ?peer, "WebSocket connected");

    // Register and get the receiver for outbound messages.
    let mut rx = ws_manager.add(conn_id.clone(), project_id, peer).await;

    let (mut sink, mut stream) = socket.split();

    // Sender task: forward channel messages to the WebSocket sink.
    let sender_conn_id = conn_id.clone();
    let send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sink.send(msg).await.is_err() {
                tracing::debug!(conn_id = %sender_conn_id, "WebSocket sink closed");
                break;
            }
        }
    });

    // Receiver loop: process inbound messages.
    while let Some(result) = stream.next().await {
        match result {
            Ok(Message::Close(_)) => break,
            Ok(Message::Pong(_)) => {
                tracing::trace!(conn_id = %conn_id, "Pong received");
            }
            Ok(_msg) => {}
            Err(e) => {
                tracing::debug!(conn_id = %conn_id, error = %e, "WebSocket receive error");
                break;
            }
        }
    }

    // Clean up: remove connection and abort sender task.
    ws_manager.remove(&conn_id).await;
    send_task.abort();
    tracing::info!(conn_id = %conn_id, project_id, "WebSocket disconnected");
}
