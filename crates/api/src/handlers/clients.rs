//! Handlers for the `/clients` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use clientpulse_core::error::CoreError;
use clientpulse_core::portal::generate_portal_token;
use clientpulse_core::types::DbId;
use clientpulse_core::validation::validate_email;
use clientpulse_db::models::client::{Client, ClientWithProjectCount, CreateClient};
use clientpulse_db::repositories::ClientRepo;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireStaff;
use crate::state::AppState;

/// Response body for `POST /clients`: the created row plus the shareable
/// portal link the agency hands to the client.
#[derive(Debug, Serialize)]
pub struct CreatedClientResponse {
    #[serde(flatten)]
    pub client: Client,
    pub portal_url: String,
}

/// POST /api/v1/clients
pub async fn create(
    State(state): State<AppState>,
    RequireStaff(user): RequireStaff,
    Json(input): Json<CreateClient>,
) -> AppResult<(StatusCode, Json<CreatedClientResponse>)> {
    validate_email(&input.email)?;
    if input.name.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Client name must not be empty".into(),
        )));
    }

    // Token is generated here, never accepted from the request body.
    let portal_token = generate_portal_token();
    let client = ClientRepo::create(&state.pool, user.agency_id, &input, &portal_token).await?;

    let portal_url = format!("{}/{}", state.config.portal_base_url, client.portal_token);
    Ok((
        StatusCode::CREATED,
        Json(CreatedClientResponse { client, portal_url }),
    ))
}

/// GET /api/v1/clients
pub async fn list(
    State(state): State<AppState>,
    RequireStaff(user): RequireStaff,
) -> AppResult<Json<Vec<ClientWithProjectCount>>> {
    let clients = ClientRepo::list(&state.pool, user.agency_id).await?;
    Ok(Json(clients))
}

/// GET /api/v1/clients/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    RequireStaff(user): RequireStaff,
    Path(id): Path<DbId>,
) -> AppResult<Json<Client>> {
    let client = ClientRepo::find_by_id(&state.pool, user.agency_id, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Client",
            id,
        }))?;
    Ok(Json(client))
}

/// DELETE /api/v1/clients/{id}
pub async fn delete(
    State(state): State<AppState>,
    RequireStaff(user): RequireStaff,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = ClientRepo::delete(&state.pool, user.agency_id, id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Client",
            id,
        }))
    }
}
