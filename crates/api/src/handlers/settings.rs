//! Handlers for the `/settings` resource (profile, agency, password).

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use clientpulse_core::error::CoreError;
use clientpulse_core::validation::{slugify, validate_email, validate_password_strength};
use clientpulse_db::models::agency::Agency;
use clientpulse_db::models::user::{UpdateUser, UserResponse};
use clientpulse_db::repositories::{AgencyRepo, SessionRepo, UserRepo};
use serde::{Deserialize, Serialize};

use crate::auth::password::{hash_password, verify_password};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::state::AppState;

/// Response body for `GET /settings/profile`.
#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub user: UserResponse,
    pub agency: Agency,
}

/// Request body for `PUT /settings/agency`.
#[derive(Debug, Deserialize)]
pub struct UpdateAgencyRequest {
    pub name: String,
}

/// Request body for `PUT /settings/password`.
#[derive(Debug, Deserialize)]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

/// GET /api/v1/settings/profile
pub async fn get_profile(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ProfileResponse>> {
    let row = UserRepo::find_by_id(&state.pool, user.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: user.user_id,
        }))?;

    let agency = AgencyRepo::find_by_id(&state.pool, user.agency_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Agency",
            id: user.agency_id,
        }))?;

    Ok(Json(ProfileResponse {
        user: row.into(),
        agency,
    }))
}

/// PUT /api/v1/settings/profile
pub async fn update_profile(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<UpdateUser>,
) -> AppResult<Json<UserResponse>> {
    if let Some(email) = &input.email {
        validate_email(email)?;
    }
    if let Some(name) = &input.full_name {
        if name.trim().is_empty() {
            return Err(AppError::Core(CoreError::Validation(
                "Full name must not be empty".into(),
            )));
        }
    }

    let updated = UserRepo::update(&state.pool, user.user_id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: user.user_id,
        }))?;

    Ok(Json(updated.into()))
}

/// PUT /api/v1/settings/agency
///
/// Renames the agency; the slug is regenerated from the new name.
/// Admin only.
pub async fn update_agency(
    State(state): State<AppState>,
    RequireAdmin(user): RequireAdmin,
    Json(input): Json<UpdateAgencyRequest>,
) -> AppResult<Json<Agency>> {
    let name = input.name.trim();
    if name.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Agency name must not be empty".into(),
        )));
    }

    let slug = slugify(name);
    let agency = AgencyRepo::rename(&state.pool, user.agency_id, name, &slug)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Agency",
            id: user.agency_id,
        }))?;

    Ok(Json(agency))
}

/// PUT /api/v1/settings/password
///
/// Verifies the current password before replacing the hash, then revokes
/// every session so stolen refresh tokens stop working. Returns 204.
pub async fn change_password(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<ChangePasswordRequest>,
) -> AppResult<StatusCode> {
    validate_password_strength(&input.new_password)?;

    let row = UserRepo::find_by_id(&state.pool, user.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: user.user_id,
        }))?;

    let current_valid = verify_password(&input.current_password, &row.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !current_valid {
        return Err(AppError::Core(CoreError::Unauthorized(
            "Current password is incorrect".into(),
        )));
    }

    let new_hash = hash_password(&input.new_password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;
    UserRepo::set_password_hash(&state.pool, user.user_id, &new_hash).await?;

    SessionRepo::revoke_all_for_user(&state.pool, user.user_id).await?;

    Ok(StatusCode::NO_CONTENT)
}
