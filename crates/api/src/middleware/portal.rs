//! Portal-token authentication extractor.
//!
//! The client portal is token-gated rather than password-gated: each client
//! row carries an opaque `portal_token`, and knowing the token grants
//! read-mostly access to that client's own data. [`PortalClient`] resolves
//! the `{token}` path segment to the owning client row, so portal handlers
//! receive an already-authenticated [`Client`].

use std::collections::HashMap;

use axum::extract::{FromRequestParts, Path};
use axum::http::request::Parts;
use clientpulse_core::error::CoreError;
use clientpulse_core::portal::is_portal_token_shaped;
use clientpulse_db::models::client::Client;
use clientpulse_db::repositories::ClientRepo;

use crate::error::AppError;
use crate::state::AppState;

/// Client resolved from the `{token}` path segment of a portal route.
///
/// ```ignore
/// async fn portal_overview(PortalClient(client): PortalClient) -> AppResult<Json<()>> {
///     // client is the row whose portal_token matched the URL
///     Ok(Json(()))
/// }
/// ```
pub struct PortalClient(pub Client);

impl FromRequestParts<AppState> for PortalClient {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let params: Path<HashMap<String, String>> =
            Path::from_request_parts(parts, state).await.map_err(|_| {
                AppError::Core(CoreError::Unauthorized("Missing portal token".into()))
            })?;

        let token = params
            .get("token")
            .ok_or_else(|| AppError::Core(CoreError::Unauthorized("Missing portal token".into())))?;

        // Cheap shape check before hitting the database.
        if !is_portal_token_shaped(token) {
            return Err(AppError::Core(CoreError::Unauthorized(
                "Invalid portal token".into(),
            )));
        }

        let client = ClientRepo::find_by_portal_token(&state.pool, token)
            .await?
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized("Invalid portal token".into()))
            })?;

        Ok(PortalClient(client))
    }
}
