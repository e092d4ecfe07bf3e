//! Route definitions for the `/settings` resource.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::settings;
use crate::state::AppState;

/// Routes mounted at `/settings`.
///
/// ```text
/// GET /profile   -> get_profile
/// PUT /profile   -> update_profile
/// PUT /agency    -> update_agency (admin only)
/// PUT /password  -> change_password
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/profile",
            get(settings::get_profile).put(settings::update_profile),
        )
        .route("/agency", put(settings::update_agency))
        .route("/password", put(settings::change_password))
}
