//! Route definitions for the token-gated client portal.
//!
//! All routes live under `/portal/{token}`; the token path segment is the
//! sole credential and is resolved by the `PortalClient` extractor.

use axum::routing::get;
use axum::Router;

use crate::handlers::portal;
use crate::state::AppState;
use crate::ws;

/// Routes mounted at `/portal`.
///
/// ```text
/// GET  /{token}                         -> overview
/// GET  /{token}/projects/{id}           -> project_detail
/// GET  /{token}/projects/{id}/messages  -> list_messages
/// POST /{token}/projects/{id}/messages  -> create_message
/// GET  /{token}/projects/{id}/ws        -> portal chat upgrade
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{token}", get(portal::overview))
        .route("/{token}/projects/{id}", get(portal::project_detail))
        .route(
            "/{token}/projects/{id}/messages",
            get(portal::list_messages).post(portal::create_message),
        )
        .route("/{token}/projects/{id}/ws", get(ws::portal_ws_handler))
}
