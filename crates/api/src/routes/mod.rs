pub mod auth;
pub mod clients;
pub mod dashboard;
pub mod health;
pub mod invoices;
pub mod portal;
pub mod projects;
pub mod settings;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/signup                                 signup (public)
/// /auth/login                                  login (public)
/// /auth/refresh                                refresh (public)
/// /auth/logout                                 logout (requires auth)
///
/// /settings/profile                            get, update profile
/// /settings/agency                             rename agency (admin only)
/// /settings/password                           change password
///
/// /clients                                     list, create
/// /clients/{id}                                get, delete
///
/// /projects                                    list, create
/// /projects/{id}                               get, update, delete
/// /projects/{id}/ws                            staff chat WebSocket
/// /projects/{id}/tasks                         list, create
/// /projects/{id}/tasks/{task_id}               update, delete
/// /projects/{id}/tasks/{task_id}/advance       cycle status (POST)
/// /projects/{id}/messages                      history, send
/// /projects/{id}/files                         list, register metadata
///
/// /invoices                                    list, create
/// /invoices/{id}                               get, delete
/// /invoices/{id}/status                        transition (PUT)
///
/// /portal/{token}                              client overview (token-gated)
/// /portal/{token}/projects/{id}                project detail
/// /portal/{token}/projects/{id}/messages       history, send
/// /portal/{token}/projects/{id}/ws             portal chat WebSocket
///
/// /dashboard                                   agency summary
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/settings", settings::router())
        .nest("/clients", clients::router())
        // Project routes (also nest tasks, messages, files, and chat WS).
        .nest("/projects", projects::router())
        .nest("/invoices", invoices::router())
        // Token-gated client portal; no JWT involved.
        .nest("/portal", portal::router())
        .nest("/dashboard", dashboard::router())
}
