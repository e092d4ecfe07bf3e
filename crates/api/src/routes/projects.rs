//! Route definitions for the `/projects` resource.
//!
//! Also nests tasks, messages, files, and the staff chat WebSocket under
//! `/projects/{project_id}/...`.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{files, messages, projects, tasks};
use crate::state::AppState;
use crate::ws;

/// Routes mounted at `/projects`.
///
/// ```text
/// GET    /                                  -> list
/// POST   /                                  -> create
/// GET    /{id}                              -> get_by_id
/// PUT    /{id}                              -> update
/// DELETE /{id}                              -> delete
/// GET    /{id}/ws                           -> staff chat upgrade
///
/// GET    /{id}/tasks                        -> list
/// POST   /{id}/tasks                        -> create
/// PUT    /{id}/tasks/{task_id}              -> update
/// POST   /{id}/tasks/{task_id}/advance      -> advance
/// DELETE /{id}/tasks/{task_id}              -> delete
///
/// GET    /{id}/messages                     -> list
/// POST   /{id}/messages                     -> create
///
/// GET    /{id}/files                        -> list
/// POST   /{id}/files                        -> create
/// ```
pub fn router() -> Router<AppState> {
    let task_routes = Router::new()
        .route("/", get(tasks::list).post(tasks::create))
        .route(
            "/{task_id}",
            axum::routing::put(tasks::update).delete(tasks::delete),
        )
        .route("/{task_id}/advance", post(tasks::advance));

    Router::new()
        .route("/", get(projects::list).post(projects::create))
        .route(
            "/{id}",
            get(projects::get_by_id)
                .put(projects::update)
                .delete(projects::delete),
        )
        .route("/{id}/ws", get(ws::staff_ws_handler))
        .nest("/{id}/tasks", task_routes)
        .route("/{id}/messages", get(messages::list).post(messages::create))
        .route("/{id}/files", get(files::list).post(files::create))
}
