//! Route definitions for the `/invoices` resource.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::invoices;
use crate::state::AppState;

/// Routes mounted at `/invoices`.
///
/// ```text
/// GET    /             -> list
/// POST   /             -> create
/// GET    /{id}         -> get_by_id
/// DELETE /{id}         -> delete
/// PUT    /{id}/status  -> set_status
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(invoices::list).post(invoices::create))
        .route("/{id}", get(invoices::get_by_id).delete(invoices::delete))
        .route("/{id}/status", put(invoices::set_status))
}
