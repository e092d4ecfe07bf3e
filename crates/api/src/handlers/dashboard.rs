//! Handler for the agency dashboard summary.

use axum::extract::State;
use axum::Json;
use clientpulse_db::models::project::ProjectWithClient;
use clientpulse_db::repositories::{ClientRepo, InvoiceRepo, ProjectRepo};
use serde::Serialize;

use crate::error::AppResult;
use crate::middleware::rbac::RequireStaff;
use crate::state::AppState;

/// How many recently updated projects the summary carries.
const RECENT_PROJECT_LIMIT: usize = 5;

/// Response body for `GET /dashboard`.
#[derive(Debug, Serialize)]
pub struct DashboardSummary {
    pub client_count: i64,
    /// Projects not in a terminal/parked state (completed, on_hold).
    pub active_project_count: i64,
    /// Sum of sent + overdue invoice amounts.
    pub outstanding_total: f64,
    /// Sum of paid invoice amounts.
    pub paid_total: f64,
    /// Most recently updated projects, newest first.
    pub recent_projects: Vec<ProjectWithClient>,
}

/// GET /api/v1/dashboard
pub async fn summary(
    State(state): State<AppState>,
    RequireStaff(user): RequireStaff,
) -> AppResult<Json<DashboardSummary>> {
    let client_count = ClientRepo::count(&state.pool, user.agency_id).await?;
    let active_project_count = ProjectRepo::count_active(&state.pool, user.agency_id).await?;
    let outstanding_total = InvoiceRepo::outstanding_total(&state.pool, user.agency_id).await?;
    let paid_total = InvoiceRepo::paid_total(&state.pool, user.agency_id).await?;

    let mut recent_projects = ProjectRepo::list(&state.pool, user.agency_id).await?;
    recent_projects.truncate(RECENT_PROJECT_LIMIT);

    Ok(Json(DashboardSummary {
        client_count,
        active_project_count,
        outstanding_total,
        paid_total,
        recent_projects,
    }))
}
