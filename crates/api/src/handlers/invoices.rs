//! Handlers for the `/invoices` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use clientpulse_core::error::CoreError;
use clientpulse_core::numbering::generate_invoice_number;
use clientpulse_core::status::InvoiceStatus;
use clientpulse_core::types::DbId;
use clientpulse_core::validation::validate_due_date;
use clientpulse_db::models::invoice::{CreateInvoice, Invoice, InvoiceWithNames};
use clientpulse_db::repositories::{ClientRepo, InvoiceRepo, ProjectRepo};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireStaff;
use crate::state::AppState;

/// Request body for `PUT /invoices/{id}/status`.
#[derive(Debug, Deserialize)]
pub struct SetStatusRequest {
    pub status: InvoiceStatus,
}

/// POST /api/v1/invoices
///
/// Creates a draft invoice with a server-generated number.
pub async fn create(
    State(state): State<AppState>,
    RequireStaff(user): RequireStaff,
    Json(input): Json<CreateInvoice>,
) -> AppResult<(StatusCode, Json<Invoice>)> {
    if input.amount <= 0.0 {
        return Err(AppError::Core(CoreError::Validation(
            "Invoice amount must be greater than zero".into(),
        )));
    }
    let today = Utc::now().date_naive();
    validate_due_date(input.due_date, today)?;

    // The client must belong to the caller's agency.
    ClientRepo::find_by_id(&state.pool, user.agency_id, input.client_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Client",
            id: input.client_id,
        }))?;

    // An attached project must belong to that client.
    if let Some(project_id) = input.project_id {
        let project = ProjectRepo::find_by_id(&state.pool, user.agency_id, project_id)
            .await?
            .ok_or(AppError::Core(CoreError::NotFound {
                entity: "Project",
                id: project_id,
            }))?;
        if project.client_id != input.client_id {
            return Err(AppError::Core(CoreError::Validation(
                "Project does not belong to the invoice's client".into(),
            )));
        }
    }

    // Duplicate numbers are tolerated; there is no uniqueness constraint.
    let number = generate_invoice_number(today);
    let invoice = InvoiceRepo::create(&state.pool, user.agency_id, &input, &number).await?;
    Ok((StatusCode::CREATED, Json(invoice)))
}

/// GET /api/v1/invoices
pub async fn list(
    State(state): State<AppState>,
    RequireStaff(user): RequireStaff,
) -> AppResult<Json<Vec<InvoiceWithNames>>> {
    let invoices = InvoiceRepo::list(&state.pool, user.agency_id).await?;
    Ok(Json(invoices))
}

/// GET /api/v1/invoices/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    RequireStaff(user): RequireStaff,
    Path(id): Path<DbId>,
) -> AppResult<Json<Invoice>> {
    let invoice = InvoiceRepo::find_by_id(&state.pool, user.agency_id, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Invoice",
            id,
        }))?;
    Ok(Json(invoice))
}

/// PUT /api/v1/invoices/{id}/status
///
/// Allowed transitions: draft -> sent, and sent/overdue -> paid (which
/// stamps `paid_at`). Everything else is a 400.
pub async fn set_status(
    State(state): State<AppState>,
    RequireStaff(user): RequireStaff,
    Path(id): Path<DbId>,
    Json(input): Json<SetStatusRequest>,
) -> AppResult<Json<Invoice>> {
    let invoice = InvoiceRepo::find_by_id(&state.pool, user.agency_id, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Invoice",
            id,
        }))?;

    let allowed = matches!(
        (invoice.status, input.status),
        (InvoiceStatus::Draft, InvoiceStatus::Sent)
            | (InvoiceStatus::Sent, InvoiceStatus::Paid)
            | (InvoiceStatus::Overdue, InvoiceStatus::Paid)
    );
    if !allowed {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Cannot transition invoice from {:?} to {:?}",
            invoice.status, input.status
        ))));
    }

    let updated = InvoiceRepo::set_status(&state.pool, user.agency_id, id, input.status)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Invoice",
            id,
        }))?;
    Ok(Json(updated))
}

/// DELETE /api/v1/invoices/{id}
pub async fn delete(
    State(state): State<AppState>,
    RequireStaff(user): RequireStaff,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = InvoiceRepo::delete(&state.pool, user.agency_id, id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Invoice",
            id,
        }))
    }
}
