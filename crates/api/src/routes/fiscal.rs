//! Fiscal year and period read routes.
//!
//! A client builds a renumber selection from these listings.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use chrono::NaiveDate;
use serde::Serialize;
use serde_json::json;
use tracing::error;
use uuid::Uuid;

use crate::AppState;
use crate::error::error_response;
use renum_db::FiscalRepository;
use renum_db::repositories::fiscal::FiscalError;

/// Creates the fiscal routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/fiscal-years/{fy_id}/periods", get(list_periods))
}

/// Response for a fiscal period.
#[derive(Debug, Serialize)]
pub struct FiscalPeriodResponse {
    /// Period ID.
    pub id: Uuid,
    /// Period name.
    pub name: String,
    /// Period number within the fiscal year.
    pub period_number: i16,
    /// Start date.
    pub start_date: NaiveDate,
    /// End date.
    pub end_date: NaiveDate,
    /// Whether this is the opening (carry-forward) period.
    pub is_opening: bool,
}

/// GET `/fiscal-years/{fy_id}/periods` - List a fiscal year's periods.
async fn list_periods(State(state): State<AppState>, Path(fy_id): Path<Uuid>) -> impl IntoResponse {
    let repo = FiscalRepository::new((*state.db).clone());

    if let Err(e) = repo.find_year_by_id(fy_id).await {
        if matches!(e, FiscalError::Database(_)) {
            error!(error = %e, "Failed to load fiscal year");
        }
        return error_response(&e.into());
    }

    match repo.list_periods_for_year(fy_id).await {
        Ok(periods) => {
            let response: Vec<FiscalPeriodResponse> = periods
                .into_iter()
                .map(|p| FiscalPeriodResponse {
                    id: p.id,
                    name: p.name,
                    period_number: p.period_number,
                    start_date: p.start_date,
                    end_date: p.end_date,
                    is_opening: p.is_opening,
                })
                .collect();

            (StatusCode::OK, Json(json!({ "periods": response }))).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to list fiscal periods");
            error_response(&e.into())
        }
    }
}
