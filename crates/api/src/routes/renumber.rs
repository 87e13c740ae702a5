//! Posted-move renumber route.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::post,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{error, info};
use uuid::Uuid;

use crate::AppState;
use crate::error::error_response;
use renum_core::renumber::RenumberSelection;
use renum_db::repositories::renumber::{RenumberOutcome, RenumberRepository};
use renum_shared::types::{FiscalPeriodId, FiscalYearId};

/// Creates the renumber routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/fiscal-years/{fy_id}/renumber", post(renumber_moves))
}

/// Request body for a renumber run.
#[derive(Debug, Deserialize)]
pub struct RenumberRequest {
    /// Periods whose posted moves will be renumbered.
    pub period_ids: Vec<Uuid>,
    /// First number the fresh sequence hands out (default 1).
    #[serde(default)]
    pub first_number: Option<u64>,
    /// Zero-padding width for references (default 8).
    #[serde(default)]
    pub padding: Option<usize>,
}

/// Where a client should navigate after a successful run: a move list
/// filtered to the originally selected periods' posted entries.
#[derive(Debug, Serialize)]
pub struct NavigationResponse {
    /// Display name of the target view.
    pub name: &'static str,
    /// Record type the view lists.
    pub res_model: &'static str,
    /// Filter over the listed records.
    pub domain: NavigationDomain,
    /// Requested view mode.
    pub view_mode: &'static str,
    /// Where to open the view.
    pub target: &'static str,
}

/// Filter expression of the navigation result.
#[derive(Debug, Serialize)]
pub struct NavigationDomain {
    /// The full original period selection (not just periods with moves).
    pub period_ids: Vec<Uuid>,
    /// Only posted moves are listed.
    pub state: &'static str,
}

/// Builds the navigation payload for a completed run.
#[must_use]
pub fn navigation_response(outcome: &RenumberOutcome) -> NavigationResponse {
    NavigationResponse {
        name: "Renumbered account moves",
        res_model: "account_move",
        domain: NavigationDomain {
            period_ids: outcome
                .period_ids
                .iter()
                .map(|id| id.into_inner())
                .collect(),
            state: "posted",
        },
        view_mode: "list",
        target: "current",
    }
}

/// POST `/fiscal-years/{fy_id}/renumber` - Renumber posted moves of the
/// selected periods.
async fn renumber_moves(
    State(state): State<AppState>,
    Path(fy_id): Path<Uuid>,
    Json(payload): Json<RenumberRequest>,
) -> impl IntoResponse {
    let mut selection = RenumberSelection::new(
        FiscalYearId::from_uuid(fy_id),
        payload
            .period_ids
            .iter()
            .map(|id| FiscalPeriodId::from_uuid(*id))
            .collect(),
        payload.first_number.unwrap_or(1),
        payload.padding.unwrap_or(8),
    );

    let repo = RenumberRepository::new((*state.db).clone());

    match repo.renumber(&mut selection).await {
        Ok(outcome) => {
            info!(
                fiscal_year_id = %fy_id,
                moves = outcome.renumbered_move_ids.len(),
                opening = outcome.opening_count,
                sequence_id = %outcome.sequence_id,
                "Account moves renumbered"
            );

            (
                StatusCode::OK,
                Json(json!({
                    "renumbered_move_ids": outcome.renumbered_move_ids,
                    "sequence_id": outcome.sequence_id,
                    "action": navigation_response(&outcome),
                })),
            )
                .into_response()
        }
        Err(e) => {
            if !e.is_user_error() {
                error!(error = %e, "Renumber run failed");
            }
            error_response(&e.into())
        }
    }
}
