//! Renumber repository: the transactional renumber run.
//!
//! Orchestrates one run end to end inside a single database transaction:
//! fetch the selected periods and their posted moves, let the pure planner
//! decide the assignments, create the run's sequence row, then apply every
//! assignment through the force-update path. Any failure before commit
//! rolls the whole run back.

use sea_orm::{DatabaseConnection, DbErr, TransactionTrait};
use tracing::debug;
use uuid::Uuid;

use renum_core::renumber::{RenumberError, RenumberPlan, RenumberSelection, RenumberService};
use renum_core::sequence::{DEFAULT_FIRST_NUMBER, DEFAULT_PADDING};
use renum_shared::AppError;
use renum_shared::types::{FiscalPeriodId, MoveId, SequenceId};

use super::fiscal::{FiscalError, FiscalRepository, period_to_domain};
use super::moves::{MoveError, MoveRepository, move_to_domain};
use super::sequence::{SequenceError, SequenceRepository};

/// Name recorded on every run's sequence row.
const SEQUENCE_NAME: &str = "Renumber";

/// Error types for a renumber run.
#[derive(Debug, thiserror::Error)]
pub enum RenumberRunError {
    /// The planner rejected the selection (user error, nothing written).
    #[error(transparent)]
    Plan(#[from] renum_core::renumber::RenumberError),

    /// Period lookup failed.
    #[error(transparent)]
    Fiscal(#[from] FiscalError),

    /// Move lookup or update failed.
    #[error(transparent)]
    Move(#[from] MoveError),

    /// Sequence bookkeeping failed.
    #[error(transparent)]
    Sequence(#[from] SequenceError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl RenumberRunError {
    /// Returns true if this is a terminal user error rather than an
    /// infrastructure failure.
    #[must_use]
    pub const fn is_user_error(&self) -> bool {
        matches!(self, Self::Plan(_))
    }
}

impl From<RenumberRunError> for AppError {
    fn from(err: RenumberRunError) -> Self {
        match err {
            RenumberRunError::Plan(
                e @ (RenumberError::NoPeriodsSelected
                | RenumberError::FirstNumberTooLarge(_)
                | RenumberError::PaddingTooLarge(_)),
            ) => Self::Validation(e.to_string()),
            RenumberRunError::Plan(e @ RenumberError::NoMovesFound) => {
                Self::BusinessRule(e.to_string())
            }
            RenumberRunError::Plan(e @ RenumberError::AlreadyRenumbered) => {
                Self::Conflict(e.to_string())
            }
            RenumberRunError::Database(e) => Self::Database(e.to_string()),
            other => Self::Internal(other.to_string()),
        }
    }
}

/// Result of a completed renumber run.
#[derive(Debug, Clone)]
pub struct RenumberOutcome {
    /// Moves that received a new reference, in assignment order.
    pub renumbered_move_ids: Vec<MoveId>,
    /// The full original period selection (not just periods with moves),
    /// so the caller can point a move list at the renumbered entries.
    pub period_ids: Vec<FiscalPeriodId>,
    /// The sequence row created for this run.
    pub sequence_id: SequenceId,
    /// Opening-period assignments.
    pub opening_count: usize,
    /// Assignments in the remaining selected periods.
    pub other_count: usize,
}

/// Renumber repository.
#[derive(Debug, Clone)]
pub struct RenumberRepository {
    db: DatabaseConnection,
}

impl RenumberRepository {
    /// Creates a new renumber repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Runs one renumber pass for the given selection.
    ///
    /// On success the selection transitions to `Renumbered` and cannot be
    /// run again. Validation errors fire before the first write; later
    /// failures abort the transaction and leave every reference untouched.
    ///
    /// # Errors
    ///
    /// Returns a planning error for empty or reused selections and for
    /// selections matching no posted moves, or a database error.
    pub async fn renumber(
        &self,
        selection: &mut RenumberSelection,
    ) -> Result<RenumberOutcome, RenumberRunError> {
        // The empty-selection check must not cost a transaction.
        if selection.period_ids.is_empty() {
            return Err(renum_core::renumber::RenumberError::NoPeriodsSelected.into());
        }

        let period_uuids: Vec<Uuid> = selection
            .period_ids
            .iter()
            .map(|id| id.into_inner())
            .collect();

        debug!("Searching for account moves to renumber");
        let txn = self.db.begin().await?;

        let period_models = FiscalRepository::find_periods_by_ids(&txn, &period_uuids).await?;
        let periods: Vec<_> = period_models.iter().map(period_to_domain).collect();
        debug!(periods = periods.len(), "Resolved selected periods");

        let move_models = MoveRepository::find_posted_by_periods(&txn, &period_uuids).await?;
        let moves: Vec<_> = move_models.iter().map(move_to_domain).collect();

        let plan = RenumberService::plan(selection, &periods, &moves)?;
        if plan.opening_count > 0 {
            debug!(
                moves = plan.opening_count,
                "Renumbering opening period account moves"
            );
        }
        debug!(moves = plan.other_count, "Renumbering account moves");

        let sequence = self.apply_plan(&txn, selection, &plan).await?;

        txn.commit().await?;
        selection.mark_renumbered();
        debug!(moves = plan.assignments.len(), "Account moves renumbered");

        Ok(RenumberOutcome {
            renumbered_move_ids: plan.move_ids(),
            period_ids: selection.period_ids.clone(),
            sequence_id: SequenceId::from_uuid(sequence.id),
            opening_count: plan.opening_count,
            other_count: plan.other_count,
        })
    }

    /// Creates the run's sequence row and writes every planned reference.
    async fn apply_plan(
        &self,
        txn: &sea_orm::DatabaseTransaction,
        selection: &RenumberSelection,
        plan: &RenumberPlan,
    ) -> Result<crate::entities::sequences::Model, RenumberRunError> {
        let first_number = if selection.first_number == 0 {
            DEFAULT_FIRST_NUMBER
        } else {
            selection.first_number
        };
        let padding = if selection.padding == 0 {
            DEFAULT_PADDING
        } else {
            selection.padding
        };

        let sequence =
            SequenceRepository::create_for_run(txn, SEQUENCE_NAME, first_number, padding).await?;

        for assignment in &plan.assignments {
            MoveRepository::force_set_reference(
                txn,
                assignment.move_id.into_inner(),
                &assignment.reference,
            )
            .await?;
        }

        let consumed = plan.assignments.len() as u64;
        let sequence =
            SequenceRepository::record_position(txn, sequence, first_number + consumed).await?;

        Ok(sequence)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plan_errors_map_to_user_facing_status_codes() {
        let app: AppError =
            RenumberRunError::Plan(RenumberError::FirstNumberTooLarge(u64::MAX)).into();
        assert_eq!(app.status_code(), 400);

        let app: AppError = RenumberRunError::Plan(RenumberError::PaddingTooLarge(65)).into();
        assert_eq!(app.status_code(), 400);

        let app: AppError = RenumberRunError::Plan(RenumberError::NoPeriodsSelected).into();
        assert_eq!(app.status_code(), 400);

        let app: AppError = RenumberRunError::Plan(RenumberError::NoMovesFound).into();
        assert_eq!(app.status_code(), 422);

        let app: AppError = RenumberRunError::Plan(RenumberError::AlreadyRenumbered).into();
        assert_eq!(app.status_code(), 409);
    }
}
