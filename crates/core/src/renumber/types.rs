//! Renumber domain types.

use chrono::NaiveDate;
use renum_shared::types::{FiscalPeriodId, FiscalYearId, MoveId};
use serde::{Deserialize, Serialize};

/// Posting status of an account move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoveStatus {
    /// Move is still being drafted.
    Draft,
    /// Move has been posted (immutable through normal update paths).
    Posted,
}

impl MoveStatus {
    /// Returns true if the move has been posted.
    #[must_use]
    pub fn is_posted(&self) -> bool {
        matches!(self, Self::Posted)
    }
}

/// An account move as seen by the renumber planner.
///
/// Only the fields the ordering and filtering rules need; the stored
/// record carries more.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountMove {
    /// Unique identifier.
    pub id: MoveId,
    /// Period the move belongs to.
    pub period_id: FiscalPeriodId,
    /// Accounting date of the move.
    pub date: NaiveDate,
    /// Posting status.
    pub status: MoveStatus,
}

/// Lifecycle state of a renumber selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionState {
    /// Freshly created, not yet run.
    Init,
    /// The run completed; the selection cannot be reused.
    Renumbered,
}

/// A user's renumber request.
///
/// Created per invocation; transitions Init -> Renumbered exactly once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenumberSelection {
    /// Fiscal year the selection belongs to (informational; the period
    /// set is the actual filter).
    pub fiscal_year_id: FiscalYearId,
    /// Periods whose posted moves will be renumbered.
    pub period_ids: Vec<FiscalPeriodId>,
    /// First number the fresh sequence hands out (0 means default 1).
    pub first_number: u64,
    /// Zero-padding width for references (0 means default 8).
    pub padding: usize,
    /// Lifecycle state.
    pub state: SelectionState,
}

impl RenumberSelection {
    /// Creates a selection in the `Init` state.
    #[must_use]
    pub fn new(
        fiscal_year_id: FiscalYearId,
        period_ids: Vec<FiscalPeriodId>,
        first_number: u64,
        padding: usize,
    ) -> Self {
        Self {
            fiscal_year_id,
            period_ids,
            first_number,
            padding,
            state: SelectionState::Init,
        }
    }

    /// Marks the selection as consumed by a completed run.
    pub fn mark_renumbered(&mut self) {
        self.state = SelectionState::Renumbered;
    }
}

/// One planned reference assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceAssignment {
    /// Move receiving the new reference.
    pub move_id: MoveId,
    /// The zero-padded reference to write.
    pub reference: String,
}

/// Result of planning a renumber run.
///
/// Assignments are ordered: all opening-period moves first, then the
/// remaining selected periods' moves, each group sorted (date, id)
/// ascending.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenumberPlan {
    /// Ordered assignments to apply.
    pub assignments: Vec<ReferenceAssignment>,
    /// How many assignments belong to the opening period.
    pub opening_count: usize,
    /// How many assignments belong to the other selected periods.
    pub other_count: usize,
}

impl RenumberPlan {
    /// Ids of all moves the plan touches, in assignment order.
    #[must_use]
    pub fn move_ids(&self) -> Vec<MoveId> {
        self.assignments.iter().map(|a| a.move_id).collect()
    }
}
