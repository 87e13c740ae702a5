//! Renumber planning service.
//!
//! Pure decision logic: given a selection and the already-fetched periods
//! and moves, produce the ordered list of reference assignments. No IO
//! happens here; persistence applies the plan inside one transaction.

use renum_shared::types::FiscalPeriodId;

use crate::fiscal::FiscalPeriod;
use crate::sequence::{
    DEFAULT_FIRST_NUMBER, DEFAULT_PADDING, MAX_PADDING, MAX_SEQUENCE_VALUE, ReferenceSequence,
};

use super::error::RenumberError;
use super::types::{
    AccountMove, ReferenceAssignment, RenumberPlan, RenumberSelection, SelectionState,
};

/// Renumber planning service.
pub struct RenumberService;

impl RenumberService {
    /// Plans a renumber run.
    ///
    /// `periods` are the resolved selected periods and `moves` the moves
    /// fetched for them. Planning:
    ///
    /// 1. Rejects reused or empty selections before anything else, and
    ///    bounds the caller-supplied padding.
    /// 2. Splits the opening period (at most one is expected; the first
    ///    flagged period wins) from the working set.
    /// 3. Keeps posted moves only, sorts each group (date, id) ascending.
    /// 4. Rejects the run if the combined group is empty, or if the first
    ///    number would push the counter past the sequence range. Both
    ///    checks run before any assignment so a failed run never touches
    ///    data, even when only the opening period has moves.
    /// 5. Hands out successive references from a fresh sequence, opening
    ///    group first.
    ///
    /// # Errors
    ///
    /// Returns `RenumberError` if the selection is reused, empty, out of
    /// bounds, or matches no posted moves.
    pub fn plan(
        selection: &RenumberSelection,
        periods: &[FiscalPeriod],
        moves: &[AccountMove],
    ) -> Result<RenumberPlan, RenumberError> {
        if selection.state == SelectionState::Renumbered {
            return Err(RenumberError::AlreadyRenumbered);
        }
        if selection.period_ids.is_empty() {
            return Err(RenumberError::NoPeriodsSelected);
        }

        let padding = if selection.padding == 0 {
            DEFAULT_PADDING
        } else {
            selection.padding
        };
        if padding > MAX_PADDING {
            return Err(RenumberError::PaddingTooLarge(padding));
        }

        let opening_period_id = find_opening_period(&selection.period_ids, periods);

        let mut opening_moves: Vec<&AccountMove> = Vec::new();
        let mut other_moves: Vec<&AccountMove> = Vec::new();
        for mv in moves {
            // Unposted moves are never renumbered, whatever the caller fetched.
            if !mv.status.is_posted() || !selection.period_ids.contains(&mv.period_id) {
                continue;
            }
            if Some(mv.period_id) == opening_period_id {
                opening_moves.push(mv);
            } else {
                other_moves.push(mv);
            }
        }

        // Id breaks date ties so the total order is reproducible.
        opening_moves.sort_by_key(|m| (m.date, m.id));
        other_moves.sort_by_key(|m| (m.date, m.id));

        if opening_moves.is_empty() && other_moves.is_empty() {
            return Err(RenumberError::NoMovesFound);
        }

        let first_number = if selection.first_number == 0 {
            DEFAULT_FIRST_NUMBER
        } else {
            selection.first_number
        };
        // The run ends with the counter at first_number + assignments,
        // which the sequence row must be able to record.
        let assignment_count = (opening_moves.len() + other_moves.len()) as u64;
        if first_number > MAX_SEQUENCE_VALUE - assignment_count {
            return Err(RenumberError::FirstNumberTooLarge(first_number));
        }

        let mut sequence = ReferenceSequence::new(first_number, padding);
        let assignments: Vec<ReferenceAssignment> = opening_moves
            .iter()
            .chain(other_moves.iter())
            .map(|mv| ReferenceAssignment {
                move_id: mv.id,
                reference: sequence.next_reference(),
            })
            .collect();

        Ok(RenumberPlan {
            opening_count: opening_moves.len(),
            other_count: other_moves.len(),
            assignments,
        })
    }
}

/// Finds the opening period among the selected ids, if any.
///
/// At most one opening period is expected within a selection; if several
/// are flagged, the first one encountered is used.
fn find_opening_period(
    selected: &[FiscalPeriodId],
    periods: &[FiscalPeriod],
) -> Option<FiscalPeriodId> {
    periods
        .iter()
        .find(|p| p.is_opening && selected.contains(&p.id))
        .map(|p| p.id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renumber::types::MoveStatus;
    use chrono::NaiveDate;
    use renum_shared::types::{FiscalYearId, MoveId};

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, day).unwrap()
    }

    fn period(fy: FiscalYearId, number: i16, is_opening: bool) -> FiscalPeriod {
        FiscalPeriod {
            id: FiscalPeriodId::new(),
            fiscal_year_id: fy,
            period_number: number,
            name: format!("Period {number}"),
            start_date: date(1),
            end_date: date(28),
            is_opening,
        }
    }

    fn posted_move(period_id: FiscalPeriodId, d: NaiveDate) -> AccountMove {
        AccountMove {
            id: MoveId::new(),
            period_id,
            date: d,
            status: MoveStatus::Posted,
        }
    }

    fn selection(period_ids: Vec<FiscalPeriodId>) -> RenumberSelection {
        RenumberSelection::new(FiscalYearId::new(), period_ids, 1, 8)
    }

    #[test]
    fn test_empty_period_selection_is_rejected() {
        let err = RenumberService::plan(&selection(vec![]), &[], &[]).unwrap_err();
        assert_eq!(err, RenumberError::NoPeriodsSelected);
        assert_eq!(err.to_string(), "No records found for your selection");
    }

    #[test]
    fn test_no_posted_moves_is_rejected() {
        let fy = FiscalYearId::new();
        let p = period(fy, 1, false);
        let sel = selection(vec![p.id]);

        let err = RenumberService::plan(&sel, &[p], &[]).unwrap_err();
        assert_eq!(err, RenumberError::NoMovesFound);
        assert_eq!(err.to_string(), "No moves found for these periods");
    }

    #[test]
    fn test_draft_moves_are_never_renumbered() {
        let fy = FiscalYearId::new();
        let p = period(fy, 1, false);
        let sel = selection(vec![p.id]);

        let draft = AccountMove {
            status: MoveStatus::Draft,
            ..posted_move(p.id, date(5))
        };

        let err = RenumberService::plan(&sel, &[p], &[draft]).unwrap_err();
        assert_eq!(err, RenumberError::NoMovesFound);
    }

    #[test]
    fn test_reused_selection_is_rejected() {
        let fy = FiscalYearId::new();
        let p = period(fy, 1, false);
        let mut sel = selection(vec![p.id]);
        sel.mark_renumbered();

        let mv = posted_move(p.id, date(5));
        let err = RenumberService::plan(&sel, &[p], &[mv]).unwrap_err();
        assert_eq!(err, RenumberError::AlreadyRenumbered);
    }

    #[test]
    fn test_opening_moves_come_first_with_contiguous_references() {
        // Spec example: opening period P1 with moves at d1 < d2, plain P2
        // with one move at d3.
        let fy = FiscalYearId::new();
        let p1 = period(fy, 0, true);
        let p2 = period(fy, 1, false);
        let sel = RenumberSelection::new(fy, vec![p2.id, p1.id], 1, 8);

        let m1a = posted_move(p1.id, date(2));
        let m1b = posted_move(p1.id, date(7));
        let m2a = posted_move(p2.id, date(1));

        let plan = RenumberService::plan(
            &sel,
            &[p2.clone(), p1.clone()],
            &[m2a.clone(), m1b.clone(), m1a.clone()],
        )
        .unwrap();

        assert_eq!(plan.opening_count, 2);
        assert_eq!(plan.other_count, 1);
        assert_eq!(plan.move_ids(), vec![m1a.id, m1b.id, m2a.id]);
        let refs: Vec<&str> = plan.assignments.iter().map(|a| a.reference.as_str()).collect();
        assert_eq!(refs, vec!["00000001", "00000002", "00000003"]);
    }

    #[test]
    fn test_opening_only_selection_succeeds() {
        // The combined count decides, so a selection holding just the
        // opening period with posted moves is a valid run.
        let fy = FiscalYearId::new();
        let p = period(fy, 0, true);
        let sel = selection(vec![p.id]);

        let mv = posted_move(p.id, date(3));
        let plan = RenumberService::plan(&sel, &[p], &[mv.clone()]).unwrap();

        assert_eq!(plan.opening_count, 1);
        assert_eq!(plan.other_count, 0);
        assert_eq!(plan.assignments[0].move_id, mv.id);
    }

    #[test]
    fn test_date_ties_break_by_id() {
        let fy = FiscalYearId::new();
        let p = period(fy, 1, false);
        let sel = selection(vec![p.id]);

        let a = posted_move(p.id, date(10));
        let b = posted_move(p.id, date(10));
        let (lo, hi) = if a.id < b.id { (a.id, b.id) } else { (b.id, a.id) };

        let plan = RenumberService::plan(&sel, &[p], &[a, b]).unwrap();
        assert_eq!(plan.move_ids(), vec![lo, hi]);
    }

    #[test]
    fn test_moves_outside_the_selection_are_ignored() {
        let fy = FiscalYearId::new();
        let selected = period(fy, 1, false);
        let unselected = period(fy, 2, false);
        let sel = selection(vec![selected.id]);

        let inside = posted_move(selected.id, date(5));
        let outside = posted_move(unselected.id, date(1));

        let plan = RenumberService::plan(&sel, &[selected], &[inside.clone(), outside]).unwrap();
        assert_eq!(plan.move_ids(), vec![inside.id]);
    }

    #[test]
    fn test_overflowing_first_number_is_rejected() {
        let fy = FiscalYearId::new();
        let p = period(fy, 1, false);
        let sel = RenumberSelection::new(fy, vec![p.id], u64::MAX, 8);

        let mv = posted_move(p.id, date(5));
        let err = RenumberService::plan(&sel, &[p], &[mv]).unwrap_err();
        assert_eq!(err, RenumberError::FirstNumberTooLarge(u64::MAX));
    }

    #[test]
    fn test_first_number_at_the_range_boundary_is_accepted() {
        let fy = FiscalYearId::new();
        let p = period(fy, 1, false);
        // One assignment: the counter ends exactly at MAX_SEQUENCE_VALUE.
        let sel = RenumberSelection::new(fy, vec![p.id], MAX_SEQUENCE_VALUE - 1, 1);

        let mv = posted_move(p.id, date(5));
        let plan = RenumberService::plan(&sel, &[p], &[mv]).unwrap();
        assert_eq!(
            plan.assignments[0].reference,
            (MAX_SEQUENCE_VALUE - 1).to_string()
        );
    }

    #[test]
    fn test_oversized_padding_is_rejected() {
        let fy = FiscalYearId::new();
        let p = period(fy, 1, false);
        let sel = RenumberSelection::new(fy, vec![p.id], 1, MAX_PADDING + 1);

        let mv = posted_move(p.id, date(5));
        let err = RenumberService::plan(&sel, &[p], &[mv]).unwrap_err();
        assert_eq!(err, RenumberError::PaddingTooLarge(MAX_PADDING + 1));
    }

    #[test]
    fn test_custom_first_number_and_padding() {
        let fy = FiscalYearId::new();
        let p = period(fy, 1, false);
        let sel = RenumberSelection::new(fy, vec![p.id], 100, 4);

        let moves = vec![posted_move(p.id, date(1)), posted_move(p.id, date(2))];
        let plan = RenumberService::plan(&sel, &[p], &moves).unwrap();

        let refs: Vec<&str> = plan.assignments.iter().map(|a| a.reference.as_str()).collect();
        assert_eq!(refs, vec!["0100", "0101"]);
    }
}
