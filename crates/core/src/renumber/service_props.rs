//! Property-based tests for the renumber planner.

use chrono::NaiveDate;
use proptest::prelude::*;
use renum_shared::types::{FiscalPeriodId, FiscalYearId, MoveId};

use super::service::RenumberService;
use super::types::{AccountMove, MoveStatus, RenumberSelection};
use crate::fiscal::FiscalPeriod;
use crate::sequence::format_reference;

fn date_strategy() -> impl Strategy<Value = NaiveDate> {
    (2020i32..=2030, 1u32..=12, 1u32..=28)
        .prop_map(|(year, month, day)| NaiveDate::from_ymd_opt(year, month, day).unwrap())
}

fn period(fy: FiscalYearId, number: i16, is_opening: bool) -> FiscalPeriod {
    FiscalPeriod {
        id: FiscalPeriodId::new(),
        fiscal_year_id: fy,
        period_number: number,
        name: format!("Period {number}"),
        start_date: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
        end_date: NaiveDate::from_ymd_opt(2026, 12, 31).unwrap(),
        is_opening,
    }
}

/// A generated workload: one opening period and one plain period with
/// posted and draft moves at arbitrary dates.
fn workload_strategy() -> impl Strategy<Value = (Vec<NaiveDate>, Vec<NaiveDate>, Vec<NaiveDate>)> {
    (
        prop::collection::vec(date_strategy(), 0..8),
        prop::collection::vec(date_strategy(), 0..8),
        prop::collection::vec(date_strategy(), 0..4),
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    /// *For any* mix of posted opening/other moves and drafts, the plan
    /// assigns `format(first_number + k, padding)` to the k-th move of
    /// the global order, with no duplicates, and drafts never appear.
    #[test]
    fn prop_references_are_contiguous_and_opening_first(
        (opening_dates, other_dates, draft_dates) in workload_strategy(),
        first_number in 1u64..100_000,
        padding in 1usize..10,
    ) {
        let fy = FiscalYearId::new();
        let opening = period(fy, 0, true);
        let plain = period(fy, 1, false);
        let selection = RenumberSelection::new(
            fy,
            vec![opening.id, plain.id],
            first_number,
            padding,
        );

        let mut moves: Vec<AccountMove> = Vec::new();
        for d in &opening_dates {
            moves.push(AccountMove {
                id: MoveId::new(),
                period_id: opening.id,
                date: *d,
                status: MoveStatus::Posted,
            });
        }
        for d in &other_dates {
            moves.push(AccountMove {
                id: MoveId::new(),
                period_id: plain.id,
                date: *d,
                status: MoveStatus::Posted,
            });
        }
        let draft_ids: Vec<MoveId> = draft_dates
            .iter()
            .map(|d| {
                let id = MoveId::new();
                moves.push(AccountMove {
                    id,
                    period_id: plain.id,
                    date: *d,
                    status: MoveStatus::Draft,
                });
                id
            })
            .collect();

        let periods = [opening.clone(), plain.clone()];
        let result = RenumberService::plan(&selection, &periods, &moves);

        if opening_dates.is_empty() && other_dates.is_empty() {
            prop_assert!(result.is_err());
            return Ok(());
        }

        let plan = result.unwrap();
        prop_assert_eq!(plan.opening_count, opening_dates.len());
        prop_assert_eq!(plan.other_count, other_dates.len());

        // k-th assignment formats first_number + k.
        for (k, assignment) in plan.assignments.iter().enumerate() {
            prop_assert_eq!(
                &assignment.reference,
                &format_reference(first_number + k as u64, padding)
            );
        }

        // No duplicate references.
        let mut refs: Vec<&str> =
            plan.assignments.iter().map(|a| a.reference.as_str()).collect();
        refs.sort_unstable();
        refs.dedup();
        prop_assert_eq!(refs.len(), plan.assignments.len());

        // Drafts are never assigned.
        for id in &draft_ids {
            prop_assert!(!plan.move_ids().contains(id));
        }

        // Every opening-period value is strictly lower than every
        // other-period value.
        let values: Vec<u64> = plan
            .assignments
            .iter()
            .map(|a| a.reference.parse::<u64>().unwrap())
            .collect();
        if plan.opening_count > 0 && plan.other_count > 0 {
            let max_opening = values[..plan.opening_count].iter().max().unwrap();
            let min_other = values[plan.opening_count..].iter().min().unwrap();
            prop_assert!(max_opening < min_other);
        }
    }

    /// *For any* workload, planning twice over the same data yields the
    /// same assignments (the order is a deterministic total order).
    #[test]
    fn prop_planning_is_deterministic(
        (opening_dates, other_dates, _) in workload_strategy(),
    ) {
        prop_assume!(!opening_dates.is_empty() || !other_dates.is_empty());

        let fy = FiscalYearId::new();
        let opening = period(fy, 0, true);
        let plain = period(fy, 1, false);
        let selection = RenumberSelection::new(fy, vec![opening.id, plain.id], 1, 8);

        let mut moves: Vec<AccountMove> = Vec::new();
        for d in &opening_dates {
            moves.push(AccountMove {
                id: MoveId::new(),
                period_id: opening.id,
                date: *d,
                status: MoveStatus::Posted,
            });
        }
        for d in &other_dates {
            moves.push(AccountMove {
                id: MoveId::new(),
                period_id: plain.id,
                date: *d,
                status: MoveStatus::Posted,
            });
        }

        let periods = [opening, plain];
        let first = RenumberService::plan(&selection, &periods, &moves).unwrap();

        // Shuffle the input order by reversing; the plan must not change.
        moves.reverse();
        let second = RenumberService::plan(&selection, &periods, &moves).unwrap();

        prop_assert_eq!(first.assignments, second.assignments);
    }
}
