//! Fiscal period types.

use chrono::NaiveDate;
use renum_shared::types::{FiscalPeriodId, FiscalYearId};
use serde::{Deserialize, Serialize};

/// Fiscal year definition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FiscalYear {
    /// Unique identifier.
    pub id: FiscalYearId,
    /// Year name (e.g., "FY2026").
    pub name: String,
    /// Start date of the fiscal year.
    pub start_date: NaiveDate,
    /// End date of the fiscal year.
    pub end_date: NaiveDate,
}

/// A fiscal period within a fiscal year.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FiscalPeriod {
    /// Unique identifier.
    pub id: FiscalPeriodId,
    /// Fiscal year this period belongs to.
    pub fiscal_year_id: FiscalYearId,
    /// Period number within the year (1-12 for monthly, 0 for opening).
    pub period_number: i16,
    /// Period name (e.g., "January 2026" or "Opening 2026").
    pub name: String,
    /// Start date of the period.
    pub start_date: NaiveDate,
    /// End date of the period.
    pub end_date: NaiveDate,
    /// Whether this is the opening (carry-forward) period of its year.
    pub is_opening: bool,
}

