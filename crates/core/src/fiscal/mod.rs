//! Fiscal year and period management.

pub mod period;

pub use period::{FiscalPeriod, FiscalYear};
