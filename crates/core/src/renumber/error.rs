//! Renumber error types.

use thiserror::Error;

/// Errors that can occur while planning a renumber run.
///
/// Both validation variants are terminal user errors: the caller reports
/// them and nothing is written.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RenumberError {
    /// The selection contained no periods at all.
    #[error("No records found for your selection")]
    NoPeriodsSelected,

    /// No posted moves exist in any of the selected periods.
    #[error("No moves found for these periods")]
    NoMovesFound,

    /// The selection has already been used for a renumber run.
    #[error("Selection has already been renumbered")]
    AlreadyRenumbered,

    /// The first number would push the counter past the sequence range
    /// for the selected moves.
    #[error("First number {0} is too large")]
    FirstNumberTooLarge(u64),

    /// The requested padding exceeds the supported width.
    #[error("Padding {0} is too large")]
    PaddingTooLarge(usize),
}
