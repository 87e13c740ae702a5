//! Posted-move renumber planning.
//!
//! This module implements the renumber business rule:
//! - User selection (periods, first number, padding) and its lifecycle
//! - Deterministic ordering of posted moves (opening period first,
//!   then date/id ascending)
//! - Reference assignment through an owned [`crate::sequence::ReferenceSequence`]
//! - Error types for renumber operations

pub mod error;
pub mod service;
pub mod types;

#[cfg(test)]
mod service_props;

pub use error::RenumberError;
pub use service::RenumberService;
pub use types::{
    AccountMove, MoveStatus, ReferenceAssignment, RenumberPlan, RenumberSelection, SelectionState,
};
