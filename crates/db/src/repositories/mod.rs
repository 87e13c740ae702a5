//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the application.

pub mod fiscal;
pub mod moves;
pub mod renumber;
pub mod sequence;

pub use fiscal::{FiscalError, FiscalRepository};
pub use moves::{MoveError, MoveRepository};
pub use renumber::{RenumberOutcome, RenumberRepository, RenumberRunError};
pub use sequence::{SequenceError, SequenceRepository};
