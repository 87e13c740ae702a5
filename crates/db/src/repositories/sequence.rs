//! Sequence repository for database operations.
//!
//! Every renumber run creates its own sequence row, even when the
//! parameters match an earlier run; rows are never deduplicated.

use sea_orm::{ActiveModelTrait, ConnectionTrait, DbErr, Set};
use uuid::Uuid;

use crate::entities::sequences;

/// Error types for sequence operations.
#[derive(Debug, thiserror::Error)]
pub enum SequenceError {
    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),

    /// The counter value does not fit the storage column.
    #[error("Sequence value out of range: {0}")]
    ValueOutOfRange(u64),

    /// The padding does not fit the storage column.
    #[error("Sequence padding out of range: {0}")]
    PaddingOutOfRange(usize),
}

/// Sequence repository.
#[derive(Debug, Clone)]
pub struct SequenceRepository;

impl SequenceRepository {
    /// Creates a fresh sequence row for one renumber run.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails or the first number or
    /// padding does not fit its column.
    pub async fn create_for_run<C: ConnectionTrait>(
        conn: &C,
        name: &str,
        first_number: u64,
        padding: usize,
    ) -> Result<sequences::Model, SequenceError> {
        let next_value = i64::try_from(first_number)
            .map_err(|_| SequenceError::ValueOutOfRange(first_number))?;
        let padding =
            i32::try_from(padding).map_err(|_| SequenceError::PaddingOutOfRange(padding))?;

        let now = chrono::Utc::now().into();
        let model = sequences::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(name.to_string()),
            next_value: Set(next_value),
            padding: Set(padding),
            created_at: Set(now),
            updated_at: Set(now),
        };
        Ok(model.insert(conn).await?)
    }

    /// Records where the counter ended up after the run's assignments.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails or the value does not fit the
    /// column.
    pub async fn record_position<C: ConnectionTrait>(
        conn: &C,
        sequence: sequences::Model,
        next_value: u64,
    ) -> Result<sequences::Model, SequenceError> {
        let next_value =
            i64::try_from(next_value).map_err(|_| SequenceError::ValueOutOfRange(next_value))?;

        let mut active: sequences::ActiveModel = sequence.into();
        active.next_value = Set(next_value);
        active.updated_at = Set(chrono::Utc::now().into());
        Ok(active.update(conn).await?)
    }
}
