//! Account move repository for database operations.
//!
//! Posted moves are treated as immutable everywhere else in the
//! application. Renumbering needs to rewrite their references anyway, so
//! the only write here is an explicit force-update that names the bypass.

use sea_orm::{
    ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder,
    Statement,
};
use uuid::Uuid;

use renum_core::renumber::{AccountMove, MoveStatus};
use renum_shared::types::{FiscalPeriodId, MoveId};

use crate::entities::{account_moves, sea_orm_active_enums::MoveState};

/// Error types for move operations.
#[derive(Debug, thiserror::Error)]
pub enum MoveError {
    /// Move not found.
    #[error("Move not found: {0}")]
    NotFound(Uuid),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Account move repository.
#[derive(Debug, Clone)]
pub struct MoveRepository {
    db: DatabaseConnection,
}

impl MoveRepository {
    /// Creates a new move repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Finds a move by ID.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no such move exists, or a database error.
    pub async fn find_by_id(&self, id: Uuid) -> Result<account_moves::Model, MoveError> {
        account_moves::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(MoveError::NotFound(id))
    }

    /// Fetches the posted moves of the given periods, ordered (date, id)
    /// ascending.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_posted_by_periods<C: ConnectionTrait>(
        conn: &C,
        period_ids: &[Uuid],
    ) -> Result<Vec<account_moves::Model>, MoveError> {
        let moves = account_moves::Entity::find()
            .filter(account_moves::Column::PeriodId.is_in(period_ids.iter().copied()))
            .filter(account_moves::Column::State.eq(MoveState::Posted))
            .order_by_asc(account_moves::Column::Date)
            .order_by_asc(account_moves::Column::Id)
            .all(conn)
            .await?;
        Ok(moves)
    }

    /// Force-update contract: writes a move's reference regardless of its
    /// posting state.
    ///
    /// Posted moves reject edits everywhere else; this raw parameterized
    /// UPDATE is the deliberate exception, and renumbering is its only
    /// caller. Run it inside the enclosing transaction so a later failure
    /// rolls the write back.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the move does not exist, or a database error.
    pub async fn force_set_reference<C: ConnectionTrait>(
        conn: &C,
        id: Uuid,
        reference: &str,
    ) -> Result<(), MoveError> {
        let result = conn
            .execute(Statement::from_sql_and_values(
                conn.get_database_backend(),
                "UPDATE account_moves SET reference = $1, updated_at = NOW() WHERE id = $2",
                [reference.into(), id.into()],
            ))
            .await?;

        if result.rows_affected() == 0 {
            return Err(MoveError::NotFound(id));
        }
        Ok(())
    }
}

/// Maps a move row to the domain type the planner consumes.
#[must_use]
pub fn move_to_domain(model: &account_moves::Model) -> AccountMove {
    AccountMove {
        id: MoveId::from_uuid(model.id),
        period_id: FiscalPeriodId::from_uuid(model.period_id),
        date: model.date,
        status: match model.state {
            MoveState::Draft => MoveStatus::Draft,
            MoveState::Posted => MoveStatus::Posted,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_move_to_domain_maps_state() {
        let now = chrono::Utc::now().into();
        let model = account_moves::Model {
            id: Uuid::new_v4(),
            period_id: Uuid::new_v4(),
            reference: "/".to_string(),
            date: NaiveDate::from_ymd_opt(2026, 3, 14).unwrap(),
            state: MoveState::Posted,
            description: None,
            created_at: now,
            updated_at: now,
        };

        let domain = move_to_domain(&model);
        assert!(domain.status.is_posted());
        assert_eq!(domain.id.into_inner(), model.id);
        assert_eq!(domain.date, model.date);
    }
}
