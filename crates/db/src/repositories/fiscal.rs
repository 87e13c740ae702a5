//! Fiscal year and period repository for database operations.

use sea_orm::{
    ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder,
};
use uuid::Uuid;

use renum_core::fiscal::FiscalPeriod;
use renum_shared::AppError;
use renum_shared::types::{FiscalPeriodId, FiscalYearId};

use crate::entities::{fiscal_periods, fiscal_years};

/// Error types for fiscal operations.
#[derive(Debug, thiserror::Error)]
pub enum FiscalError {
    /// Fiscal year not found.
    #[error("Fiscal year not found: {0}")]
    YearNotFound(Uuid),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl From<FiscalError> for AppError {
    fn from(err: FiscalError) -> Self {
        match err {
            FiscalError::YearNotFound(_) => Self::NotFound(err.to_string()),
            FiscalError::Database(e) => Self::Database(e.to_string()),
        }
    }
}

/// Fiscal year and period repository.
#[derive(Debug, Clone)]
pub struct FiscalRepository {
    db: DatabaseConnection,
}

impl FiscalRepository {
    /// Creates a new fiscal repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Finds a fiscal year by ID.
    ///
    /// # Errors
    ///
    /// Returns `YearNotFound` if no such year exists, or a database error.
    pub async fn find_year_by_id(&self, id: Uuid) -> Result<fiscal_years::Model, FiscalError> {
        fiscal_years::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(FiscalError::YearNotFound(id))
    }

    /// Lists the periods of a fiscal year, ordered by period number.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_periods_for_year(
        &self,
        fiscal_year_id: Uuid,
    ) -> Result<Vec<fiscal_periods::Model>, FiscalError> {
        let periods = fiscal_periods::Entity::find()
            .filter(fiscal_periods::Column::FiscalYearId.eq(fiscal_year_id))
            .order_by_asc(fiscal_periods::Column::PeriodNumber)
            .all(&self.db)
            .await?;
        Ok(periods)
    }

    /// Fetches the periods whose ids are in the given set.
    ///
    /// Ids that match no period simply contribute nothing; the caller
    /// decides whether an empty result is an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_periods_by_ids<C: ConnectionTrait>(
        conn: &C,
        ids: &[Uuid],
    ) -> Result<Vec<fiscal_periods::Model>, FiscalError> {
        let periods = fiscal_periods::Entity::find()
            .filter(fiscal_periods::Column::Id.is_in(ids.iter().copied()))
            .all(conn)
            .await?;
        Ok(periods)
    }
}

/// Maps a period row to the domain type the planner consumes.
#[must_use]
pub fn period_to_domain(model: &fiscal_periods::Model) -> FiscalPeriod {
    FiscalPeriod {
        id: FiscalPeriodId::from_uuid(model.id),
        fiscal_year_id: FiscalYearId::from_uuid(model.fiscal_year_id),
        period_number: model.period_number,
        name: model.name.clone(),
        start_date: model.start_date,
        end_date: model.end_date,
        is_opening: model.is_opening,
    }
}
