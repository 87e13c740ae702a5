//! Initial database migration.
//!
//! Creates the fiscal hierarchy, account moves, and sequence tables.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        // ============================================================
        // PART 1: ENUMS
        // ============================================================
        db.execute_unprepared(ENUMS_SQL).await?;

        // ============================================================
        // PART 2: FISCAL HIERARCHY
        // ============================================================
        db.execute_unprepared(FISCAL_YEARS_SQL).await?;
        db.execute_unprepared(FISCAL_PERIODS_SQL).await?;

        // ============================================================
        // PART 3: ACCOUNT MOVES & SEQUENCES
        // ============================================================
        db.execute_unprepared(ACCOUNT_MOVES_SQL).await?;
        db.execute_unprepared(SEQUENCES_SQL).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(DROP_ALL_SQL).await?;
        Ok(())
    }
}

// ============================================================
// SQL CONSTANTS
// ============================================================

const ENUMS_SQL: &str = r"
-- Account move posting state
CREATE TYPE move_state AS ENUM ('draft', 'posted');
";

const FISCAL_YEARS_SQL: &str = r"
CREATE TABLE fiscal_years (
    id UUID PRIMARY KEY,
    name VARCHAR(100) NOT NULL,
    start_date DATE NOT NULL,
    end_date DATE NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    CONSTRAINT fiscal_years_date_range CHECK (start_date < end_date)
);
";

const FISCAL_PERIODS_SQL: &str = r"
CREATE TABLE fiscal_periods (
    id UUID PRIMARY KEY,
    fiscal_year_id UUID NOT NULL REFERENCES fiscal_years(id) ON DELETE CASCADE,
    name VARCHAR(100) NOT NULL,
    period_number SMALLINT NOT NULL,
    start_date DATE NOT NULL,
    end_date DATE NOT NULL,
    is_opening BOOLEAN NOT NULL DEFAULT FALSE,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

CREATE INDEX idx_fiscal_periods_year ON fiscal_periods(fiscal_year_id);

-- One opening period per fiscal year
CREATE UNIQUE INDEX idx_fiscal_periods_opening
    ON fiscal_periods(fiscal_year_id)
    WHERE is_opening;
";

const ACCOUNT_MOVES_SQL: &str = r"
CREATE TABLE account_moves (
    id UUID PRIMARY KEY,
    period_id UUID NOT NULL REFERENCES fiscal_periods(id),
    reference VARCHAR(64) NOT NULL DEFAULT '/',
    date DATE NOT NULL,
    state move_state NOT NULL DEFAULT 'draft',
    description TEXT,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

-- Serves the renumber query: posted moves of a period set, (date, id) order
CREATE INDEX idx_account_moves_period_state ON account_moves(period_id, state);
CREATE INDEX idx_account_moves_date_id ON account_moves(date, id);
";

const SEQUENCES_SQL: &str = r"
CREATE TABLE sequences (
    id UUID PRIMARY KEY,
    name VARCHAR(100) NOT NULL,
    next_value BIGINT NOT NULL DEFAULT 1,
    padding INTEGER NOT NULL DEFAULT 8,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    CONSTRAINT sequences_positive CHECK (next_value > 0 AND padding > 0)
);
";

const DROP_ALL_SQL: &str = r"
DROP TABLE IF EXISTS sequences;
DROP TABLE IF EXISTS account_moves;
DROP TABLE IF EXISTS fiscal_periods;
DROP TABLE IF EXISTS fiscal_years;
DROP TYPE IF EXISTS move_state;
";
