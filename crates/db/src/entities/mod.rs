//! `SeaORM` entity definitions.

pub mod account_moves;
pub mod fiscal_periods;
pub mod fiscal_years;
pub mod sea_orm_active_enums;
pub mod sequences;
