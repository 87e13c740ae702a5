//! `SeaORM` active enums mapping Postgres enum types.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Posting state of an account move.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "move_state")]
#[serde(rename_all = "lowercase")]
pub enum MoveState {
    /// Move is still being drafted.
    #[sea_orm(string_value = "draft")]
    Draft,
    /// Move has been posted; normal update paths reject edits.
    #[sea_orm(string_value = "posted")]
    Posted,
}
