//! Department entity
//!
//! Table: department

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "department")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    /// Department name
    #[sea_orm(column_type = "String(StringLen::N(64))")]
    pub name: String,

    /// Department address
    pub address: String,

    /// Department code (short identifier, e.g. "CS-001")
    #[sea_orm(column_type = "String(StringLen::N(6))")]
    pub code: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
