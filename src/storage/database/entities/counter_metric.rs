//! Counter metric entity

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Accumulated total of a counter
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "countermetrics")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    /// Metric name
    #[sea_orm(unique)]
    pub name: String,
    pub value: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
