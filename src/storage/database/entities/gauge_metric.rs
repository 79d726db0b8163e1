//! Gauge metric entity

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Latest value of a gauge
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "gaugemetrics")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    /// Metric name
    #[sea_orm(unique)]
    pub name: String,
    pub value: f64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
