use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;

/// 积分流水，只增不改
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "point_histories")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub user_id: i64,
    /// 正数为获取，负数为消费
    pub point_change: i32,
    #[sea_orm(column_name = "type")]
    pub history_type: String,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
