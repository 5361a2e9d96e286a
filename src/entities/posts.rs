use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "posts")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub user_id: i64,
    pub category_id: i64,
    pub title: String,
    pub content: String,
    /// JSON 数组编码的图片 URL 列表
    pub image_urls: Option<String>,
    pub view_count: i32,
    pub like_count: i32,
    /// 认证板块专用：认证截图 URL
    pub verification_image_url: Option<String>,
    /// 认证板块专用：戒断时长（小时）
    pub detox_time: Option<i32>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
