use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "categories")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub category_name: String,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

// 固定板块名，种子数据与业务规则共用
pub const VERIFICATION_CATEGORY_NAME: &str = "인증게시판";
pub const INFO_CATEGORY_NAME: &str = "정보공유게시판";
pub const FREE_CATEGORY_NAME: &str = "자유게시판";
pub const NOTICE_CATEGORY_NAME: &str = "공지사항";
