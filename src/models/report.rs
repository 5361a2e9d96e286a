use crate::entities::ReportStatus;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ReportCreateRequest {
    pub post_id: i64,
    pub reason: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ReportCreateResponse {
    pub report_id: i64,
}

/// 管理端举报列表条目。被举报帖子可能已被删除，相关字段容忍缺失。
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AdminReportResponse {
    pub report_id: i64,
    pub reason: String,
    pub status: ReportStatus,
    pub created_at: Option<DateTime<Utc>>,
    pub reporter_id: i64,
    pub reporter_nickname: Option<String>,
    pub reported_post_id: Option<i64>,
    pub reported_post_title: Option<String>,
    pub reported_post_content: Option<String>,
    pub reported_post_author_id: Option<i64>,
    pub reported_post_author_nickname: Option<String>,
    pub reported_post_category_name: Option<String>,
    pub reported_post_image_urls: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ReportStatusUpdateRequest {
    pub status: ReportStatus,
}
