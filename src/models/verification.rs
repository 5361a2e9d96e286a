use crate::entities::VerificationStatus;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct VerificationResponse {
    pub verification_id: i64,
    pub user_id: i64,
    pub post_id: i64,
    pub status: VerificationStatus,
    pub detox_time: Option<i32>,
    pub user_nickname: Option<String>,
    pub verification_image_url: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct WeeklyVerificationResponse {
    /// 本周（周一至周日）内有有效认证的日期
    pub dates: Vec<NaiveDate>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct StreakResponse {
    pub streak_days: i32,
}
