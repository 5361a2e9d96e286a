use crate::entities::{UserRole, UserStatus, users};
use crate::models::point::PointHistoryResponse;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct AdminUserListQuery {
    pub nickname: Option<String>,
    pub email: Option<String>,
    pub role: Option<UserRole>,
    pub status: Option<UserStatus>,
    pub page: Option<i64>,
    pub page_size: Option<i64>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AdminUserInfoResponse {
    pub user_id: i64,
    pub nickname: String,
    pub email: String,
    pub role: String,
    pub status: UserStatus,
    pub created_at: Option<DateTime<Utc>>,
}

impl From<users::Model> for AdminUserInfoResponse {
    fn from(user: users::Model) -> Self {
        Self {
            user_id: user.id,
            nickname: user.nickname,
            email: user.email,
            role: user.role.display_name().to_string(),
            status: user.status,
            created_at: user.created_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AdminUserDetailResponse {
    pub user_id: i64,
    pub email: String,
    pub nickname: String,
    pub role: UserRole,
    pub status: UserStatus,
    pub remaining_point: i32,
    pub total_point: i32,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    /// 最近积分流水（最多 10 条）
    pub point_history: Vec<PointHistoryResponse>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UserStatusUpdateRequest {
    pub status: UserStatus,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UserRoleUpdateRequest {
    pub role: UserRole,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DashboardStatsResponse {
    pub total_users: i64,
    pub users_joined_today: i64,
    pub pending_verifications: i64,
    pub verifications_processed_today: i64,
    pub pending_reports: i64,
    pub reports_processed_today: i64,
}
