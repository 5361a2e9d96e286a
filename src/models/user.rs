use crate::entities::{UserRole, UserStatus, users};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SignUpRequest {
    #[schema(example = "detox@example.com")]
    pub email: String,
    #[schema(example = "Password123")]
    pub password: String,
    #[schema(example = "도파민파이터")]
    pub nickname: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LoginRequest {
    #[schema(example = "detox@example.com")]
    pub email: String,
    #[schema(example = "Password123")]
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UpdateProfileRequest {
    pub nickname: Option<String>,
    pub email: Option<String>,
    pub status_message: Option<String>,
    pub detox_goal: Option<String>,
    #[schema(example = "1999-01-01")]
    pub birth_date: Option<String>, // YYYY-MM-DD
    pub profile_image_url: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    pub id: i64,
    pub email: String,
    pub nickname: String,
    pub role: UserRole,
    /// 等级展示名
    pub role_name: String,
    pub status: UserStatus,
    pub remaining_point: i32,
    pub total_point: i32,
    pub streak_days: i32,
    pub profile_image_url: Option<String>,
    pub status_message: Option<String>,
    pub detox_goal: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub created_at: Option<DateTime<Utc>>,
}

impl From<users::Model> for UserResponse {
    fn from(user: users::Model) -> Self {
        Self {
            id: user.id,
            email: user.email,
            nickname: user.nickname,
            role: user.role,
            role_name: user.role.display_name().to_string(),
            status: user.status,
            remaining_point: user.remaining_point,
            total_point: user.total_point,
            streak_days: user.streak_days,
            profile_image_url: user.profile_image_url,
            status_message: user.status_message,
            detox_goal: user.detox_goal,
            birth_date: user.birth_date,
            created_at: user.created_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AuthResponse {
    pub user: UserResponse,
    pub access_token: String,
    pub refresh_token: String,
    pub expires_in: i64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DuplicateCheckResponse {
    pub duplicate: bool,
}
