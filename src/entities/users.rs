use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub email: String,
    pub password_hash: Option<String>,
    pub nickname: String,
    pub remaining_point: i32,
    pub total_point: i32,
    pub role: UserRole,
    pub status: UserStatus,
    pub refresh_token: Option<String>,
    pub profile_image_url: Option<String>,
    pub status_message: Option<String>,
    pub detox_goal: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub last_verification_date: Option<NaiveDate>,
    pub streak_days: i32,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// 用户等级。普通等级按累计积分晋升，ADMIN 为独立哨兵值，不参与排序。
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(Some(30))")]
pub enum UserRole {
    #[sea_orm(string_value = "ROLE_USER_SPROUT")]
    #[serde(rename = "ROLE_USER_SPROUT")]
    Sprout,
    #[sea_orm(string_value = "ROLE_USER_TRAINEE")]
    #[serde(rename = "ROLE_USER_TRAINEE")]
    Trainee,
    #[sea_orm(string_value = "ROLE_USER_EXPLORER")]
    #[serde(rename = "ROLE_USER_EXPLORER")]
    Explorer,
    #[sea_orm(string_value = "ROLE_USER_CONSCIOUS")]
    #[serde(rename = "ROLE_USER_CONSCIOUS")]
    Conscious,
    #[sea_orm(string_value = "ROLE_USER_DESTROYER")]
    #[serde(rename = "ROLE_USER_DESTROYER")]
    Destroyer,
    #[sea_orm(string_value = "ROLE_USER_CLEANER")]
    #[serde(rename = "ROLE_USER_CLEANER")]
    Cleaner,
    #[sea_orm(string_value = "ROLE_ADMIN")]
    #[serde(rename = "ROLE_ADMIN")]
    Admin,
}

// 普通等级从低到高
const RANKS: [UserRole; 6] = [
    UserRole::Sprout,
    UserRole::Trainee,
    UserRole::Explorer,
    UserRole::Conscious,
    UserRole::Destroyer,
    UserRole::Cleaner,
];

impl UserRole {
    pub fn display_name(&self) -> &'static str {
        match self {
            UserRole::Sprout => "디톡스새싹",
            UserRole::Trainee => "절제수련생",
            UserRole::Explorer => "집중탐험가",
            UserRole::Conscious => "선명한의식",
            UserRole::Destroyer => "도파민파괴자",
            UserRole::Cleaner => "브레인클리너",
            UserRole::Admin => "관리자",
        }
    }

    /// 晋升门槛（累计积分）。ADMIN 取 i64::MAX，表不可达。
    pub fn min_points(&self) -> i64 {
        match self {
            UserRole::Sprout => 0,
            UserRole::Trainee => 100,
            UserRole::Explorer => 600,
            UserRole::Conscious => 2000,
            UserRole::Destroyer => 4500,
            UserRole::Cleaner => 7500,
            UserRole::Admin => i64::MAX,
        }
    }

    /// 给定累计积分，返回对应的最高等级
    pub fn role_for_points(total_points: i32) -> UserRole {
        for role in RANKS.iter().rev() {
            if i64::from(total_points) >= role.min_points() {
                return *role;
            }
        }
        UserRole::Sprout
    }

    // 当前等级是否严格高于给定等级；任一侧为 ADMIN 时恒为 false
    pub fn is_higher_than(&self, other: UserRole) -> bool {
        if *self == UserRole::Admin || other == UserRole::Admin {
            return false;
        }
        self.min_points() > other.min_points()
    }

    pub fn is_admin(&self) -> bool {
        *self == UserRole::Admin
    }
}

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(Some(20))")]
pub enum UserStatus {
    #[sea_orm(string_value = "ACTIVE")]
    #[serde(rename = "ACTIVE")]
    Active,
    #[sea_orm(string_value = "SUSPENDED")]
    #[serde(rename = "SUSPENDED")]
    Suspended,
    #[sea_orm(string_value = "DELETED")]
    #[serde(rename = "DELETED")]
    Deleted,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_for_points_floor() {
        assert_eq!(UserRole::role_for_points(0), UserRole::Sprout);
        assert_eq!(UserRole::role_for_points(20), UserRole::Sprout);
        assert_eq!(UserRole::role_for_points(99), UserRole::Sprout);
    }

    #[test]
    fn test_role_for_points_thresholds() {
        assert_eq!(UserRole::role_for_points(100), UserRole::Trainee);
        assert_eq!(UserRole::role_for_points(599), UserRole::Trainee);
        assert_eq!(UserRole::role_for_points(600), UserRole::Explorer);
        assert_eq!(UserRole::role_for_points(610), UserRole::Explorer);
        assert_eq!(UserRole::role_for_points(2000), UserRole::Conscious);
        assert_eq!(UserRole::role_for_points(4500), UserRole::Destroyer);
        assert_eq!(UserRole::role_for_points(7499), UserRole::Destroyer);
        assert_eq!(UserRole::role_for_points(7500), UserRole::Cleaner);
        assert_eq!(UserRole::role_for_points(i32::MAX), UserRole::Cleaner);
    }

    #[test]
    fn test_admin_never_returned_by_lookup() {
        for points in [0, 100, 10_000, i32::MAX] {
            assert_ne!(UserRole::role_for_points(points), UserRole::Admin);
        }
    }

    #[test]
    fn test_is_higher_than_ordering() {
        assert!(UserRole::Trainee.is_higher_than(UserRole::Sprout));
        assert!(UserRole::Cleaner.is_higher_than(UserRole::Destroyer));
        assert!(!UserRole::Sprout.is_higher_than(UserRole::Sprout));
        assert!(!UserRole::Sprout.is_higher_than(UserRole::Trainee));
    }

    #[test]
    fn test_is_higher_than_admin_sentinel() {
        // ADMIN 两侧参与比较时恒为 false
        assert!(!UserRole::Admin.is_higher_than(UserRole::Sprout));
        assert!(!UserRole::Admin.is_higher_than(UserRole::Cleaner));
        assert!(!UserRole::Cleaner.is_higher_than(UserRole::Admin));
        assert!(!UserRole::Admin.is_higher_than(UserRole::Admin));
    }
}
