use crate::entities::{
    VerificationStatus, post_entity as posts, user_entity as users,
    verification_entity as verifications,
};
use crate::error::{AppError, AppResult};
use crate::models::VerificationResponse;
use crate::utils::{day_range, week_range};
use chrono::{Duration, NaiveDate, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait,
    IntoActiveModel, QueryFilter, Set,
};

/// 连续认证天数的迁移规则。返回 None 表示当天已认证过，无需变更。
pub fn next_streak_days(
    last_verification_date: Option<NaiveDate>,
    today: NaiveDate,
    current_streak: i32,
) -> Option<i32> {
    match last_verification_date {
        // 首次认证
        None => Some(1),
        Some(last) if last == today - Duration::days(1) => Some(current_streak + 1),
        Some(last) if last == today => None,
        // 断签，从 1 重新开始
        Some(_) => Some(1),
    }
}

#[derive(Clone)]
pub struct VerificationService {
    pool: DatabaseConnection,
}

impl VerificationService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    /// 创建认证申请（PENDING）并刷新连续认证天数。
    /// 发帖流程在自己的事务里调用，传入事务连接。
    pub async fn create_verification<C: ConnectionTrait>(
        &self,
        conn: &C,
        user_id: i64,
        post_id: i64,
        detox_time: Option<i32>,
    ) -> AppResult<verifications::Model> {
        let post = posts::Entity::find_by_id(post_id).one(conn).await?;
        if post.is_none() {
            return Err(AppError::NotFound("Post not found".to_string()));
        }
        let user = users::Entity::find_by_id(user_id)
            .one(conn)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        let verification = verifications::ActiveModel {
            user_id: Set(user_id),
            post_id: Set(post_id),
            status: Set(VerificationStatus::Pending),
            detox_time: Set(detox_time),
            ..Default::default()
        }
        .insert(conn)
        .await?;

        self.update_streak_days(conn, user).await?;

        Ok(verification)
    }

    async fn update_streak_days<C: ConnectionTrait>(
        &self,
        conn: &C,
        user: users::Model,
    ) -> AppResult<()> {
        let today = Utc::now().date_naive();
        let Some(streak) = next_streak_days(user.last_verification_date, today, user.streak_days)
        else {
            // 今天已认证过
            return Ok(());
        };

        let mut am = user.into_active_model();
        am.streak_days = Set(streak);
        am.last_verification_date = Set(Some(today));
        am.update(conn).await?;
        Ok(())
    }

    pub async fn get_verification(&self, id: i64) -> AppResult<VerificationResponse> {
        let verification = verifications::Entity::find_by_id(id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Verification not found".to_string()))?;
        self.to_response(verification).await
    }

    pub async fn get_all_verifications(&self) -> AppResult<Vec<VerificationResponse>> {
        let models = verifications::Entity::find().all(&self.pool).await?;
        let mut responses = Vec::with_capacity(models.len());
        for verification in models {
            responses.push(self.to_response(verification).await?);
        }
        Ok(responses)
    }

    /// 本周（周一至周日）有有效认证（PENDING/APPROVED）的日期，去重
    pub async fn get_weekly_verifications(&self, user_id: i64) -> AppResult<Vec<NaiveDate>> {
        let today = Utc::now().date_naive();
        let (monday, sunday) = week_range(today);
        let (week_start, _) = day_range(monday);
        let (_, week_end) = day_range(sunday);

        let models = verifications::Entity::find()
            .filter(verifications::Column::UserId.eq(user_id))
            .filter(verifications::Column::CreatedAt.between(week_start, week_end))
            .filter(
                verifications::Column::Status
                    .is_in([VerificationStatus::Pending, VerificationStatus::Approved]),
            )
            .all(&self.pool)
            .await?;

        let mut dates: Vec<NaiveDate> = models
            .into_iter()
            .filter_map(|v| v.created_at.map(|at| at.date_naive()))
            .collect();
        dates.sort();
        dates.dedup();
        Ok(dates)
    }

    pub async fn get_streak_days(&self, user_id: i64) -> AppResult<i32> {
        let user = users::Entity::find_by_id(user_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;
        Ok(user.streak_days)
    }

    async fn to_response(
        &self,
        verification: verifications::Model,
    ) -> AppResult<VerificationResponse> {
        let user = users::Entity::find_by_id(verification.user_id)
            .one(&self.pool)
            .await?;
        let post = posts::Entity::find_by_id(verification.post_id)
            .one(&self.pool)
            .await?;

        Ok(VerificationResponse {
            verification_id: verification.id,
            user_id: verification.user_id,
            post_id: verification.post_id,
            status: verification.status,
            detox_time: verification.detox_time,
            user_nickname: user.map(|u| u.nickname),
            verification_image_url: post.and_then(|p| p.verification_image_url),
            created_at: verification.created_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_first_verification_starts_streak() {
        assert_eq!(next_streak_days(None, date(2025, 3, 14), 0), Some(1));
    }

    #[test]
    fn test_consecutive_day_increments() {
        assert_eq!(
            next_streak_days(Some(date(2025, 3, 13)), date(2025, 3, 14), 4),
            Some(5)
        );
    }

    #[test]
    fn test_same_day_is_noop() {
        assert_eq!(
            next_streak_days(Some(date(2025, 3, 14)), date(2025, 3, 14), 4),
            None
        );
    }

    #[test]
    fn test_gap_resets_streak() {
        assert_eq!(
            next_streak_days(Some(date(2025, 3, 10)), date(2025, 3, 14), 9),
            Some(1)
        );
    }

    #[test]
    fn test_month_boundary_counts_as_consecutive() {
        assert_eq!(
            next_streak_days(Some(date(2025, 2, 28)), date(2025, 3, 1), 2),
            Some(3)
        );
    }
}
