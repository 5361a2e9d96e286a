use crate::entities::categories::{FREE_CATEGORY_NAME, INFO_CATEGORY_NAME};
use crate::entities::{
    UserRole, category_entity as categories, point_history_entity as point_histories,
    post_entity as posts, user_entity as users, verification_entity as verifications,
};
use crate::error::{AppError, AppResult};
use crate::models::{PaginatedResponse, PaginationParams, PointHistoryResponse};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, EntityTrait,
    IntoActiveModel, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};

pub const INFO_POST_POINTS: i32 = 20;
pub const FREE_POST_POINTS: i32 = 10;
pub const CERTIFICATION_POINTS: i32 = 50;

/// 积分流水类型标签
pub const POINT_TYPE_EARN: &str = "증가";
pub const POINT_TYPE_SPEND: &str = "감소";

/// 发帖积分规则：只有信息分享与自由板块给分，其余板块（含认证板块）不给。
/// 认证板块通过审核路径单独结算，这里返回 0 即是防止重复奖励的闸门。
pub fn accrual_for_category(category_name: &str) -> i32 {
    if category_name == INFO_CATEGORY_NAME {
        INFO_POST_POINTS
    } else if category_name == FREE_CATEGORY_NAME {
        FREE_POST_POINTS
    } else {
        0
    }
}

/// 晋升判定：管理员豁免；目标等级严格高于当前等级才晋升，只升不降
pub fn promoted_role(current: UserRole, total_points: i32) -> Option<UserRole> {
    if current == UserRole::Admin {
        return None;
    }
    let target = UserRole::role_for_points(total_points);
    target.is_higher_than(current).then_some(target)
}

#[derive(Clone)]
pub struct PointService {
    pool: DatabaseConnection,
}

impl PointService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    /// 发帖积分结算。由事件监听任务在发帖事务提交后调用，自管事务。
    pub async fn add_points_for_new_post(&self, post_id: i64) -> AppResult<()> {
        let post = posts::Entity::find_by_id(post_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Post not found".to_string()))?;

        let category = categories::Entity::find_by_id(post.category_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Category not found".to_string()))?;

        let points_to_add = accrual_for_category(&category.category_name);
        if points_to_add == 0 {
            return Ok(());
        }

        let txn = self.pool.begin().await?;
        self.accrue(&txn, post.user_id, points_to_add).await?;
        txn.commit().await?;
        Ok(())
    }

    /// 认证通过积分结算。与审核状态流转共用调用方事务，失败一起回滚。
    pub async fn add_points_for_certification_approval(
        &self,
        txn: &DatabaseTransaction,
        verification: &verifications::Model,
    ) -> AppResult<()> {
        self.accrue(txn, verification.user_id, CERTIFICATION_POINTS)
            .await
    }

    // 行锁内读改写：流水、余额、晋升同事务落库。
    // 并发结算同一用户时靠 SELECT ... FOR UPDATE 避免丢失更新。
    async fn accrue(
        &self,
        txn: &DatabaseTransaction,
        user_id: i64,
        points_to_add: i32,
    ) -> AppResult<()> {
        let user = users::Entity::find_by_id(user_id)
            .lock_exclusive()
            .one(txn)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        let new_total = user.total_point + points_to_add;
        let new_remaining = user.remaining_point + points_to_add;
        let promoted = promoted_role(user.role, new_total);

        point_histories::ActiveModel {
            user_id: Set(user.id),
            point_change: Set(points_to_add),
            history_type: Set(POINT_TYPE_EARN.to_string()),
            ..Default::default()
        }
        .insert(txn)
        .await?;

        let mut am = user.into_active_model();
        am.total_point = Set(new_total);
        am.remaining_point = Set(new_remaining);
        if let Some(role) = promoted {
            am.role = Set(role);
        }
        am.update(txn).await?;

        if let Some(role) = promoted {
            log::info!("User {user_id} promoted to {role:?} at {new_total} points");
        }
        Ok(())
    }

    /// 用户积分流水，按时间倒序分页
    pub async fn get_user_point_history(
        &self,
        user_id: i64,
        params: &PaginationParams,
    ) -> AppResult<PaginatedResponse<PointHistoryResponse>> {
        let user = users::Entity::find_by_id(user_id).one(&self.pool).await?;
        if user.is_none() {
            return Err(AppError::NotFound("User not found".to_string()));
        }

        let total = point_histories::Entity::find()
            .filter(point_histories::Column::UserId.eq(user_id))
            .count(&self.pool)
            .await? as i64;

        let models = point_histories::Entity::find()
            .filter(point_histories::Column::UserId.eq(user_id))
            .order_by_desc(point_histories::Column::CreatedAt)
            .offset(params.get_offset() as u64)
            .limit(params.get_limit() as u64)
            .all(&self.pool)
            .await?;

        let items: Vec<PointHistoryResponse> =
            models.into_iter().map(PointHistoryResponse::from).collect();

        Ok(PaginatedResponse::new(
            items,
            params.get_page(),
            params.get_page_size(),
            total,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::categories::{NOTICE_CATEGORY_NAME, VERIFICATION_CATEGORY_NAME};

    #[test]
    fn test_accrual_for_eligible_categories() {
        assert_eq!(accrual_for_category(INFO_CATEGORY_NAME), 20);
        assert_eq!(accrual_for_category(FREE_CATEGORY_NAME), 10);
    }

    #[test]
    fn test_accrual_for_ineligible_categories() {
        // 认证板块在发帖路径不给分，防止与审核奖励重复
        assert_eq!(accrual_for_category(VERIFICATION_CATEGORY_NAME), 0);
        assert_eq!(accrual_for_category(NOTICE_CATEGORY_NAME), 0);
        assert_eq!(accrual_for_category("없는게시판"), 0);
    }

    #[test]
    fn test_promotion_within_floor_tier() {
        // 新用户发一帖拿 20 分，仍在最低档
        assert_eq!(promoted_role(UserRole::Sprout, 20), None);
    }

    #[test]
    fn test_promotion_on_threshold_crossing() {
        // 95 分发帖 +10 → 105 分，跨过 100 门槛
        assert_eq!(
            promoted_role(UserRole::Sprout, 105),
            Some(UserRole::Trainee)
        );
        assert_eq!(
            promoted_role(UserRole::Trainee, 600),
            Some(UserRole::Explorer)
        );
        // 跳档：直接跨过多个门槛时取最高符合档
        assert_eq!(
            promoted_role(UserRole::Sprout, 2000),
            Some(UserRole::Conscious)
        );
    }

    #[test]
    fn test_no_promotion_below_next_threshold() {
        // 已在 600 档位，610 分未到 2000 门槛
        assert_eq!(promoted_role(UserRole::Explorer, 610), None);
    }

    #[test]
    fn test_never_demotes() {
        assert_eq!(promoted_role(UserRole::Cleaner, 0), None);
        assert_eq!(promoted_role(UserRole::Explorer, 99), None);
    }

    #[test]
    fn test_admin_exempt_from_promotion() {
        assert_eq!(promoted_role(UserRole::Admin, 0), None);
        assert_eq!(promoted_role(UserRole::Admin, 1_000_000), None);
    }
}
