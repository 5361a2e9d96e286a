use crate::entities::{
    ReportStatus, UserRole, UserStatus, VerificationStatus, category_entity as categories,
    point_history_entity as point_histories, post_entity as posts, report_entity as reports,
    user_entity as users, verification_entity as verifications,
};
use crate::error::{AppError, AppResult};
use crate::models::{
    AdminReportResponse, AdminUserDetailResponse, AdminUserInfoResponse, AdminUserListQuery,
    DashboardStatsResponse, PaginatedResponse, PaginationParams, PointHistoryResponse,
    VerificationResponse, decode_image_urls,
};
use crate::services::PointService;
use crate::utils::today_range;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, IntoActiveModel,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use std::collections::{HashMap, HashSet};

#[derive(Clone)]
pub struct AdminService {
    pool: DatabaseConnection,
    point_service: PointService,
}

impl AdminService {
    pub fn new(pool: DatabaseConnection, point_service: PointService) -> Self {
        Self {
            pool,
            point_service,
        }
    }

    // ---------- 认证审核 ----------

    /// 待审核认证队列，按提交顺序（id 升序）分页
    pub async fn get_pending_verifications(
        &self,
        params: &PaginationParams,
    ) -> AppResult<PaginatedResponse<VerificationResponse>> {
        let filter = verifications::Column::Status.eq(VerificationStatus::Pending);

        let total = verifications::Entity::find()
            .filter(filter.clone())
            .count(&self.pool)
            .await? as i64;
        let models = verifications::Entity::find()
            .filter(filter)
            .order_by_asc(verifications::Column::Id)
            .offset(params.get_offset() as u64)
            .limit(params.get_limit() as u64)
            .all(&self.pool)
            .await?;

        let items = self.verifications_to_responses(models).await?;
        Ok(PaginatedResponse::new(
            items,
            params.get_page(),
            params.get_page_size(),
            total,
        ))
    }

    /// 通过认证。状态流转与积分结算同一事务，结算失败则审核一并回滚。
    pub async fn approve_verification(&self, verification_id: i64) -> AppResult<()> {
        let txn = self.pool.begin().await?;

        let verification = verifications::Entity::find_by_id(verification_id)
            .lock_exclusive()
            .one(&txn)
            .await?
            .ok_or_else(|| AppError::NotFound("Verification not found".to_string()))?;

        // 只处理 PENDING，防止重复发放
        if verification.status != VerificationStatus::Pending {
            return Err(AppError::Conflict(
                "Verification already processed".to_string(),
            ));
        }

        let mut am = verification.into_active_model();
        am.status = Set(VerificationStatus::Approved);
        am.updated_at = Set(Some(Utc::now()));
        let verification = am.update(&txn).await?;

        self.point_service
            .add_points_for_certification_approval(&txn, &verification)
            .await?;

        txn.commit().await?;
        log::info!("Verification {verification_id} approved");
        Ok(())
    }

    pub async fn reject_verification(&self, verification_id: i64) -> AppResult<()> {
        let verification = verifications::Entity::find_by_id(verification_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Verification not found".to_string()))?;

        if verification.status != VerificationStatus::Pending {
            return Err(AppError::Conflict(
                "Verification already processed".to_string(),
            ));
        }

        let mut am = verification.into_active_model();
        am.status = Set(VerificationStatus::Rejected);
        am.updated_at = Set(Some(Utc::now()));
        am.update(&self.pool).await?;

        log::info!("Verification {verification_id} rejected");
        Ok(())
    }

    // ---------- 用户管理 ----------

    pub async fn get_users(
        &self,
        query: &AdminUserListQuery,
    ) -> AppResult<PaginatedResponse<AdminUserInfoResponse>> {
        let params = PaginationParams::new(query.page, query.page_size);

        let mut condition = Condition::all();
        if let Some(nickname) = &query.nickname {
            condition = condition.add(users::Column::Nickname.contains(nickname));
        }
        if let Some(email) = &query.email {
            condition = condition.add(users::Column::Email.contains(email));
        }
        if let Some(role) = query.role {
            condition = condition.add(users::Column::Role.eq(role));
        }
        if let Some(status) = query.status {
            condition = condition.add(users::Column::Status.eq(status));
        }

        let total = users::Entity::find()
            .filter(condition.clone())
            .count(&self.pool)
            .await? as i64;
        let models = users::Entity::find()
            .filter(condition)
            .order_by_desc(users::Column::CreatedAt)
            .offset(params.get_offset() as u64)
            .limit(params.get_limit() as u64)
            .all(&self.pool)
            .await?;

        let items: Vec<AdminUserInfoResponse> = models
            .into_iter()
            .map(AdminUserInfoResponse::from)
            .collect();
        Ok(PaginatedResponse::new(
            items,
            params.get_page(),
            params.get_page_size(),
            total,
        ))
    }

    /// 用户详情，附最近 10 条积分流水
    pub async fn get_user_detail(&self, user_id: i64) -> AppResult<AdminUserDetailResponse> {
        let user = users::Entity::find_by_id(user_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        let history_models = point_histories::Entity::find()
            .filter(point_histories::Column::UserId.eq(user_id))
            .order_by_desc(point_histories::Column::Id)
            .limit(10)
            .all(&self.pool)
            .await?;
        let history: Vec<PointHistoryResponse> = history_models
            .into_iter()
            .map(PointHistoryResponse::from)
            .collect();

        Ok(AdminUserDetailResponse {
            user_id: user.id,
            email: user.email,
            nickname: user.nickname,
            role: user.role,
            status: user.status,
            remaining_point: user.remaining_point,
            total_point: user.total_point,
            created_at: user.created_at,
            updated_at: user.updated_at,
            point_history: history,
        })
    }

    /// 变更用户状态。管理员账号不可停用/删除；删除走软删除。
    pub async fn update_user_status(&self, user_id: i64, new_status: UserStatus) -> AppResult<()> {
        let user = users::Entity::find_by_id(user_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        if user.role.is_admin()
            && matches!(new_status, UserStatus::Suspended | UserStatus::Deleted)
        {
            return Err(AppError::ValidationError(
                "Cannot change admin account status".to_string(),
            ));
        }

        let nickname = user.nickname.clone();
        let email = user.email.clone();
        let mut am = user.into_active_model();
        am.status = Set(new_status);
        match new_status {
            UserStatus::Suspended => {
                am.refresh_token = Set(None);
            }
            UserStatus::Deleted => {
                // 软删除：打散邮箱与昵称，清空凭据
                am.nickname = Set(format!("탈퇴한 회원_{nickname}"));
                am.email = Set(format!("deleted_{email}"));
                am.password_hash = Set(None);
                am.refresh_token = Set(None);
            }
            UserStatus::Active => {}
        }
        am.updated_at = Set(Some(Utc::now()));
        am.update(&self.pool).await?;

        Ok(())
    }

    /// 管理员手工指定等级，绕过积分晋升；管理员账号不可改
    pub async fn update_user_role(&self, user_id: i64, new_role: UserRole) -> AppResult<()> {
        let user = users::Entity::find_by_id(user_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        if user.role.is_admin() {
            return Err(AppError::ValidationError(
                "Cannot change admin account role".to_string(),
            ));
        }

        let mut am = user.into_active_model();
        am.role = Set(new_role);
        am.updated_at = Set(Some(Utc::now()));
        am.update(&self.pool).await?;

        Ok(())
    }

    // ---------- 仪表盘 ----------

    pub async fn get_dashboard_stats(&self) -> AppResult<DashboardStatsResponse> {
        let (start_of_day, end_of_day) = today_range();

        let total_users = users::Entity::find().count(&self.pool).await? as i64;
        let users_joined_today = users::Entity::find()
            .filter(users::Column::CreatedAt.between(start_of_day, end_of_day))
            .count(&self.pool)
            .await? as i64;

        let pending_verifications = verifications::Entity::find()
            .filter(verifications::Column::Status.eq(VerificationStatus::Pending))
            .count(&self.pool)
            .await? as i64;
        let verifications_processed_today = verifications::Entity::find()
            .filter(
                verifications::Column::Status
                    .is_in([VerificationStatus::Approved, VerificationStatus::Rejected]),
            )
            .filter(verifications::Column::UpdatedAt.between(start_of_day, end_of_day))
            .count(&self.pool)
            .await? as i64;

        let pending_reports = reports::Entity::find()
            .filter(reports::Column::Status.eq(ReportStatus::Pending))
            .count(&self.pool)
            .await? as i64;
        let reports_processed_today = reports::Entity::find()
            .filter(reports::Column::Status.is_in([ReportStatus::Approved, ReportStatus::Rejected]))
            .filter(reports::Column::UpdatedAt.between(start_of_day, end_of_day))
            .count(&self.pool)
            .await? as i64;

        Ok(DashboardStatsResponse {
            total_users,
            users_joined_today,
            pending_verifications,
            verifications_processed_today,
            pending_reports,
            reports_processed_today,
        })
    }

    // ---------- 举报处理 ----------

    /// 待处理举报队列，最早的排前面
    pub async fn get_pending_reports(
        &self,
        params: &PaginationParams,
    ) -> AppResult<PaginatedResponse<AdminReportResponse>> {
        let filter = reports::Column::Status.eq(ReportStatus::Pending);

        let total = reports::Entity::find()
            .filter(filter.clone())
            .count(&self.pool)
            .await? as i64;
        let models = reports::Entity::find()
            .filter(filter)
            .order_by_asc(reports::Column::CreatedAt)
            .offset(params.get_offset() as u64)
            .limit(params.get_limit() as u64)
            .all(&self.pool)
            .await?;

        let items = self.reports_to_responses(models).await?;
        Ok(PaginatedResponse::new(
            items,
            params.get_page(),
            params.get_page_size(),
            total,
        ))
    }

    pub async fn update_report_status(
        &self,
        report_id: i64,
        new_status: ReportStatus,
    ) -> AppResult<()> {
        let report = reports::Entity::find_by_id(report_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Report not found".to_string()))?;

        let mut am = report.into_active_model();
        am.status = Set(new_status);
        am.updated_at = Set(Some(Utc::now()));
        am.update(&self.pool).await?;

        Ok(())
    }

    // ---------- 响应组装 ----------

    async fn verifications_to_responses(
        &self,
        models: Vec<verifications::Model>,
    ) -> AppResult<Vec<VerificationResponse>> {
        if models.is_empty() {
            return Ok(vec![]);
        }

        let user_ids: HashSet<i64> = models.iter().map(|v| v.user_id).collect();
        let post_ids: Vec<i64> = models.iter().map(|v| v.post_id).collect();

        let nickname_by_id: HashMap<i64, String> = users::Entity::find()
            .filter(users::Column::Id.is_in(user_ids))
            .all(&self.pool)
            .await?
            .into_iter()
            .map(|u| (u.id, u.nickname))
            .collect();
        let image_by_post_id: HashMap<i64, Option<String>> = posts::Entity::find()
            .filter(posts::Column::Id.is_in(post_ids))
            .all(&self.pool)
            .await?
            .into_iter()
            .map(|p| (p.id, p.verification_image_url))
            .collect();

        Ok(models
            .into_iter()
            .map(|v| VerificationResponse {
                verification_id: v.id,
                user_id: v.user_id,
                post_id: v.post_id,
                status: v.status,
                detox_time: v.detox_time,
                user_nickname: nickname_by_id.get(&v.user_id).cloned(),
                verification_image_url: image_by_post_id
                    .get(&v.post_id)
                    .cloned()
                    .flatten(),
                created_at: v.created_at,
            })
            .collect())
    }

    // 被举报帖子可能已删除，缺失字段留空
    async fn reports_to_responses(
        &self,
        models: Vec<reports::Model>,
    ) -> AppResult<Vec<AdminReportResponse>> {
        if models.is_empty() {
            return Ok(vec![]);
        }

        let user_ids: HashSet<i64> = models
            .iter()
            .flat_map(|r| {
                std::iter::once(r.reporter_id).chain(r.reported_post_author_id)
            })
            .collect();
        let post_ids: Vec<i64> = models.iter().filter_map(|r| r.post_id).collect();

        let nickname_by_id: HashMap<i64, String> = users::Entity::find()
            .filter(users::Column::Id.is_in(user_ids))
            .all(&self.pool)
            .await?
            .into_iter()
            .map(|u| (u.id, u.nickname))
            .collect();

        let post_by_id: HashMap<i64, posts::Model> = if post_ids.is_empty() {
            HashMap::new()
        } else {
            posts::Entity::find()
                .filter(posts::Column::Id.is_in(post_ids))
                .all(&self.pool)
                .await?
                .into_iter()
                .map(|p| (p.id, p))
                .collect()
        };

        let category_ids: HashSet<i64> = post_by_id.values().map(|p| p.category_id).collect();
        let category_by_id: HashMap<i64, String> = if category_ids.is_empty() {
            HashMap::new()
        } else {
            categories::Entity::find()
                .filter(categories::Column::Id.is_in(category_ids))
                .all(&self.pool)
                .await?
                .into_iter()
                .map(|c| (c.id, c.category_name))
                .collect()
        };

        Ok(models
            .into_iter()
            .map(|report| {
                let post = report.post_id.and_then(|id| post_by_id.get(&id));
                AdminReportResponse {
                    report_id: report.id,
                    reason: report.reason,
                    status: report.status,
                    created_at: report.created_at,
                    reporter_id: report.reporter_id,
                    reporter_nickname: nickname_by_id.get(&report.reporter_id).cloned(),
                    reported_post_id: post.map(|p| p.id),
                    reported_post_title: post.map(|p| p.title.clone()),
                    reported_post_content: post.map(|p| p.content.clone()),
                    reported_post_author_id: report.reported_post_author_id,
                    reported_post_author_nickname: report
                        .reported_post_author_id
                        .and_then(|id| nickname_by_id.get(&id).cloned()),
                    reported_post_category_name: post
                        .and_then(|p| category_by_id.get(&p.category_id).cloned()),
                    reported_post_image_urls: post
                        .map(|p| decode_image_urls(p.image_urls.as_deref()))
                        .unwrap_or_default(),
                }
            })
            .collect())
    }
}
