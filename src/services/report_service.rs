use crate::entities::{
    ReportStatus, post_entity as posts, report_entity as reports, user_entity as users,
};
use crate::error::{AppError, AppResult};
use crate::models::ReportCreateRequest;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};

#[derive(Clone)]
pub struct ReportService {
    pool: DatabaseConnection,
}

impl ReportService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    /// 举报帖子。不能举报自己的帖子；作者单独快照一份，
    /// 帖子之后被删仍能追责。
    pub async fn create_report(
        &self,
        reporter_id: i64,
        request: ReportCreateRequest,
    ) -> AppResult<i64> {
        let post = posts::Entity::find_by_id(request.post_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Post not found".to_string()))?;

        let reporter = users::Entity::find_by_id(reporter_id)
            .one(&self.pool)
            .await?;
        if reporter.is_none() {
            return Err(AppError::NotFound("User not found".to_string()));
        }

        if post.user_id == reporter_id {
            return Err(AppError::ValidationError(
                "Cannot report your own post".to_string(),
            ));
        }

        if request.reason.trim().is_empty() {
            return Err(AppError::ValidationError(
                "Report reason must not be empty".to_string(),
            ));
        }

        let report = reports::ActiveModel {
            post_id: Set(Some(post.id)),
            reported_post_author_id: Set(Some(post.user_id)),
            reporter_id: Set(reporter_id),
            reason: Set(request.reason),
            status: Set(ReportStatus::Pending),
            ..Default::default()
        }
        .insert(&self.pool)
        .await?;

        Ok(report.id)
    }
}
