use crate::entities::{comment_entity as comments, post_entity as posts, user_entity as users};
use crate::error::{AppError, AppResult};
use crate::models::{CommentRequest, CommentResponse};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryFilter,
    QueryOrder, Set,
};
use std::collections::{HashMap, HashSet};

#[derive(Clone)]
pub struct CommentService {
    pool: DatabaseConnection,
}

impl CommentService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    /// 帖子的全部评论（含一级回复），平铺返回，层级由前端按 parent_id 组装
    pub async fn get_comments_by_post(&self, post_id: i64) -> AppResult<Vec<CommentResponse>> {
        let post = posts::Entity::find_by_id(post_id).one(&self.pool).await?;
        if post.is_none() {
            return Err(AppError::NotFound("Post not found".to_string()));
        }

        let models = comments::Entity::find()
            .filter(comments::Column::PostId.eq(post_id))
            .order_by_asc(comments::Column::Id)
            .all(&self.pool)
            .await?;
        self.to_responses(models).await
    }

    pub async fn write_comment(
        &self,
        post_id: i64,
        user_id: i64,
        request: CommentRequest,
    ) -> AppResult<CommentResponse> {
        let post = posts::Entity::find_by_id(post_id).one(&self.pool).await?;
        if post.is_none() {
            return Err(AppError::NotFound("Post not found".to_string()));
        }
        let user = users::Entity::find_by_id(user_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        if request.content.trim().is_empty() {
            return Err(AppError::ValidationError(
                "Comment content must not be empty".to_string(),
            ));
        }

        // 回复必须挂在同帖的既有评论上
        if let Some(parent_id) = request.parent_id {
            let parent = comments::Entity::find_by_id(parent_id)
                .one(&self.pool)
                .await?
                .ok_or_else(|| AppError::NotFound("Parent comment not found".to_string()))?;
            if parent.post_id != post_id {
                return Err(AppError::ValidationError(
                    "Parent comment belongs to another post".to_string(),
                ));
            }
        }

        let comment = comments::ActiveModel {
            post_id: Set(post_id),
            user_id: Set(user_id),
            parent_id: Set(request.parent_id),
            content: Set(request.content),
            ..Default::default()
        }
        .insert(&self.pool)
        .await?;

        Ok(CommentResponse::from_model(comment, Some(user.nickname)))
    }

    pub async fn update_comment(
        &self,
        comment_id: i64,
        user_id: i64,
        request: CommentRequest,
    ) -> AppResult<CommentResponse> {
        let comment = comments::Entity::find_by_id(comment_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Comment not found".to_string()))?;

        if comment.user_id != user_id {
            return Err(AppError::Forbidden);
        }
        if request.content.trim().is_empty() {
            return Err(AppError::ValidationError(
                "Comment content must not be empty".to_string(),
            ));
        }

        let mut am = comment.into_active_model();
        am.content = Set(request.content);
        am.updated_at = Set(Some(Utc::now()));
        let updated = am.update(&self.pool).await?;

        let user = users::Entity::find_by_id(user_id).one(&self.pool).await?;
        Ok(CommentResponse::from_model(
            updated,
            user.map(|u| u.nickname),
        ))
    }

    /// 删除评论（仅作者）。回复先解除父子关系再删，保证楼中楼存活。
    pub async fn delete_comment(&self, comment_id: i64, user_id: i64) -> AppResult<()> {
        let comment = comments::Entity::find_by_id(comment_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Comment not found".to_string()))?;

        if comment.user_id != user_id {
            return Err(AppError::Forbidden);
        }

        // 子回复的 parent 指针断开，使其成为独立楼层
        comments::Entity::update_many()
            .col_expr(
                comments::Column::ParentId,
                sea_orm::sea_query::Expr::value(sea_orm::Value::BigInt(None)),
            )
            .filter(comments::Column::ParentId.eq(comment_id))
            .exec(&self.pool)
            .await?;

        comments::Entity::delete_by_id(comment_id)
            .exec(&self.pool)
            .await?;
        Ok(())
    }

    pub async fn get_comments_by_user(&self, user_id: i64) -> AppResult<Vec<CommentResponse>> {
        let user = users::Entity::find_by_id(user_id).one(&self.pool).await?;
        if user.is_none() {
            return Err(AppError::NotFound("User not found".to_string()));
        }

        let models = comments::Entity::find()
            .filter(comments::Column::UserId.eq(user_id))
            .order_by_desc(comments::Column::CreatedAt)
            .all(&self.pool)
            .await?;
        self.to_responses(models).await
    }

    async fn to_responses(&self, models: Vec<comments::Model>) -> AppResult<Vec<CommentResponse>> {
        if models.is_empty() {
            return Ok(vec![]);
        }

        let user_ids: HashSet<i64> = models.iter().map(|c| c.user_id).collect();
        let nickname_by_id: HashMap<i64, String> = users::Entity::find()
            .filter(users::Column::Id.is_in(user_ids))
            .all(&self.pool)
            .await?
            .into_iter()
            .map(|u| (u.id, u.nickname))
            .collect();

        Ok(models
            .into_iter()
            .map(|comment| {
                let nickname = nickname_by_id.get(&comment.user_id).cloned();
                CommentResponse::from_model(comment, nickname)
            })
            .collect())
    }
}
