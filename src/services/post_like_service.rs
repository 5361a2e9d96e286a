use crate::entities::{post_entity as posts, post_like_entity as post_likes, user_entity as users};
use crate::error::{AppError, AppResult};
use crate::models::LikeResponse;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, ModelTrait,
    QueryFilter, Set, TransactionTrait,
};

#[derive(Clone)]
pub struct PostLikeService {
    pool: DatabaseConnection,
}

impl PostLikeService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    /// 点赞。重复点赞不报错，返回当前状态。
    pub async fn add_like(&self, user_id: i64, post_id: i64) -> AppResult<LikeResponse> {
        let post = posts::Entity::find_by_id(post_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Post not found".to_string()))?;
        let user = users::Entity::find_by_id(user_id).one(&self.pool).await?;
        if user.is_none() {
            return Err(AppError::NotFound("User not found".to_string()));
        }

        let existing = post_likes::Entity::find()
            .filter(post_likes::Column::UserId.eq(user_id))
            .filter(post_likes::Column::PostId.eq(post_id))
            .one(&self.pool)
            .await?;
        if existing.is_some() {
            return Ok(LikeResponse {
                post_id,
                like_count: post.like_count as i64,
                liked: true,
            });
        }

        let txn = self.pool.begin().await?;

        post_likes::ActiveModel {
            post_id: Set(post_id),
            user_id: Set(user_id),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        let like_count = post.like_count + 1;
        let mut am = post.into_active_model();
        am.like_count = Set(like_count);
        am.update(&txn).await?;

        txn.commit().await?;

        Ok(LikeResponse {
            post_id,
            like_count: like_count as i64,
            liked: true,
        })
    }

    pub async fn delete_like(&self, user_id: i64, post_id: i64) -> AppResult<LikeResponse> {
        let post = posts::Entity::find_by_id(post_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Post not found".to_string()))?;
        let user = users::Entity::find_by_id(user_id).one(&self.pool).await?;
        if user.is_none() {
            return Err(AppError::NotFound("User not found".to_string()));
        }

        let like = post_likes::Entity::find()
            .filter(post_likes::Column::UserId.eq(user_id))
            .filter(post_likes::Column::PostId.eq(post_id))
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Like not found".to_string()))?;

        let txn = self.pool.begin().await?;

        like.delete(&txn).await?;

        // 计数不为负
        let like_count = (post.like_count - 1).max(0);
        let mut am = post.into_active_model();
        am.like_count = Set(like_count);
        am.update(&txn).await?;

        txn.commit().await?;

        Ok(LikeResponse {
            post_id,
            like_count: like_count as i64,
            liked: false,
        })
    }

    pub async fn check_like(&self, user_id: i64, post_id: i64) -> AppResult<LikeResponse> {
        let post = posts::Entity::find_by_id(post_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Post not found".to_string()))?;
        let user = users::Entity::find_by_id(user_id).one(&self.pool).await?;
        if user.is_none() {
            return Err(AppError::NotFound("User not found".to_string()));
        }

        let liked = post_likes::Entity::find()
            .filter(post_likes::Column::UserId.eq(user_id))
            .filter(post_likes::Column::PostId.eq(post_id))
            .one(&self.pool)
            .await?
            .is_some();

        Ok(LikeResponse {
            post_id,
            like_count: post.like_count as i64,
            liked,
        })
    }
}
