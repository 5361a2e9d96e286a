use crate::entities::{follow_entity as follows, user_entity as users};
use crate::error::{AppError, AppResult};
use crate::models::FollowResponse;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryFilter, Set,
};
use std::collections::{HashMap, HashSet};

#[derive(Clone)]
pub struct FollowService {
    pool: DatabaseConnection,
}

impl FollowService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    pub async fn follow(&self, follower_id: i64, following_id: i64) -> AppResult<FollowResponse> {
        if follower_id == following_id {
            return Err(AppError::ValidationError(
                "Cannot follow yourself".to_string(),
            ));
        }

        let follower = users::Entity::find_by_id(follower_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;
        let following = users::Entity::find_by_id(following_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        let existing = follows::Entity::find()
            .filter(follows::Column::FollowerId.eq(follower_id))
            .filter(follows::Column::FollowingId.eq(following_id))
            .one(&self.pool)
            .await?;
        if existing.is_some() {
            return Err(AppError::Conflict("Already following".to_string()));
        }

        let follow = follows::ActiveModel {
            follower_id: Set(follower_id),
            following_id: Set(following_id),
            ..Default::default()
        }
        .insert(&self.pool)
        .await?;

        Ok(FollowResponse {
            id: follow.id,
            follower_id,
            following_id,
            follower_nickname: Some(follower.nickname),
            following_nickname: Some(following.nickname),
        })
    }

    pub async fn unfollow(&self, follower_id: i64, following_id: i64) -> AppResult<()> {
        let follow = follows::Entity::find()
            .filter(follows::Column::FollowerId.eq(follower_id))
            .filter(follows::Column::FollowingId.eq(following_id))
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Follow relation not found".to_string()))?;

        follow.delete(&self.pool).await?;
        Ok(())
    }

    pub async fn is_following(&self, follower_id: i64, following_id: i64) -> AppResult<bool> {
        let existing = follows::Entity::find()
            .filter(follows::Column::FollowerId.eq(follower_id))
            .filter(follows::Column::FollowingId.eq(following_id))
            .one(&self.pool)
            .await?;
        Ok(existing.is_some())
    }

    /// 粉丝列表（关注我的人）
    pub async fn get_followers(&self, user_id: i64) -> AppResult<Vec<FollowResponse>> {
        let user = users::Entity::find_by_id(user_id).one(&self.pool).await?;
        if user.is_none() {
            return Err(AppError::NotFound("User not found".to_string()));
        }

        let models = follows::Entity::find()
            .filter(follows::Column::FollowingId.eq(user_id))
            .all(&self.pool)
            .await?;
        self.to_responses(models).await
    }

    /// 关注列表（我关注的人）
    pub async fn get_followings(&self, user_id: i64) -> AppResult<Vec<FollowResponse>> {
        let user = users::Entity::find_by_id(user_id).one(&self.pool).await?;
        if user.is_none() {
            return Err(AppError::NotFound("User not found".to_string()));
        }

        let models = follows::Entity::find()
            .filter(follows::Column::FollowerId.eq(user_id))
            .all(&self.pool)
            .await?;
        self.to_responses(models).await
    }

    async fn to_responses(&self, models: Vec<follows::Model>) -> AppResult<Vec<FollowResponse>> {
        if models.is_empty() {
            return Ok(vec![]);
        }

        let user_ids: HashSet<i64> = models
            .iter()
            .flat_map(|f| [f.follower_id, f.following_id])
            .collect();
        let nickname_by_id: HashMap<i64, String> = users::Entity::find()
            .filter(users::Column::Id.is_in(user_ids))
            .all(&self.pool)
            .await?
            .into_iter()
            .map(|u| (u.id, u.nickname))
            .collect();

        Ok(models
            .into_iter()
            .map(|f| FollowResponse {
                id: f.id,
                follower_id: f.follower_id,
                following_id: f.following_id,
                follower_nickname: nickname_by_id.get(&f.follower_id).cloned(),
                following_nickname: nickname_by_id.get(&f.following_id).cloned(),
            })
            .collect())
    }
}
