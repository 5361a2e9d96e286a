use crate::entities::categories::{
    FREE_CATEGORY_NAME, INFO_CATEGORY_NAME, NOTICE_CATEGORY_NAME, VERIFICATION_CATEGORY_NAME,
};
use crate::entities::{
    category_entity as categories, comment_entity as comments, follow_entity as follows,
    post_entity as posts, post_like_entity as post_likes, report_entity as reports,
    user_entity as users, verification_entity as verifications,
};
use crate::error::{AppError, AppResult};
use crate::events::{PostCreatedEvent, PostEventSender};
use crate::models::{
    PaginatedResponse, PaginationParams, PostCreateRequest, PostListQuery, PostPatchRequest,
    PostResponse, PostSearchQuery, encode_image_urls,
};
use crate::services::VerificationService;
use crate::utils::today_range;
use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, IntoActiveModel,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Select, Set, TransactionTrait, Value,
};
use std::collections::{HashMap, HashSet};

/// 信息/自由板块每人每日发帖上限
const DAILY_POST_LIMIT: i64 = 10;

#[derive(Clone)]
pub struct PostService {
    pool: DatabaseConnection,
    verification_service: VerificationService,
    post_events: PostEventSender,
}

impl PostService {
    pub fn new(
        pool: DatabaseConnection,
        verification_service: VerificationService,
        post_events: PostEventSender,
    ) -> Self {
        Self {
            pool,
            verification_service,
            post_events,
        }
    }

    /// 发帖。按板块做当日限额/权限/图片校验；认证板块同事务建认证申请；
    /// 提交后投递积分事件（尽力而为，见 events 模块）。
    pub async fn create_post(
        &self,
        category_id: i64,
        user_id: i64,
        request: PostCreateRequest,
    ) -> AppResult<PostResponse> {
        let category = categories::Entity::find_by_id(category_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Category not found".to_string()))?;

        let user = users::Entity::find_by_id(user_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        validate_post_text(&request.title, &request.content)?;

        match category.category_name.as_str() {
            VERIFICATION_CATEGORY_NAME => {
                // 认证板块每天只能提交一次
                if self.count_posts_today(user_id, category.id).await? > 0 {
                    return Err(AppError::Conflict(
                        "Verification post already submitted today".to_string(),
                    ));
                }
            }
            INFO_CATEGORY_NAME | FREE_CATEGORY_NAME => {
                if self.count_posts_today(user_id, category.id).await? >= DAILY_POST_LIMIT {
                    return Err(AppError::ValidationError(
                        "Daily post limit exceeded".to_string(),
                    ));
                }
            }
            NOTICE_CATEGORY_NAME => {
                if !user.role.is_admin() {
                    return Err(AppError::Forbidden);
                }
            }
            _ => {}
        }

        let image_urls: Vec<String> = request
            .image_urls
            .unwrap_or_default()
            .into_iter()
            .filter(|url| !url.trim().is_empty())
            .collect();

        let is_verification = category.category_name == VERIFICATION_CATEGORY_NAME;
        if is_verification && image_urls.is_empty() {
            return Err(AppError::ValidationError(
                "Verification posts require an image".to_string(),
            ));
        }

        let txn = self.pool.begin().await?;

        let post = posts::ActiveModel {
            user_id: Set(user_id),
            category_id: Set(category.id),
            title: Set(request.title),
            content: Set(request.content),
            image_urls: Set(encode_image_urls(&image_urls)),
            view_count: Set(0),
            like_count: Set(0),
            verification_image_url: Set(is_verification
                .then(|| image_urls.first().cloned())
                .flatten()),
            detox_time: Set(request.detox_time),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        if is_verification {
            self.verification_service
                .create_verification(&txn, user_id, post.id, post.detox_time)
                .await?;
        }

        txn.commit().await?;

        // 事务已提交，投递发帖事件；通道关闭只记日志
        if self
            .post_events
            .send(PostCreatedEvent { post_id: post.id })
            .is_err()
        {
            log::warn!(
                "Post event channel closed; point accrual skipped for post {}",
                post.id
            );
        }

        let mut response =
            PostResponse::from_model(post, Some(category.category_name), Some(user.nickname));
        if is_verification {
            response.status = Some("PENDING".to_string());
        }
        Ok(response)
    }

    pub async fn get_categories(&self) -> AppResult<Vec<crate::models::CategoryResponse>> {
        let models = categories::Entity::find()
            .order_by_asc(categories::Column::Id)
            .all(&self.pool)
            .await?;
        Ok(models
            .into_iter()
            .map(|c| crate::models::CategoryResponse {
                id: c.id,
                category_name: c.category_name,
            })
            .collect())
    }

    /// 帖子详情；读取即计一次浏览
    pub async fn get_post(&self, post_id: i64) -> AppResult<PostResponse> {
        let post = posts::Entity::find_by_id(post_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Post not found".to_string()))?;

        let view_count = post.view_count + 1;
        let mut am = post.into_active_model();
        am.view_count = Set(view_count);
        let post = am.update(&self.pool).await?;

        let mut responses = self.to_responses(vec![post]).await?;
        Ok(responses.remove(0))
    }

    pub async fn get_posts_page(
        &self,
        query: &PostListQuery,
    ) -> AppResult<PaginatedResponse<PostResponse>> {
        let params = PaginationParams::new(query.page, query.page_size);

        let total = posts::Entity::find().count(&self.pool).await? as i64;
        let models = apply_sort(
            posts::Entity::find(),
            query.sort.as_deref(),
            query.direction.as_deref(),
        )
        .offset(params.get_offset() as u64)
        .limit(params.get_limit() as u64)
        .all(&self.pool)
        .await?;

        let items = self.to_responses(models).await?;
        Ok(PaginatedResponse::new(
            items,
            params.get_page(),
            params.get_page_size(),
            total,
        ))
    }

    pub async fn get_posts_by_category_page(
        &self,
        category_id: i64,
        query: &PostListQuery,
    ) -> AppResult<PaginatedResponse<PostResponse>> {
        let category = categories::Entity::find_by_id(category_id)
            .one(&self.pool)
            .await?;
        if category.is_none() {
            return Err(AppError::NotFound("Category not found".to_string()));
        }

        let params = PaginationParams::new(query.page, query.page_size);
        let filter = posts::Column::CategoryId.eq(category_id);

        let total = posts::Entity::find()
            .filter(filter.clone())
            .count(&self.pool)
            .await? as i64;
        let models = apply_sort(
            posts::Entity::find().filter(filter),
            query.sort.as_deref(),
            query.direction.as_deref(),
        )
        .offset(params.get_offset() as u64)
        .limit(params.get_limit() as u64)
        .all(&self.pool)
        .await?;

        let items = self.to_responses(models).await?;
        Ok(PaginatedResponse::new(
            items,
            params.get_page(),
            params.get_page_size(),
            total,
        ))
    }

    /// 关注对象的帖子流
    pub async fn get_posts_by_following_page(
        &self,
        user_id: i64,
        params: &PaginationParams,
    ) -> AppResult<PaginatedResponse<PostResponse>> {
        let user = users::Entity::find_by_id(user_id).one(&self.pool).await?;
        if user.is_none() {
            return Err(AppError::NotFound("User not found".to_string()));
        }

        let following_ids: Vec<i64> = follows::Entity::find()
            .filter(follows::Column::FollowerId.eq(user_id))
            .all(&self.pool)
            .await?
            .into_iter()
            .map(|f| f.following_id)
            .collect();

        if following_ids.is_empty() {
            return Ok(PaginatedResponse::new(
                vec![],
                params.get_page(),
                params.get_page_size(),
                0,
            ));
        }

        let filter = posts::Column::UserId.is_in(following_ids);
        let total = posts::Entity::find()
            .filter(filter.clone())
            .count(&self.pool)
            .await? as i64;
        let models = posts::Entity::find()
            .filter(filter)
            .order_by_desc(posts::Column::CreatedAt)
            .offset(params.get_offset() as u64)
            .limit(params.get_limit() as u64)
            .all(&self.pool)
            .await?;

        let items = self.to_responses(models).await?;
        Ok(PaginatedResponse::new(
            items,
            params.get_page(),
            params.get_page_size(),
            total,
        ))
    }

    /// 某用户的帖子列表（个人主页用）
    pub async fn get_posts_by_user(&self, user_id: i64) -> AppResult<Vec<PostResponse>> {
        let user = users::Entity::find_by_id(user_id).one(&self.pool).await?;
        if user.is_none() {
            return Err(AppError::NotFound("User not found".to_string()));
        }

        let models = posts::Entity::find()
            .filter(posts::Column::UserId.eq(user_id))
            .order_by_desc(posts::Column::CreatedAt)
            .all(&self.pool)
            .await?;
        self.to_responses(models).await
    }

    /// 搜索：type 取 title/content/author，缺省标题+正文模糊匹配
    pub async fn search_posts_page(
        &self,
        query: &PostSearchQuery,
    ) -> AppResult<PaginatedResponse<PostResponse>> {
        let params = PaginationParams::new(query.page, query.page_size);
        let keyword = query.keyword.trim();
        if keyword.is_empty() {
            return Err(AppError::ValidationError(
                "Search keyword must not be empty".to_string(),
            ));
        }

        let condition = match query.search_type.as_deref() {
            Some("title") => Condition::all().add(posts::Column::Title.contains(keyword)),
            Some("content") => Condition::all().add(posts::Column::Content.contains(keyword)),
            Some("author") => {
                let author_ids: Vec<i64> = users::Entity::find()
                    .filter(users::Column::Nickname.contains(keyword))
                    .all(&self.pool)
                    .await?
                    .into_iter()
                    .map(|u| u.id)
                    .collect();
                if author_ids.is_empty() {
                    return Ok(PaginatedResponse::new(
                        vec![],
                        params.get_page(),
                        params.get_page_size(),
                        0,
                    ));
                }
                Condition::all().add(posts::Column::UserId.is_in(author_ids))
            }
            _ => Condition::any()
                .add(posts::Column::Title.contains(keyword))
                .add(posts::Column::Content.contains(keyword)),
        };

        let total = posts::Entity::find()
            .filter(condition.clone())
            .count(&self.pool)
            .await? as i64;
        let models = posts::Entity::find()
            .filter(condition)
            .order_by_desc(posts::Column::CreatedAt)
            .offset(params.get_offset() as u64)
            .limit(params.get_limit() as u64)
            .all(&self.pool)
            .await?;

        let items = self.to_responses(models).await?;
        Ok(PaginatedResponse::new(
            items,
            params.get_page(),
            params.get_page_size(),
            total,
        ))
    }

    /// 修改帖子（作者或管理员），字段部分更新
    pub async fn update_post(
        &self,
        post_id: i64,
        user_id: i64,
        request: PostPatchRequest,
    ) -> AppResult<PostResponse> {
        let post = posts::Entity::find_by_id(post_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Post not found".to_string()))?;

        let acting_user = users::Entity::find_by_id(user_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        if post.user_id != user_id && !acting_user.role.is_admin() {
            return Err(AppError::Forbidden);
        }

        let mut am = post.into_active_model();
        if let Some(title) = request.title {
            am.title = Set(title);
        }
        if let Some(content) = request.content {
            am.content = Set(content);
        }
        if let Some(urls) = request.image_urls {
            let urls: Vec<String> = urls
                .into_iter()
                .filter(|url| !url.trim().is_empty())
                .collect();
            am.image_urls = Set(encode_image_urls(&urls));
        }
        am.updated_at = Set(Some(Utc::now()));
        let updated = am.update(&self.pool).await?;

        let mut responses = self.to_responses(vec![updated]).await?;
        Ok(responses.remove(0))
    }

    /// 删帖（作者或管理员）。同事务清理点赞/评论/认证，举报仅解除帖子关联。
    pub async fn delete_post(&self, post_id: i64, user_id: i64) -> AppResult<()> {
        let post = posts::Entity::find_by_id(post_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Post not found".to_string()))?;

        let acting_user = users::Entity::find_by_id(user_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        if post.user_id != user_id && !acting_user.role.is_admin() {
            return Err(AppError::Forbidden);
        }

        let txn = self.pool.begin().await?;

        reports::Entity::update_many()
            .col_expr(reports::Column::PostId, Expr::value(Value::BigInt(None)))
            .filter(reports::Column::PostId.eq(post_id))
            .exec(&txn)
            .await?;
        verifications::Entity::delete_many()
            .filter(verifications::Column::PostId.eq(post_id))
            .exec(&txn)
            .await?;
        comments::Entity::delete_many()
            .filter(comments::Column::PostId.eq(post_id))
            .exec(&txn)
            .await?;
        post_likes::Entity::delete_many()
            .filter(post_likes::Column::PostId.eq(post_id))
            .exec(&txn)
            .await?;
        posts::Entity::delete_by_id(post_id).exec(&txn).await?;

        txn.commit().await?;
        Ok(())
    }

    async fn count_posts_today(&self, user_id: i64, category_id: i64) -> AppResult<i64> {
        let (start, end) = today_range();
        let count = posts::Entity::find()
            .filter(posts::Column::UserId.eq(user_id))
            .filter(posts::Column::CategoryId.eq(category_id))
            .filter(posts::Column::CreatedAt.between(start, end))
            .count(&self.pool)
            .await?;
        Ok(count as i64)
    }

    // 批量补齐作者昵称、板块名与认证状态
    async fn to_responses(&self, models: Vec<posts::Model>) -> AppResult<Vec<PostResponse>> {
        if models.is_empty() {
            return Ok(vec![]);
        }

        let user_ids: HashSet<i64> = models.iter().map(|p| p.user_id).collect();
        let category_ids: HashSet<i64> = models.iter().map(|p| p.category_id).collect();

        let nickname_by_id: HashMap<i64, String> = users::Entity::find()
            .filter(users::Column::Id.is_in(user_ids))
            .all(&self.pool)
            .await?
            .into_iter()
            .map(|u| (u.id, u.nickname))
            .collect();

        let category_by_id: HashMap<i64, String> = categories::Entity::find()
            .filter(categories::Column::Id.is_in(category_ids))
            .all(&self.pool)
            .await?
            .into_iter()
            .map(|c| (c.id, c.category_name))
            .collect();

        // 认证板块帖子附带审核状态；认证记录缺失时按 PENDING 展示
        let verification_post_ids: Vec<i64> = models
            .iter()
            .filter(|p| {
                category_by_id
                    .get(&p.category_id)
                    .is_some_and(|name| name == VERIFICATION_CATEGORY_NAME)
            })
            .map(|p| p.id)
            .collect();

        let status_by_post_id: HashMap<i64, String> = if verification_post_ids.is_empty() {
            HashMap::new()
        } else {
            verifications::Entity::find()
                .filter(verifications::Column::PostId.is_in(verification_post_ids))
                .all(&self.pool)
                .await?
                .into_iter()
                .map(|v| (v.post_id, v.status.as_str().to_string()))
                .collect()
        };

        Ok(models
            .into_iter()
            .map(|post| {
                let category_name = category_by_id.get(&post.category_id).cloned();
                let author_nickname = nickname_by_id.get(&post.user_id).cloned();
                let is_verification =
                    category_name.as_deref() == Some(VERIFICATION_CATEGORY_NAME);
                let post_id = post.id;
                let mut response = PostResponse::from_model(post, category_name, author_nickname);
                if is_verification {
                    response.status = Some(
                        status_by_post_id
                            .get(&post_id)
                            .cloned()
                            .unwrap_or_else(|| "PENDING".to_string()),
                    );
                }
                response
            })
            .collect())
    }
}

fn validate_post_text(title: &str, content: &str) -> AppResult<()> {
    if title.trim().is_empty() || title.chars().count() > 100 {
        return Err(AppError::ValidationError(
            "Title must be between 1 and 100 characters".to_string(),
        ));
    }
    if content.trim().is_empty() || content.chars().count() > 2000 {
        return Err(AppError::ValidationError(
            "Content must be between 1 and 2000 characters".to_string(),
        ));
    }
    Ok(())
}

fn apply_sort(
    query: Select<posts::Entity>,
    sort: Option<&str>,
    direction: Option<&str>,
) -> Select<posts::Entity> {
    let ascending = matches!(direction, Some("asc") | Some("ASC"));
    match sort {
        // 点赞数排序以 id 作第二序，分页顺序稳定
        Some("likeCount") => {
            let query = if ascending {
                query.order_by_asc(posts::Column::LikeCount)
            } else {
                query.order_by_desc(posts::Column::LikeCount)
            };
            query.order_by_asc(posts::Column::Id)
        }
        _ => {
            if ascending {
                query.order_by_asc(posts::Column::CreatedAt)
            } else {
                query.order_by_desc(posts::Column::CreatedAt)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_post_text() {
        assert!(validate_post_text("제목", "본문").is_ok());
        assert!(validate_post_text("", "본문").is_err());
        assert!(validate_post_text("제목", " ").is_err());
        assert!(validate_post_text(&"가".repeat(101), "본문").is_err());
        assert!(validate_post_text("제목", &"가".repeat(2001)).is_err());
    }
}
