use crate::entities::posts;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PostCreateRequest {
    pub title: String,
    pub content: String,
    pub image_urls: Option<Vec<String>>,
    /// 认证板块必填：戒断时长（小时）
    pub detox_time: Option<i32>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PostPatchRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    pub image_urls: Option<Vec<String>>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PostResponse {
    pub id: i64,
    pub user_id: i64,
    pub author_nickname: Option<String>,
    pub category_id: i64,
    pub category_name: Option<String>,
    pub title: String,
    pub content: String,
    pub image_urls: Vec<String>,
    pub view_count: i32,
    pub like_count: i32,
    pub verification_image_url: Option<String>,
    pub detox_time: Option<i32>,
    /// 认证板块帖子的审核状态
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl PostResponse {
    pub fn from_model(
        post: posts::Model,
        category_name: Option<String>,
        author_nickname: Option<String>,
    ) -> Self {
        let image_urls = decode_image_urls(post.image_urls.as_deref());
        Self {
            id: post.id,
            user_id: post.user_id,
            author_nickname,
            category_id: post.category_id,
            category_name,
            title: post.title,
            content: post.content,
            image_urls,
            view_count: post.view_count,
            like_count: post.like_count,
            verification_image_url: post.verification_image_url,
            detox_time: post.detox_time,
            status: None,
            created_at: post.created_at,
            updated_at: post.updated_at,
        }
    }
}

/// image_urls 列存 JSON 数组文本，坏数据按空列表处理
pub fn decode_image_urls(raw: Option<&str>) -> Vec<String> {
    raw.and_then(|s| serde_json::from_str::<Vec<String>>(s).ok())
        .unwrap_or_default()
}

pub fn encode_image_urls(urls: &[String]) -> Option<String> {
    if urls.is_empty() {
        None
    } else {
        serde_json::to_string(urls).ok()
    }
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct PostListQuery {
    pub page: Option<i64>,
    pub page_size: Option<i64>,
    /// createdAt | likeCount
    pub sort: Option<String>,
    /// asc | desc
    pub direction: Option<String>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct PostSearchQuery {
    /// title | content | author
    #[serde(rename = "type")]
    pub search_type: Option<String>,
    pub keyword: String,
    pub page: Option<i64>,
    pub page_size: Option<i64>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CategoryResponse {
    pub id: i64,
    pub category_name: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LikeResponse {
    pub post_id: i64,
    pub like_count: i64,
    pub liked: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_urls_round_trip() {
        let urls = vec!["https://a/1.png".to_string(), "https://a/2.gif".to_string()];
        let encoded = encode_image_urls(&urls).unwrap();
        assert_eq!(decode_image_urls(Some(encoded.as_str())), urls);
    }

    #[test]
    fn test_image_urls_empty_and_garbage() {
        assert!(encode_image_urls(&[]).is_none());
        assert!(decode_image_urls(None).is_empty());
        assert!(decode_image_urls(Some("not-json")).is_empty());
    }
}
