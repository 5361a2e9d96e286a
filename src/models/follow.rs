use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct FollowRequest {
    pub following_id: i64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct FollowResponse {
    pub id: i64,
    pub follower_id: i64,
    pub following_id: i64,
    pub follower_nickname: Option<String>,
    pub following_nickname: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct FollowStatusResponse {
    pub following: bool,
}
