use crate::entities::{point_histories, point_items};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PointHistoryResponse {
    pub history_id: i64,
    pub point_change: i32,
    #[serde(rename = "type")]
    pub history_type: String,
    pub created_at: Option<DateTime<Utc>>,
}

impl From<point_histories::Model> for PointHistoryResponse {
    fn from(history: point_histories::Model) -> Self {
        Self {
            history_id: history.id,
            point_change: history.point_change,
            history_type: history.history_type,
            created_at: history.created_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PointItemResponse {
    pub item_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub price: i32,
    pub image_url: Option<String>,
    pub code: Option<String>,
}

impl From<point_items::Model> for PointItemResponse {
    fn from(item: point_items::Model) -> Self {
        Self {
            item_id: item.id,
            name: item.name,
            description: item.description,
            price: item.price,
            image_url: item.image_url,
            code: item.code,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PurchaseRequest {
    pub item_id: i64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PurchaseResultResponse {
    pub item_name: String,
    pub item_price: i32,
    pub remaining_point: i32,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PurchasedItemResponse {
    pub item_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub price: i32,
    pub image_url: Option<String>,
    pub code: Option<String>,
    pub purchased_at: Option<DateTime<Utc>>,
}
