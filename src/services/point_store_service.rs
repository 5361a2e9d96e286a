use crate::entities::{
    point_history_entity as point_histories, point_item_entity as point_items,
    point_item_purchase_entity as purchases, user_entity as users,
};
use crate::error::{AppError, AppResult};
use crate::models::{PointItemResponse, PurchaseResultResponse, PurchasedItemResponse};
use crate::services::point_service::POINT_TYPE_SPEND;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryFilter,
    QueryOrder, QuerySelect, Set, TransactionTrait,
};
use std::collections::HashMap;

#[derive(Clone)]
pub struct PointStoreService {
    pool: DatabaseConnection,
}

impl PointStoreService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    pub async fn get_items(&self) -> AppResult<Vec<PointItemResponse>> {
        let models = point_items::Entity::find()
            .order_by_asc(point_items::Column::Id)
            .all(&self.pool)
            .await?;
        Ok(models.into_iter().map(PointItemResponse::from).collect())
    }

    /// 购买商品：同一商品每人限购一次，只扣可用积分（totalPoint 不动），
    /// 扣款与负向流水同事务落库。
    pub async fn purchase_item(
        &self,
        user_id: i64,
        item_id: i64,
    ) -> AppResult<PurchaseResultResponse> {
        let item = point_items::Entity::find_by_id(item_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Item not found".to_string()))?;

        let txn = self.pool.begin().await?;

        // 与积分结算同一套行锁策略，避免并发下扣出负余额
        let user = users::Entity::find_by_id(user_id)
            .lock_exclusive()
            .one(&txn)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        let already_owned = purchases::Entity::find()
            .filter(purchases::Column::UserId.eq(user_id))
            .filter(purchases::Column::ItemId.eq(item_id))
            .one(&txn)
            .await?
            .is_some();
        if already_owned {
            return Err(AppError::Conflict("Item already purchased".to_string()));
        }

        if user.remaining_point < item.price {
            return Err(AppError::ValidationError(
                "Not enough points".to_string(),
            ));
        }

        let remaining_point = user.remaining_point - item.price;
        let mut am = user.into_active_model();
        am.remaining_point = Set(remaining_point);
        am.update(&txn).await?;

        purchases::ActiveModel {
            user_id: Set(user_id),
            item_id: Set(item_id),
            purchased_at: Set(Some(Utc::now())),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        point_histories::ActiveModel {
            user_id: Set(user_id),
            point_change: Set(-item.price),
            history_type: Set(POINT_TYPE_SPEND.to_string()),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        txn.commit().await?;

        Ok(PurchaseResultResponse {
            item_name: item.name,
            item_price: item.price,
            remaining_point,
        })
    }

    /// 已购商品列表
    pub async fn get_my_purchases(&self, user_id: i64) -> AppResult<Vec<PurchasedItemResponse>> {
        let purchase_models = purchases::Entity::find()
            .filter(purchases::Column::UserId.eq(user_id))
            .order_by_desc(purchases::Column::PurchasedAt)
            .all(&self.pool)
            .await?;

        if purchase_models.is_empty() {
            return Ok(vec![]);
        }

        let item_ids: Vec<i64> = purchase_models.iter().map(|p| p.item_id).collect();
        let item_by_id: HashMap<i64, point_items::Model> = point_items::Entity::find()
            .filter(point_items::Column::Id.is_in(item_ids))
            .all(&self.pool)
            .await?
            .into_iter()
            .map(|item| (item.id, item))
            .collect();

        Ok(purchase_models
            .into_iter()
            .filter_map(|purchase| {
                item_by_id.get(&purchase.item_id).map(|item| PurchasedItemResponse {
                    item_id: item.id,
                    name: item.name.clone(),
                    description: item.description.clone(),
                    price: item.price,
                    image_url: item.image_url.clone(),
                    code: item.code.clone(),
                    purchased_at: purchase.purchased_at,
                })
            })
            .collect())
    }
}
