use crate::{
    abstract_trait::order::OrderCommandRepositoryTrait,
    domain::requests::order::CreateOrderRecord, model::order::Order as OrderModel,
};
use async_trait::async_trait;
use shared::{config::ConnectionPool, errors::RepositoryError};
use sqlx::types::Json;
use tracing::{error, info};

#[derive(Clone)]
pub struct OrderCommandRepository {
    db: ConnectionPool,
}

impl OrderCommandRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl OrderCommandRepositoryTrait for OrderCommandRepository {
    async fn record_checkout(
        &self,
        record: &CreateOrderRecord,
    ) -> Result<OrderModel, RepositoryError> {
        info!(
            "💳 Recording order {} with {} items",
            record.order_id,
            record.items.len()
        );

        let mut tx = self.db.begin().await.map_err(|e| {
            error!("❌ Failed to begin transaction: {:?}", e);
            RepositoryError::from(e)
        })?;

        let order = sqlx::query_as::<_, OrderModel>(
            r#"
            INSERT INTO orders (order_id, session_id, user_id, items, total_amount, status, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, CURRENT_TIMESTAMP)
            RETURNING id, order_id, session_id, user_id, items, total_amount, status, created_at
            "#,
        )
        .bind(&record.order_id)
        .bind(&record.session_id)
        .bind(record.user_id)
        .bind(Json(&record.items))
        .bind(record.total_amount)
        .bind(record.status.as_str())
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            error!("❌ Failed to insert order: {:?}", e);
            RepositoryError::from_constraint(e)
        })?;

        let cleared = sqlx::query("DELETE FROM cart_items WHERE session_id = $1")
            .bind(&record.session_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                error!("❌ Failed to clear cart: {:?}", e);
                RepositoryError::from(e)
            })?;

        tx.commit().await.map_err(|e| {
            error!("❌ Failed to commit checkout: {:?}", e);
            RepositoryError::from(e)
        })?;

        info!(
            "🛒 Cart cleared after purchase ({} lines)",
            cleared.rows_affected()
        );

        Ok(order)
    }
}
