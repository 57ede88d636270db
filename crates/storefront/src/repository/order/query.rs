use crate::{abstract_trait::order::OrderQueryRepositoryTrait, model::order::Order as OrderModel};
use async_trait::async_trait;
use shared::{config::ConnectionPool, errors::RepositoryError};
use tracing::{error, info};

#[derive(Clone)]
pub struct OrderQueryRepository {
    db: ConnectionPool,
}

impl OrderQueryRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl OrderQueryRepositoryTrait for OrderQueryRepository {
    async fn find_by_session(&self, session_id: &str) -> Result<Vec<OrderModel>, RepositoryError> {
        info!("📦 Fetching orders for session");

        let mut conn = self.db.acquire().await.map_err(|e| {
            error!("❌ Failed to acquire DB connection: {:?}", e);
            RepositoryError::from(e)
        })?;

        let orders = sqlx::query_as::<_, OrderModel>(
            r#"
            SELECT id, order_id, session_id, user_id, items, total_amount, status, created_at
            FROM orders
            WHERE session_id = $1
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .bind(session_id)
        .fetch_all(&mut *conn)
        .await
        .map_err(|e| {
            error!("❌ Failed to fetch orders: {:?}", e);
            RepositoryError::from(e)
        })?;

        Ok(orders)
    }

    async fn find_by_order_id(
        &self,
        session_id: &str,
        order_id: &str,
    ) -> Result<Option<OrderModel>, RepositoryError> {
        info!("🆔 Fetching order {order_id}");

        let mut conn = self.db.acquire().await.map_err(|e| {
            error!("❌ Failed to acquire DB connection: {:?}", e);
            RepositoryError::from(e)
        })?;

        let order = sqlx::query_as::<_, OrderModel>(
            r#"
            SELECT id, order_id, session_id, user_id, items, total_amount, status, created_at
            FROM orders
            WHERE order_id = $1 AND session_id = $2
            "#,
        )
        .bind(order_id)
        .bind(session_id)
        .fetch_optional(&mut *conn)
        .await
        .map_err(|e| {
            error!("❌ Failed to fetch order {order_id}: {:?}", e);
            RepositoryError::from(e)
        })?;

        Ok(order)
    }
}
