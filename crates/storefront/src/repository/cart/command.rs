use crate::{abstract_trait::cart::CartCommandRepositoryTrait, model::cart_item::CartItem};
use async_trait::async_trait;
use shared::{config::ConnectionPool, errors::RepositoryError};
use tracing::{error, info};

#[derive(Clone)]
pub struct CartCommandRepository {
    db: ConnectionPool,
}

impl CartCommandRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CartCommandRepositoryTrait for CartCommandRepository {
    async fn add_quantity(
        &self,
        session_id: &str,
        product_id: &str,
        quantity: i32,
    ) -> Result<CartItem, RepositoryError> {
        info!("➕ Adding {quantity} of product {product_id} to cart");

        let mut conn = self.db.acquire().await.map_err(|e| {
            error!("❌ Failed to acquire DB connection: {:?}", e);
            RepositoryError::from(e)
        })?;

        let item = sqlx::query_as::<_, CartItem>(
            r#"
            INSERT INTO cart_items (session_id, product_id, quantity, created_at, updated_at)
            VALUES ($1, $2, $3, CURRENT_TIMESTAMP, CURRENT_TIMESTAMP)
            ON CONFLICT (session_id, product_id)
            DO UPDATE SET
                quantity = cart_items.quantity + EXCLUDED.quantity,
                updated_at = CURRENT_TIMESTAMP
            RETURNING cart_item_id, session_id, product_id, quantity, created_at, updated_at
            "#,
        )
        .bind(session_id)
        .bind(product_id)
        .bind(quantity)
        .fetch_one(&mut *conn)
        .await
        .map_err(|e| {
            error!("❌ Failed to upsert cart item: {:?}", e);
            RepositoryError::from_constraint(e)
        })?;

        info!(
            "✅ Product {} now has quantity {}",
            item.product_id, item.quantity
        );

        Ok(item)
    }

    async fn set_quantity(
        &self,
        session_id: &str,
        product_id: &str,
        quantity: i32,
    ) -> Result<Option<CartItem>, RepositoryError> {
        info!("✏️ Setting product {product_id} quantity to {quantity}");

        let mut conn = self.db.acquire().await.map_err(|e| {
            error!("❌ Failed to acquire DB connection: {:?}", e);
            RepositoryError::from(e)
        })?;

        let item = sqlx::query_as::<_, CartItem>(
            r#"
            UPDATE cart_items
            SET quantity = $3, updated_at = CURRENT_TIMESTAMP
            WHERE session_id = $1 AND product_id = $2
            RETURNING cart_item_id, session_id, product_id, quantity, created_at, updated_at
            "#,
        )
        .bind(session_id)
        .bind(product_id)
        .bind(quantity)
        .fetch_optional(&mut *conn)
        .await
        .map_err(|e| {
            error!("❌ Failed to update cart item: {:?}", e);
            RepositoryError::from(e)
        })?;

        Ok(item)
    }

    async fn remove_item(
        &self,
        session_id: &str,
        product_id: &str,
    ) -> Result<bool, RepositoryError> {
        info!("🗑️ Removing product {product_id} from cart");

        let mut conn = self.db.acquire().await.map_err(|e| {
            error!("❌ Failed to acquire DB connection: {:?}", e);
            RepositoryError::from(e)
        })?;

        let result = sqlx::query(
            r#"
            DELETE FROM cart_items
            WHERE session_id = $1 AND product_id = $2
            "#,
        )
        .bind(session_id)
        .bind(product_id)
        .execute(&mut *conn)
        .await
        .map_err(|e| {
            error!("❌ Failed to delete cart item: {:?}", e);
            RepositoryError::from(e)
        })?;

        Ok(result.rows_affected() > 0)
    }

    async fn transfer_cart(&self, from: &str, to: &str) -> Result<u64, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(|e| {
            error!("❌ Failed to acquire DB connection: {:?}", e);
            RepositoryError::from(e)
        })?;

        let result = sqlx::query(
            r#"
            UPDATE cart_items
            SET session_id = $2, updated_at = CURRENT_TIMESTAMP
            WHERE session_id = $1
            "#,
        )
        .bind(from)
        .bind(to)
        .execute(&mut *conn)
        .await
        .map_err(|e| {
            error!("❌ Failed to move cart to new session: {:?}", e);
            RepositoryError::from_constraint(e)
        })?;

        info!("🔁 Moved {} cart lines to new session", result.rows_affected());

        Ok(result.rows_affected())
    }
}
