use crate::{
    abstract_trait::cart::CartQueryRepositoryTrait, model::cart_item::CartItemWithProduct,
};
use async_trait::async_trait;
use shared::{config::ConnectionPool, errors::RepositoryError};
use tracing::{error, info};

#[derive(Clone)]
pub struct CartQueryRepository {
    db: ConnectionPool,
}

impl CartQueryRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CartQueryRepositoryTrait for CartQueryRepository {
    async fn find_by_session(
        &self,
        session_id: &str,
    ) -> Result<Vec<CartItemWithProduct>, RepositoryError> {
        info!("🛒 Fetching cart for session");

        let mut conn = self.db.acquire().await.map_err(|e| {
            error!("❌ Failed to acquire DB connection: {:?}", e);
            RepositoryError::from(e)
        })?;

        let rows = sqlx::query_as::<_, CartItemWithProduct>(
            r#"
            SELECT
                c.cart_item_id,
                c.product_id,
                c.quantity,
                c.created_at,
                p.name,
                p.description,
                p.price,
                p.material,
                p.category,
                p.image_url,
                p.in_stock,
                p.featured
            FROM cart_items c
            JOIN products p ON p.product_id = c.product_id
            WHERE c.session_id = $1
            ORDER BY c.created_at ASC, c.cart_item_id ASC
            "#,
        )
        .bind(session_id)
        .fetch_all(&mut *conn)
        .await
        .map_err(|e| {
            error!("❌ Failed to fetch cart items: {:?}", e);
            RepositoryError::from(e)
        })?;

        info!("✅ Found {} cart lines", rows.len());

        Ok(rows)
    }
}
