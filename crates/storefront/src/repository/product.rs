use crate::{
    abstract_trait::product::ProductQueryRepositoryTrait, model::product::Product as ProductModel,
};
use async_trait::async_trait;
use shared::{config::ConnectionPool, errors::RepositoryError};
use tracing::{error, info};

#[derive(Clone)]
pub struct ProductQueryRepository {
    db: ConnectionPool,
}

impl ProductQueryRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProductQueryRepositoryTrait for ProductQueryRepository {
    async fn find_all(&self) -> Result<Vec<ProductModel>, RepositoryError> {
        info!("🔍 Fetching all products");

        let mut conn = self.db.acquire().await.map_err(|e| {
            error!("❌ Failed to acquire DB connection: {:?}", e);
            RepositoryError::from(e)
        })?;

        let products = sqlx::query_as::<_, ProductModel>(
            r#"
            SELECT product_id, name, description, price, material, category,
                   image_url, in_stock, featured, created_at, updated_at
            FROM products
            ORDER BY featured DESC, created_at ASC, product_id ASC
            "#,
        )
        .fetch_all(&mut *conn)
        .await
        .map_err(|e| {
            error!("❌ Failed to fetch products: {:?}", e);
            RepositoryError::from(e)
        })?;

        info!("✅ Retrieved {} products", products.len());

        Ok(products)
    }

    async fn find_by_id(&self, product_id: &str) -> Result<Option<ProductModel>, RepositoryError> {
        info!("🆔 Fetching product by ID: {product_id}");

        let mut conn = self.db.acquire().await.map_err(|e| {
            error!("❌ Failed to acquire DB connection: {:?}", e);
            RepositoryError::from(e)
        })?;

        let product = sqlx::query_as::<_, ProductModel>(
            r#"
            SELECT product_id, name, description, price, material, category,
                   image_url, in_stock, featured, created_at, updated_at
            FROM products
            WHERE product_id = $1
            "#,
        )
        .bind(product_id)
        .fetch_optional(&mut *conn)
        .await
        .map_err(|e| {
            error!("❌ Failed to fetch product {product_id}: {:?}", e);
            RepositoryError::from(e)
        })?;

        Ok(product)
    }
}
