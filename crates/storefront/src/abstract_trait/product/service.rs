use crate::domain::response::{
    api::ApiResponse,
    product::{ProductEnvelope, ProductsResponse},
};
use async_trait::async_trait;
use shared::errors::ServiceError;
use std::sync::Arc;

pub type DynProductService = Arc<dyn ProductServiceTrait + Send + Sync>;

#[async_trait]
pub trait ProductServiceTrait {
    async fn list_products(&self) -> Result<ApiResponse<ProductsResponse>, ServiceError>;
    async fn get_product(
        &self,
        product_id: &str,
    ) -> Result<ApiResponse<ProductEnvelope>, ServiceError>;
}
