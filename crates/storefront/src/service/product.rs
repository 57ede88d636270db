use crate::{
    abstract_trait::product::{DynProductQueryRepository, ProductServiceTrait},
    domain::response::{
        api::ApiResponse,
        product::{ProductData, ProductEnvelope, ProductsResponse},
    },
};
use async_trait::async_trait;
use opentelemetry::KeyValue;
use prometheus_client::registry::Registry;
use shared::{
    errors::ServiceError,
    utils::{Method, ServiceTracing},
};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info};

#[derive(Clone)]
pub struct ProductService {
    query: DynProductQueryRepository,
    tracing: ServiceTracing,
}

impl ProductService {
    pub async fn new(query: DynProductQueryRepository, registry: Arc<Mutex<Registry>>) -> Self {
        let tracing =
            super::register_service_tracing("product-service", "product_service", &registry).await;

        Self { query, tracing }
    }
}

#[async_trait]
impl ProductServiceTrait for ProductService {
    async fn list_products(&self) -> Result<ApiResponse<ProductsResponse>, ServiceError> {
        let method = Method::Get;
        let tracing_ctx = self.tracing.start_tracing(
            "product_list",
            vec![
                KeyValue::new("component", "product"),
                KeyValue::new("operation", "list"),
            ],
        );

        let products = match self.query.find_all().await {
            Ok(products) => products,
            Err(e) => {
                let msg = format!("❌ Failed to fetch products: {e:?}");
                error!("{msg}");
                self.tracing
                    .complete_tracing_error(&tracing_ctx, method, &msg)
                    .await;
                return Err(ServiceError::Repo(e));
            }
        };

        let products: Vec<ProductData> = products.into_iter().map(ProductData::from).collect();

        info!("✅ Retrieved {} products", products.len());
        self.tracing
            .complete_tracing_success(&tracing_ctx, method, "Products retrieved")
            .await;

        Ok(ApiResponse::ok(ProductsResponse { products }))
    }

    async fn get_product(
        &self,
        product_id: &str,
    ) -> Result<ApiResponse<ProductEnvelope>, ServiceError> {
        let method = Method::Get;
        let tracing_ctx = self.tracing.start_tracing(
            "product_get",
            vec![
                KeyValue::new("component", "product"),
                KeyValue::new("operation", "get"),
                KeyValue::new("product.id", product_id.to_string()),
            ],
        );

        match self.query.find_by_id(product_id).await {
            Ok(Some(product)) => {
                self.tracing
                    .complete_tracing_success(&tracing_ctx, method, "Product retrieved")
                    .await;
                Ok(ApiResponse::ok(ProductEnvelope {
                    product: ProductData::from(product),
                }))
            }
            Ok(None) => {
                self.tracing
                    .complete_tracing_error(&tracing_ctx, method, "Product not found")
                    .await;
                Err(ServiceError::not_found("Product not found"))
            }
            Err(e) => {
                let msg = format!("❌ Failed to fetch product {product_id}: {e:?}");
                error!("{msg}");
                self.tracing
                    .complete_tracing_error(&tracing_ctx, method, &msg)
                    .await;
                Err(ServiceError::Repo(e))
            }
        }
    }
}
