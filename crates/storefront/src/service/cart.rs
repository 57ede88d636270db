use crate::{
    abstract_trait::{
        cart::{CartServiceTrait, DynCartCommandRepository, DynCartQueryRepository},
        product::DynProductQueryRepository,
    },
    domain::{
        requests::cart::{AddToCartRequest, RemoveFromCartRequest, UpdateCartRequest},
        response::{
            api::ApiResponse,
            cart::{CartLineResponse, CartMutationResponse, CartRemovalResponse, CartResponse},
        },
    },
    model::cart_item::CartItemWithProduct,
};
use async_trait::async_trait;
use opentelemetry::KeyValue;
use prometheus_client::registry::Registry;
use rust_decimal::Decimal;
use shared::{
    errors::{RepositoryError, ServiceError},
    utils::{Method, ServiceTracing, TracingContext},
};
use std::{collections::HashMap, sync::Arc};
use tokio::sync::Mutex;
use tracing::{error, info, warn};

const PRODUCT_NOT_FOUND: &str = "Product not found";
const NOT_IN_CART: &str = "Product not found in cart";

/// Collapses rows that share a product id into the earliest one, summing quantities.
///
/// Input is expected in listing order (creation time, then id); the survivor keeps
/// its position.
pub fn merge_duplicate_lines(rows: Vec<CartItemWithProduct>) -> Vec<CartItemWithProduct> {
    let mut merged: Vec<CartItemWithProduct> = Vec::with_capacity(rows.len());
    let mut positions: HashMap<String, usize> = HashMap::new();

    for row in rows {
        match positions.get(&row.product_id) {
            Some(&idx) => {
                warn!(
                    "Duplicate cart line for product {} merged into line {}",
                    row.product_id, merged[idx].cart_item_id
                );
                merged[idx].quantity = merged[idx].quantity.saturating_add(row.quantity);
            }
            None => {
                positions.insert(row.product_id.clone(), merged.len());
                merged.push(row);
            }
        }
    }

    merged
}

#[derive(Clone)]
pub struct CartService {
    query: DynCartQueryRepository,
    command: DynCartCommandRepository,
    products: DynProductQueryRepository,
    tracing: ServiceTracing,
}

impl CartService {
    pub async fn new(
        query: DynCartQueryRepository,
        command: DynCartCommandRepository,
        products: DynProductQueryRepository,
        registry: Arc<Mutex<Registry>>,
    ) -> Self {
        let tracing =
            super::register_service_tracing("cart-service", "cart_service", &registry).await;

        Self {
            query,
            command,
            products,
            tracing,
        }
    }

    async fn finish<T>(
        &self,
        tracing_ctx: &TracingContext,
        method: Method,
        result: Result<T, ServiceError>,
        success_message: &str,
    ) -> Result<T, ServiceError> {
        match &result {
            Ok(_) => {
                self.tracing
                    .complete_tracing_success(tracing_ctx, method, success_message)
                    .await
            }
            Err(e) => {
                self.tracing
                    .complete_tracing_error(tracing_ctx, method, &e.to_string())
                    .await
            }
        }
        result
    }

    async fn add_inner(
        &self,
        session_id: &str,
        req: &AddToCartRequest,
    ) -> Result<ApiResponse<CartMutationResponse>, ServiceError> {
        if req.quantity < 1 {
            return Err(ServiceError::validation("quantity must be at least 1"));
        }

        if self.products.find_by_id(&req.product_id).await?.is_none() {
            return Err(ServiceError::not_found(PRODUCT_NOT_FOUND));
        }

        let item = self
            .command
            .add_quantity(session_id, &req.product_id, req.quantity)
            .await
            .map_err(|e| match e {
                RepositoryError::ForeignKey(_) => ServiceError::not_found(PRODUCT_NOT_FOUND),
                other => {
                    error!("❌ Failed to add product {} to cart: {other:?}", req.product_id);
                    ServiceError::Repo(other)
                }
            })?;

        info!(
            "✅ Cart operation completed: {} now has quantity {}",
            item.product_id, item.quantity
        );

        Ok(ApiResponse::with_message(
            format!("Added {} item(s) to cart", req.quantity),
            CartMutationResponse {
                product_id: item.product_id,
                quantity: item.quantity,
            },
        ))
    }

    async fn update_inner(
        &self,
        session_id: &str,
        req: &UpdateCartRequest,
    ) -> Result<ApiResponse<CartMutationResponse>, ServiceError> {
        if req.quantity < 0 {
            return Err(ServiceError::validation("quantity must be zero or greater"));
        }

        if req.quantity == 0 {
            if !self.command.remove_item(session_id, &req.product_id).await? {
                return Err(ServiceError::not_found(NOT_IN_CART));
            }
            info!("✅ Product {} removed by zero quantity", req.product_id);
        } else if self
            .command
            .set_quantity(session_id, &req.product_id, req.quantity)
            .await?
            .is_none()
        {
            return Err(ServiceError::not_found(NOT_IN_CART));
        }

        Ok(ApiResponse::with_message(
            format!("Updated quantity to {}", req.quantity),
            CartMutationResponse {
                product_id: req.product_id.clone(),
                quantity: req.quantity,
            },
        ))
    }
}

#[async_trait]
impl CartServiceTrait for CartService {
    async fn get_cart(&self, session_id: &str) -> Result<ApiResponse<CartResponse>, ServiceError> {
        let method = Method::Get;
        let tracing_ctx = self.tracing.start_tracing(
            "cart_get",
            vec![
                KeyValue::new("component", "cart"),
                KeyValue::new("operation", "get"),
            ],
        );

        let rows = match self.query.find_by_session(session_id).await {
            Ok(rows) => rows,
            Err(e) => {
                let msg = format!("❌ Failed to fetch cart: {e:?}");
                error!("{msg}");
                self.tracing
                    .complete_tracing_error(&tracing_ctx, method, &msg)
                    .await;
                return Err(ServiceError::Repo(e));
            }
        };

        let lines = merge_duplicate_lines(rows);

        let total_items: i64 = lines.iter().map(|l| i64::from(l.quantity)).sum();
        let total_amount: Decimal = lines.iter().map(CartItemWithProduct::line_total).sum();
        let cart: Vec<CartLineResponse> = lines.iter().map(CartLineResponse::from).collect();

        self.tracing
            .complete_tracing_success(&tracing_ctx, method, "Cart retrieved")
            .await;

        Ok(ApiResponse::ok(CartResponse {
            cart,
            total_items,
            total_amount,
        }))
    }

    async fn add_to_cart(
        &self,
        session_id: &str,
        req: &AddToCartRequest,
    ) -> Result<ApiResponse<CartMutationResponse>, ServiceError> {
        let tracing_ctx = self.tracing.start_tracing(
            "cart_add",
            vec![
                KeyValue::new("component", "cart"),
                KeyValue::new("operation", "add"),
                KeyValue::new("product.id", req.product_id.clone()),
                KeyValue::new("quantity", i64::from(req.quantity)),
            ],
        );

        let result = self.add_inner(session_id, req).await;
        self.finish(&tracing_ctx, Method::Post, result, "Item added to cart")
            .await
    }

    async fn update_cart(
        &self,
        session_id: &str,
        req: &UpdateCartRequest,
    ) -> Result<ApiResponse<CartMutationResponse>, ServiceError> {
        let tracing_ctx = self.tracing.start_tracing(
            "cart_update",
            vec![
                KeyValue::new("component", "cart"),
                KeyValue::new("operation", "update"),
                KeyValue::new("product.id", req.product_id.clone()),
                KeyValue::new("quantity", i64::from(req.quantity)),
            ],
        );

        let result = self.update_inner(session_id, req).await;
        self.finish(&tracing_ctx, Method::Put, result, "Cart quantity updated")
            .await
    }

    async fn remove_from_cart(
        &self,
        session_id: &str,
        req: &RemoveFromCartRequest,
    ) -> Result<ApiResponse<CartRemovalResponse>, ServiceError> {
        let method = Method::Delete;
        let tracing_ctx = self.tracing.start_tracing(
            "cart_remove",
            vec![
                KeyValue::new("component", "cart"),
                KeyValue::new("operation", "remove"),
                KeyValue::new("product.id", req.product_id.clone()),
            ],
        );

        let result = match self.command.remove_item(session_id, &req.product_id).await {
            Ok(true) => {
                info!("✅ Removed product {} from cart", req.product_id);
                Ok(ApiResponse::with_message(
                    "Item removed from cart",
                    CartRemovalResponse {
                        product_id: req.product_id.clone(),
                    },
                ))
            }
            Ok(false) => Err(ServiceError::not_found(NOT_IN_CART)),
            Err(e) => Err(ServiceError::Repo(e)),
        };

        self.finish(&tracing_ctx, method, result, "Item removed from cart")
            .await
    }
}
