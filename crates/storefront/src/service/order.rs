use crate::{
    abstract_trait::{
        order::{DynOrderCommandRepository, DynOrderQueryRepository, OrderServiceTrait},
        product::DynProductQueryRepository,
    },
    config::PricingPolicy,
    domain::{
        requests::order::{CheckoutItem, CheckoutRequest, CreateOrderRecord},
        response::{
            api::ApiResponse,
            order::{CheckoutResponse, OrderData, OrderEnvelope, OrdersResponse},
            session::Session,
        },
    },
    model::order::{OrderItem, OrderStatus},
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use opentelemetry::KeyValue;
use prometheus_client::registry::Registry;
use rust_decimal::Decimal;
use shared::{
    errors::ServiceError,
    utils::{Method, ServiceTracing},
};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info};
use uuid::Uuid;

/// Largest amount a `NUMERIC(12,2)` column holds.
fn max_storable_amount() -> Decimal {
    Decimal::new(999_999_999_999, 2)
}

fn out_of_range(field: &str, product_id: &str) -> ServiceError {
    ServiceError::validation(format!("{field} for product {product_id} is out of range"))
}

fn ensure_storable(field: &str, product_id: &str, amount: Decimal) -> Result<(), ServiceError> {
    if amount.abs() > max_storable_amount() {
        return Err(out_of_range(field, product_id));
    }
    Ok(())
}

/// Sums line totals, rejecting totals the orders table cannot store.
fn order_total(items: &[OrderItem]) -> Result<Decimal, ServiceError> {
    items
        .iter()
        .try_fold(Decimal::ZERO, |acc, item| acc.checked_add(item.line_total))
        .filter(|total| total.abs() <= max_storable_amount())
        .ok_or_else(|| ServiceError::validation("order total is out of range"))
}

/// `ORD-YYYYMMDD-HHMMSS-xxxxxxxx`, the suffix taken from a random v4 UUID.
pub fn generate_order_id(now: DateTime<Utc>) -> String {
    let suffix = Uuid::new_v4().simple().to_string();
    format!("ORD-{}-{}", now.format("%Y%m%d-%H%M%S"), &suffix[..8])
}

#[derive(Clone)]
pub struct OrderService {
    query: DynOrderQueryRepository,
    command: DynOrderCommandRepository,
    products: DynProductQueryRepository,
    pricing: PricingPolicy,
    tracing: ServiceTracing,
}

impl OrderService {
    pub async fn new(
        query: DynOrderQueryRepository,
        command: DynOrderCommandRepository,
        products: DynProductQueryRepository,
        pricing: PricingPolicy,
        registry: Arc<Mutex<Registry>>,
    ) -> Self {
        let tracing =
            super::register_service_tracing("order-service", "order_service", &registry).await;

        Self {
            query,
            command,
            products,
            pricing,
            tracing,
        }
    }

    async fn price_items(&self, items: &[CheckoutItem]) -> Result<Vec<OrderItem>, ServiceError> {
        let mut priced = Vec::with_capacity(items.len());

        for item in items {
            let line = match self.pricing {
                PricingPolicy::ClientSnapshot => {
                    let unit_price = item.unit_price.unwrap_or_else(|| {
                        if item.quantity > 0 {
                            (item.line_total / Decimal::from(item.quantity)).round_dp(2)
                        } else {
                            Decimal::ZERO
                        }
                    });

                    OrderItem {
                        product_id: item.product_id.clone(),
                        quantity: item.quantity,
                        unit_price,
                        line_total: item.line_total,
                    }
                }
                PricingPolicy::CatalogRecompute => {
                    let product = self
                        .products
                        .find_by_id(&item.product_id)
                        .await?
                        .ok_or_else(|| {
                            ServiceError::not_found(format!(
                                "Product not found: {}",
                                item.product_id
                            ))
                        })?;

                    OrderItem {
                        product_id: item.product_id.clone(),
                        quantity: item.quantity,
                        unit_price: product.price,
                        line_total: product
                            .price
                            .checked_mul(Decimal::from(item.quantity))
                            .ok_or_else(|| out_of_range("lineTotal", &item.product_id))?,
                    }
                }
            };

            ensure_storable("unitPrice", &line.product_id, line.unit_price)?;
            ensure_storable("lineTotal", &line.product_id, line.line_total)?;

            priced.push(line);
        }

        Ok(priced)
    }

    async fn checkout_inner(
        &self,
        session: &Session,
        req: &CheckoutRequest,
    ) -> Result<ApiResponse<CheckoutResponse>, ServiceError> {
        info!("💳 Processing purchase for {} items", req.items.len());

        let items = self.price_items(&req.items).await?;
        let total_amount = order_total(&items)?;
        let now = Utc::now();

        let record = CreateOrderRecord {
            order_id: generate_order_id(now),
            session_id: session.session_id.clone(),
            user_id: session.user_id,
            items,
            total_amount,
            status: OrderStatus::Completed,
        };

        let order = self.command.record_checkout(&record).await.map_err(|e| {
            error!("❌ Error processing purchase: {e:?}");
            ServiceError::Repo(e)
        })?;

        info!("✅ Order {} recorded, total {}", order.order_id, order.total_amount);

        Ok(ApiResponse::with_message(
            "Purchase completed successfully!",
            CheckoutResponse {
                order_id: order.order_id,
                items_purchased: req.items.len(),
                timestamp: req.timestamp.clone().unwrap_or_else(|| now.to_rfc3339()),
                total_amount: order.total_amount,
            },
        ))
    }
}

#[async_trait]
impl OrderServiceTrait for OrderService {
    async fn checkout(
        &self,
        session: Option<&Session>,
        req: &CheckoutRequest,
    ) -> Result<ApiResponse<CheckoutResponse>, ServiceError> {
        let method = Method::Post;
        let tracing_ctx = self.tracing.start_tracing(
            "order_checkout",
            vec![
                KeyValue::new("component", "order"),
                KeyValue::new("operation", "checkout"),
                KeyValue::new("items", req.items.len() as i64),
            ],
        );

        let Some(session) = session else {
            self.tracing
                .complete_tracing_error(&tracing_ctx, method, "Session not found")
                .await;
            return Err(ServiceError::SessionNotFound);
        };

        match self.checkout_inner(session, req).await {
            Ok(response) => {
                self.tracing
                    .complete_tracing_success(&tracing_ctx, method, "Purchase completed")
                    .await;
                Ok(response)
            }
            Err(e) => {
                self.tracing
                    .complete_tracing_error(&tracing_ctx, method, &e.to_string())
                    .await;
                Err(e)
            }
        }
    }

    async fn list_orders(
        &self,
        session_id: &str,
    ) -> Result<ApiResponse<OrdersResponse>, ServiceError> {
        let method = Method::Get;
        let tracing_ctx = self.tracing.start_tracing(
            "order_list",
            vec![
                KeyValue::new("component", "order"),
                KeyValue::new("operation", "list"),
            ],
        );

        match self.query.find_by_session(session_id).await {
            Ok(orders) => {
                self.tracing
                    .complete_tracing_success(&tracing_ctx, method, "Orders retrieved")
                    .await;
                Ok(ApiResponse::ok(OrdersResponse {
                    orders: orders.into_iter().map(OrderData::from).collect(),
                }))
            }
            Err(e) => {
                let msg = format!("❌ Failed to fetch orders: {e:?}");
                error!("{msg}");
                self.tracing
                    .complete_tracing_error(&tracing_ctx, method, &msg)
                    .await;
                Err(ServiceError::Repo(e))
            }
        }
    }

    async fn get_order(
        &self,
        session_id: &str,
        order_id: &str,
    ) -> Result<ApiResponse<OrderEnvelope>, ServiceError> {
        let method = Method::Get;
        let tracing_ctx = self.tracing.start_tracing(
            "order_get",
            vec![
                KeyValue::new("component", "order"),
                KeyValue::new("operation", "get"),
                KeyValue::new("order.id", order_id.to_string()),
            ],
        );

        match self.query.find_by_order_id(session_id, order_id).await {
            Ok(Some(order)) => {
                self.tracing
                    .complete_tracing_success(&tracing_ctx, method, "Order retrieved")
                    .await;
                Ok(ApiResponse::ok(OrderEnvelope {
                    order: OrderData::from(order),
                }))
            }
            Ok(None) => {
                self.tracing
                    .complete_tracing_error(&tracing_ctx, method, "Order not found")
                    .await;
                Err(ServiceError::not_found("Order not found"))
            }
            Err(e) => {
                let msg = format!("❌ Failed to fetch order {order_id}: {e:?}");
                error!("{msg}");
                self.tracing
                    .complete_tracing_error(&tracing_ctx, method, &msg)
                    .await;
                Err(ServiceError::Repo(e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::collections::HashSet;

    #[test]
    fn order_id_embeds_utc_timestamp_and_hex_suffix() {
        let now = Utc.with_ymd_and_hms(2025, 3, 9, 7, 5, 1).unwrap();
        let id = generate_order_id(now);

        assert!(id.starts_with("ORD-20250309-070501-"), "{id}");
        let suffix = &id["ORD-20250309-070501-".len()..];
        assert_eq!(suffix.len(), 8);
        assert!(suffix.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn order_ids_generated_in_the_same_second_differ() {
        let now = Utc::now();
        let ids: HashSet<String> = (0..500).map(|_| generate_order_id(now)).collect();
        assert_eq!(ids.len(), 500);
    }

    fn line(line_total: Decimal) -> OrderItem {
        OrderItem {
            product_id: "1".into(),
            quantity: 1,
            unit_price: line_total,
            line_total,
        }
    }

    #[test]
    fn order_total_sums_line_totals() {
        let items = [line(Decimal::new(10000, 2)), line(Decimal::new(5050, 2))];
        assert_eq!(order_total(&items).unwrap(), Decimal::new(15050, 2));
        assert_eq!(order_total(&[]).unwrap(), Decimal::ZERO);
    }

    #[test]
    fn order_total_overflow_is_a_validation_error() {
        let items = [line(Decimal::MAX), line(Decimal::MAX)];
        match order_total(&items).unwrap_err() {
            ServiceError::Validation(msgs) => assert_eq!(msgs, ["order total is out of range"]),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn order_total_must_fit_the_orders_column() {
        let items = [
            line(Decimal::new(600_000_000_000, 2)),
            line(Decimal::new(600_000_000_000, 2)),
        ];
        assert!(matches!(order_total(&items), Err(ServiceError::Validation(_))));
    }
}
