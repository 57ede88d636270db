use crate::model::order::{OrderItem, OrderStatus};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema, Clone, Default)]
pub struct CheckoutRequest {
    #[validate(nested)]
    #[serde(default)]
    pub items: Vec<CheckoutItem>,

    /// Client-side purchase time, echoed back untouched.
    #[serde(default)]
    pub timestamp: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema, Clone)]
pub struct CheckoutItem {
    #[validate(length(min = 1, message = "productId is required"))]
    #[serde(rename = "productId")]
    pub product_id: String,

    #[validate(range(min = 0, message = "quantity must be zero or greater"))]
    #[serde(default)]
    pub quantity: i32,

    #[schema(value_type = f64)]
    #[serde(rename = "lineTotal", alias = "total", default)]
    pub line_total: Decimal,

    #[schema(value_type = Option<f64>)]
    #[serde(rename = "unitPrice", default)]
    pub unit_price: Option<Decimal>,
}

#[derive(Debug, Clone)]
pub struct CreateOrderRecord {
    pub order_id: String,
    pub session_id: String,
    pub user_id: Option<i64>,
    pub items: Vec<OrderItem>,
    pub total_amount: Decimal,
    pub status: OrderStatus,
}
