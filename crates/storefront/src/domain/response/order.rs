use crate::model::order::{Order as OrderModel, OrderItem};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutResponse {
    pub order_id: String,
    pub items_purchased: usize,
    pub timestamp: String,
    #[schema(value_type = f64)]
    #[serde(with = "rust_decimal::serde::float")]
    pub total_amount: Decimal,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemResponse {
    pub product_id: String,
    pub quantity: i32,
    #[schema(value_type = f64)]
    #[serde(with = "rust_decimal::serde::float")]
    pub unit_price: Decimal,
    #[schema(value_type = f64)]
    #[serde(with = "rust_decimal::serde::float")]
    pub line_total: Decimal,
}

impl From<OrderItem> for OrderItemResponse {
    fn from(value: OrderItem) -> Self {
        OrderItemResponse {
            product_id: value.product_id,
            quantity: value.quantity,
            unit_price: value.unit_price,
            line_total: value.line_total,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
#[serde(rename_all = "camelCase")]
pub struct OrderData {
    pub order_id: String,
    pub items: Vec<OrderItemResponse>,
    #[schema(value_type = f64)]
    #[serde(with = "rust_decimal::serde::float")]
    pub total_amount: Decimal,
    pub status: String,
    pub created_at: String,
}

impl From<OrderModel> for OrderData {
    fn from(value: OrderModel) -> Self {
        OrderData {
            order_id: value.order_id,
            items: value
                .items
                .0
                .into_iter()
                .map(OrderItemResponse::from)
                .collect(),
            total_amount: value.total_amount,
            status: value.status,
            created_at: value.created_at.and_utc().to_rfc3339(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct OrdersResponse {
    pub orders: Vec<OrderData>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct OrderEnvelope {
    pub order: OrderData,
}
