use crate::{domain::response::product::ProductData, model::cart_item::CartItemWithProduct};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
#[serde(rename_all = "camelCase")]
pub struct CartLineResponse {
    pub product_id: String,
    pub quantity: i32,
    #[schema(value_type = f64)]
    #[serde(with = "rust_decimal::serde::float")]
    pub line_total: Decimal,
    pub product: ProductData,
}

impl From<&CartItemWithProduct> for CartLineResponse {
    fn from(value: &CartItemWithProduct) -> Self {
        CartLineResponse {
            product_id: value.product_id.clone(),
            quantity: value.quantity,
            line_total: value.line_total(),
            product: ProductData::from(value),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    pub cart: Vec<CartLineResponse>,
    pub total_items: i64,
    #[schema(value_type = f64)]
    #[serde(with = "rust_decimal::serde::float")]
    pub total_amount: Decimal,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
#[serde(rename_all = "camelCase")]
pub struct CartMutationResponse {
    pub product_id: String,
    pub quantity: i32,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
#[serde(rename_all = "camelCase")]
pub struct CartRemovalResponse {
    pub product_id: String,
}
