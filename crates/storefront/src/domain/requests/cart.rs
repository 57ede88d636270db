use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

fn default_quantity() -> i32 {
    1
}

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema, Clone)]
pub struct AddToCartRequest {
    #[validate(length(min = 1, message = "productId is required"))]
    #[serde(rename = "productId")]
    pub product_id: String,

    #[validate(range(min = 1, message = "quantity must be at least 1"))]
    #[serde(default = "default_quantity")]
    pub quantity: i32,
}

/// Absolute quantity for an existing line. Zero removes the line.
#[derive(Debug, Serialize, Deserialize, Validate, ToSchema, Clone)]
pub struct UpdateCartRequest {
    #[validate(length(min = 1, message = "productId is required"))]
    #[serde(rename = "productId")]
    pub product_id: String,

    #[validate(range(min = 0, message = "quantity must be zero or greater"))]
    pub quantity: i32,
}

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema, Clone)]
pub struct RemoveFromCartRequest {
    #[validate(length(min = 1, message = "productId is required"))]
    #[serde(rename = "productId")]
    pub product_id: String,
}
