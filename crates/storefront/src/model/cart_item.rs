use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CartItem {
    pub cart_item_id: i64,
    pub session_id: String,
    pub product_id: String,
    pub quantity: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// A cart row joined with the live catalog entry it points at.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CartItemWithProduct {
    pub cart_item_id: i64,
    pub product_id: String,
    pub quantity: i32,
    pub created_at: NaiveDateTime,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub material: String,
    pub category: String,
    pub image_url: String,
    pub in_stock: bool,
    pub featured: bool,
}

impl CartItemWithProduct {
    pub fn line_total(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }
}
