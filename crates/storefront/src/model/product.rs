use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Product {
    pub product_id: String,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub material: String,
    pub category: String,
    pub image_url: String,
    pub in_stock: bool,
    pub featured: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}
