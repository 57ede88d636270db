use crate::model::{cart_item::CartItemWithProduct, product::Product as ProductModel};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ProductData {
    pub id: String,
    pub name: String,
    pub description: String,
    #[schema(value_type = f64)]
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub material: String,
    pub category: String,
    pub image_url: String,
    pub in_stock: bool,
    pub featured: bool,
}

impl From<ProductModel> for ProductData {
    fn from(value: ProductModel) -> Self {
        ProductData {
            id: value.product_id,
            name: value.name,
            description: value.description,
            price: value.price,
            material: value.material,
            category: value.category,
            image_url: value.image_url,
            in_stock: value.in_stock,
            featured: value.featured,
        }
    }
}

impl From<&CartItemWithProduct> for ProductData {
    fn from(value: &CartItemWithProduct) -> Self {
        ProductData {
            id: value.product_id.clone(),
            name: value.name.clone(),
            description: value.description.clone(),
            price: value.price,
            material: value.material.clone(),
            category: value.category.clone(),
            image_url: value.image_url.clone(),
            in_stock: value.in_stock,
            featured: value.featured,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct ProductsResponse {
    pub products: Vec<ProductData>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct ProductEnvelope {
    pub product: ProductData,
}
