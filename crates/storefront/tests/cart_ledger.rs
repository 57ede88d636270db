mod common;

use common::test_app;
use rust_decimal::Decimal;
use shared::errors::ServiceError;
use storefront::{
    config::PricingPolicy,
    domain::requests::cart::{AddToCartRequest, RemoveFromCartRequest, UpdateCartRequest},
};

fn add(product_id: &str, quantity: i32) -> AddToCartRequest {
    AddToCartRequest {
        product_id: product_id.to_string(),
        quantity,
    }
}

fn set(product_id: &str, quantity: i32) -> UpdateCartRequest {
    UpdateCartRequest {
        product_id: product_id.to_string(),
        quantity,
    }
}

fn remove(product_id: &str) -> RemoveFromCartRequest {
    RemoveFromCartRequest {
        product_id: product_id.to_string(),
    }
}

#[tokio::test]
async fn repeated_adds_sum_into_one_line() {
    let app = test_app(PricingPolicy::ClientSnapshot).await;
    let cart = app.state.di_container.cart_service.clone();

    cart.add_to_cart("S", &add("1", 2)).await.unwrap();
    let second = cart.add_to_cart("S", &add("1", 3)).await.unwrap();

    assert_eq!(second.data.quantity, 5);
    assert_eq!(second.message.as_deref(), Some("Added 3 item(s) to cart"));

    let rows = app.backend.cart_rows("S").await;
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].quantity, 5);
}

#[tokio::test]
async fn set_quantity_overwrites_instead_of_adding() {
    let app = test_app(PricingPolicy::ClientSnapshot).await;
    let cart = app.state.di_container.cart_service.clone();

    cart.add_to_cart("S", &add("1", 3)).await.unwrap();
    let response = cart.update_cart("S", &set("1", 5)).await.unwrap();

    assert_eq!(response.data.quantity, 5);
    assert_eq!(response.message.as_deref(), Some("Updated quantity to 5"));
    assert_eq!(app.backend.cart_rows("S").await[0].quantity, 5);
}

#[tokio::test]
async fn set_quantity_zero_removes_the_line() {
    let app = test_app(PricingPolicy::ClientSnapshot).await;
    let cart = app.state.di_container.cart_service.clone();

    cart.add_to_cart("S", &add("1", 3)).await.unwrap();
    cart.update_cart("S", &set("1", 0)).await.unwrap();

    assert!(app.backend.cart_rows("S").await.is_empty());

    let err = cart.update_cart("S", &set("1", 0)).await.unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(ref m) if m == "Product not found in cart"));
}

#[tokio::test]
async fn negative_quantity_is_rejected() {
    let app = test_app(PricingPolicy::ClientSnapshot).await;
    let cart = app.state.di_container.cart_service.clone();

    cart.add_to_cart("S", &add("1", 1)).await.unwrap();
    let err = cart.update_cart("S", &set("1", -1)).await.unwrap_err();

    assert!(matches!(err, ServiceError::Validation(_)));
    assert_eq!(app.backend.cart_rows("S").await[0].quantity, 1);
}

#[tokio::test]
async fn update_of_missing_line_does_not_create_it() {
    let app = test_app(PricingPolicy::ClientSnapshot).await;
    let cart = app.state.di_container.cart_service.clone();

    let err = cart.update_cart("S", &set("2", 4)).await.unwrap_err();

    assert!(matches!(err, ServiceError::NotFound(ref m) if m == "Product not found in cart"));
    assert!(app.backend.cart_rows("S").await.is_empty());
}

#[tokio::test]
async fn removing_absent_line_is_not_found_and_leaves_no_row() {
    let app = test_app(PricingPolicy::ClientSnapshot).await;
    let cart = app.state.di_container.cart_service.clone();

    let err = cart.remove_from_cart("S", &remove("1")).await.unwrap_err();

    assert!(matches!(err, ServiceError::NotFound(ref m) if m == "Product not found in cart"));
    assert!(app.backend.cart_rows("S").await.is_empty());
}

#[tokio::test]
async fn unknown_product_cannot_be_added() {
    let app = test_app(PricingPolicy::ClientSnapshot).await;
    let cart = app.state.di_container.cart_service.clone();

    let err = cart.add_to_cart("S", &add("does-not-exist", 1)).await.unwrap_err();

    assert!(matches!(err, ServiceError::NotFound(ref m) if m == "Product not found"));
    assert!(app.backend.cart_rows("S").await.is_empty());
}

#[tokio::test]
async fn listing_twice_without_mutation_is_identical() {
    let app = test_app(PricingPolicy::ClientSnapshot).await;
    let cart = app.state.di_container.cart_service.clone();

    cart.add_to_cart("S", &add("2", 1)).await.unwrap();
    cart.add_to_cart("S", &add("1", 2)).await.unwrap();
    cart.add_to_cart("S", &add("3", 1)).await.unwrap();

    let first = serde_json::to_value(cart.get_cart("S").await.unwrap()).unwrap();
    let second = serde_json::to_value(cart.get_cart("S").await.unwrap()).unwrap();

    assert_eq!(first, second);
    let ids: Vec<&str> = first["cart"]
        .as_array()
        .unwrap()
        .iter()
        .map(|l| l["productId"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["2", "1", "3"]);
}

#[tokio::test]
async fn listing_reports_line_totals_and_sums() {
    let app = test_app(PricingPolicy::ClientSnapshot).await;
    let cart = app.state.di_container.cart_service.clone();

    cart.add_to_cart("S", &add("1", 2)).await.unwrap();
    cart.add_to_cart("S", &add("2", 1)).await.unwrap();

    let response = cart.get_cart("S").await.unwrap();

    assert_eq!(response.data.total_items, 3);
    assert_eq!(response.data.total_amount, Decimal::new(349700, 2));
    assert_eq!(response.data.cart[0].line_total, Decimal::new(259800, 2));
    assert_eq!(response.data.cart[0].product.name, "Classic Gold Wedding Ring");
}

#[tokio::test]
async fn sessions_do_not_see_each_other() {
    let app = test_app(PricingPolicy::ClientSnapshot).await;
    let cart = app.state.di_container.cart_service.clone();

    cart.add_to_cart("S1", &add("1", 1)).await.unwrap();

    let other = cart.get_cart("S2").await.unwrap();
    assert!(other.data.cart.is_empty());
    assert_eq!(other.data.total_items, 0);
}

#[tokio::test]
async fn concurrent_adds_produce_one_line_with_total_quantity() {
    let app = test_app(PricingPolicy::ClientSnapshot).await;
    let cart = app.state.di_container.cart_service.clone();

    let handles: Vec<_> = (0..25)
        .map(|_| {
            let cart = cart.clone();
            tokio::spawn(async move { cart.add_to_cart("S", &add("1", 1)).await })
        })
        .collect();

    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let rows = app.backend.cart_rows("S").await;
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].quantity, 25);
}

#[tokio::test]
async fn legacy_duplicate_rows_are_merged_in_listing() {
    let app = test_app(PricingPolicy::ClientSnapshot).await;
    let cart = app.state.di_container.cart_service.clone();

    app.backend.insert_raw_cart_row("S", "1", 2).await;
    app.backend.insert_raw_cart_row("S", "2", 1).await;
    app.backend.insert_raw_cart_row("S", "1", 3).await;

    let response = cart.get_cart("S").await.unwrap();

    assert_eq!(response.data.cart.len(), 2);
    assert_eq!(response.data.cart[0].product_id, "1");
    assert_eq!(response.data.cart[0].quantity, 5);
    assert_eq!(response.data.total_items, 6);
}

#[tokio::test]
async fn add_set_remove_sequence() {
    let app = test_app(PricingPolicy::ClientSnapshot).await;
    let cart = app.state.di_container.cart_service.clone();

    cart.add_to_cart("S", &add("1", 2)).await.unwrap();
    cart.add_to_cart("S", &add("1", 3)).await.unwrap();
    assert_eq!(app.backend.cart_rows("S").await[0].quantity, 5);

    cart.update_cart("S", &set("1", 1)).await.unwrap();
    assert_eq!(app.backend.cart_rows("S").await[0].quantity, 1);

    let removed = cart.remove_from_cart("S", &remove("1")).await.unwrap();
    assert_eq!(removed.message.as_deref(), Some("Item removed from cart"));

    let listing = cart.get_cart("S").await.unwrap();
    assert!(listing.data.cart.is_empty());
}
