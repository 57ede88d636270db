//! Cart and checkout repositories against a real PostgreSQL.
//!
//! Run with: cargo test -p storefront --test repository_postgres --features postgres-tests
//!
//! Each test starts its own container, runs the migrations, and talks to the
//! repositories through their traits.
#![cfg(feature = "postgres-tests")]

use rust_decimal::Decimal;
use shared::errors::RepositoryError;
use sqlx::PgPool;
use std::time::Duration;
use storefront::{
    abstract_trait::{
        cart::{CartCommandRepositoryTrait, CartQueryRepositoryTrait},
        order::{OrderCommandRepositoryTrait, OrderQueryRepositoryTrait},
    },
    domain::requests::order::CreateOrderRecord,
    model::order::{OrderItem, OrderStatus},
    repository::{
        CartCommandRepository, CartQueryRepository, OrderCommandRepository, OrderQueryRepository,
    },
    service::generate_order_id,
};
use testcontainers::{
    ContainerAsync, GenericImage, ImageExt,
    core::{IntoContainerPort, WaitFor},
    runners::AsyncRunner,
};

async fn start_postgres() -> (ContainerAsync<GenericImage>, PgPool) {
    let container = GenericImage::new("postgres", "16")
        .with_exposed_port(5432.tcp())
        .with_wait_for(WaitFor::message_on_stdout(
            "database system is ready to accept connections",
        ))
        .with_env_var("POSTGRES_USER", "storefront")
        .with_env_var("POSTGRES_PASSWORD", "storefront")
        .with_env_var("POSTGRES_DB", "storefront")
        .with_startup_timeout(Duration::from_secs(60))
        .start()
        .await
        .expect("Failed to start postgres container");

    // The ready message is printed once during init and again when serving.
    tokio::time::sleep(Duration::from_secs(1)).await;

    let host = container.get_host().await.expect("container host");
    let port = container
        .get_host_port_ipv4(5432)
        .await
        .expect("mapped port");

    let pool = PgPool::connect(&format!(
        "postgres://storefront:storefront@{host}:{port}/storefront"
    ))
    .await
    .expect("Failed to connect to PostgreSQL");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    (container, pool)
}

fn checkout_record(session_id: &str, lines: &[(&str, i32, i64)]) -> CreateOrderRecord {
    let items: Vec<OrderItem> = lines
        .iter()
        .map(|(product_id, quantity, cents)| OrderItem {
            product_id: product_id.to_string(),
            quantity: *quantity,
            unit_price: Decimal::new(*cents, 2) / Decimal::from(*quantity),
            line_total: Decimal::new(*cents, 2),
        })
        .collect();
    let total_amount = items.iter().map(|i| i.line_total).sum();

    CreateOrderRecord {
        order_id: generate_order_id(chrono::Utc::now()),
        session_id: session_id.to_string(),
        user_id: None,
        items,
        total_amount,
        status: OrderStatus::Completed,
    }
}

async fn cart_quantities(pool: &PgPool, session_id: &str) -> Vec<(String, i32)> {
    CartQueryRepository::new(pool.clone())
        .find_by_session(session_id)
        .await
        .unwrap()
        .into_iter()
        .map(|line| (line.product_id, line.quantity))
        .collect()
}

async fn order_count(pool: &PgPool, session_id: &str) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM orders WHERE session_id = $1")
        .bind(session_id)
        .fetch_one(pool)
        .await
        .unwrap()
}

#[tokio::test]
async fn concurrent_adds_upsert_into_one_row() {
    let (_container, pool) = start_postgres().await;
    let repo = CartCommandRepository::new(pool.clone());

    let tasks: Vec<_> = (0..25)
        .map(|_| {
            let repo = repo.clone();
            tokio::spawn(async move { repo.add_quantity("S", "1", 1).await })
        })
        .collect();
    for task in tasks {
        task.await.unwrap().unwrap();
    }

    assert_eq!(cart_quantities(&pool, "S").await, vec![("1".to_string(), 25)]);

    let rows: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM cart_items WHERE session_id = 'S'")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(rows, 1);
}

#[tokio::test]
async fn storage_constraints_hold() {
    let (_container, pool) = start_postgres().await;
    let repo = CartCommandRepository::new(pool.clone());
    repo.add_quantity("S", "1", 2).await.unwrap();

    let duplicate = sqlx::query(
        "INSERT INTO cart_items (session_id, product_id, quantity) VALUES ('S', '1', 1)",
    )
    .execute(&pool)
    .await
    .unwrap_err();
    assert!(
        duplicate
            .as_database_error()
            .is_some_and(|e| e.is_unique_violation())
    );

    assert!(repo.set_quantity("S", "1", 0).await.is_err());
    assert_eq!(cart_quantities(&pool, "S").await, vec![("1".to_string(), 2)]);

    let unknown = repo.add_quantity("S", "no-such-product", 1).await.unwrap_err();
    assert!(matches!(unknown, RepositoryError::ForeignKey(_)));
}

#[tokio::test]
async fn set_and_remove_touch_only_existing_lines() {
    let (_container, pool) = start_postgres().await;
    let repo = CartCommandRepository::new(pool.clone());
    repo.add_quantity("S", "1", 2).await.unwrap();

    let updated = repo.set_quantity("S", "1", 7).await.unwrap().unwrap();
    assert_eq!(updated.quantity, 7);
    assert!(repo.set_quantity("S", "2", 3).await.unwrap().is_none());

    assert!(repo.remove_item("S", "1").await.unwrap());
    assert!(!repo.remove_item("S", "1").await.unwrap());
    assert!(cart_quantities(&pool, "S").await.is_empty());
}

#[tokio::test]
async fn checkout_writes_order_and_clears_only_that_cart() {
    let (_container, pool) = start_postgres().await;
    let cart = CartCommandRepository::new(pool.clone());
    cart.add_quantity("S", "1", 1).await.unwrap();
    cart.add_quantity("S", "2", 2).await.unwrap();
    cart.add_quantity("T", "3", 1).await.unwrap();

    let record = checkout_record("S", &[("1", 1, 129900), ("2", 2, 179800)]);
    let order = OrderCommandRepository::new(pool.clone())
        .record_checkout(&record)
        .await
        .unwrap();

    assert_eq!(order.order_id, record.order_id);
    assert_eq!(order.total_amount, Decimal::new(309700, 2));
    assert_eq!(order.status, "completed");
    assert_eq!(order.items.0, record.items);

    assert!(cart_quantities(&pool, "S").await.is_empty());
    assert_eq!(cart_quantities(&pool, "T").await, vec![("3".to_string(), 1)]);

    let stored = OrderQueryRepository::new(pool.clone())
        .find_by_order_id("S", &record.order_id)
        .await
        .unwrap();
    assert!(stored.is_some());
}

#[tokio::test]
async fn checkout_rolls_back_when_clearing_the_cart_fails() {
    let (_container, pool) = start_postgres().await;
    let cart = CartCommandRepository::new(pool.clone());
    cart.add_quantity("S", "1", 2).await.unwrap();

    sqlx::query(
        r#"
        CREATE FUNCTION refuse_cart_delete() RETURNS trigger AS $$
        BEGIN
            RAISE EXCEPTION 'cart delete refused';
        END;
        $$ LANGUAGE plpgsql
        "#,
    )
    .execute(&pool)
    .await
    .unwrap();
    sqlx::query(
        "CREATE TRIGGER refuse_cart_delete BEFORE DELETE ON cart_items \
         FOR EACH ROW EXECUTE FUNCTION refuse_cart_delete()",
    )
    .execute(&pool)
    .await
    .unwrap();

    let record = checkout_record("S", &[("1", 2, 259800)]);
    let result = OrderCommandRepository::new(pool.clone())
        .record_checkout(&record)
        .await;

    assert!(result.is_err());
    assert_eq!(order_count(&pool, "S").await, 0);
    assert_eq!(cart_quantities(&pool, "S").await, vec![("1".to_string(), 2)]);
}

#[tokio::test]
async fn cart_moves_to_a_new_session() {
    let (_container, pool) = start_postgres().await;
    let cart = CartCommandRepository::new(pool.clone());
    cart.add_quantity("old", "1", 1).await.unwrap();
    cart.add_quantity("old", "4", 2).await.unwrap();

    let moved = cart.transfer_cart("old", "new").await.unwrap();

    assert_eq!(moved, 2);
    assert!(cart_quantities(&pool, "old").await.is_empty());
    assert_eq!(
        cart_quantities(&pool, "new").await,
        vec![("1".to_string(), 1), ("4".to_string(), 2)]
    );
}
