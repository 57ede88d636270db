#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{NaiveDateTime, Utc};
use rust_decimal::Decimal;
use shared::{config::Hashing, errors::RepositoryError, errors::ServiceError};
use sqlx::types::Json;
use std::{collections::HashMap, sync::Arc};
use storefront::{
    abstract_trait::{
        cart::{CartCommandRepositoryTrait, CartQueryRepositoryTrait},
        contact::ContactRepositoryTrait,
        order::{OrderCommandRepositoryTrait, OrderQueryRepositoryTrait},
        product::ProductQueryRepositoryTrait,
        session::SessionStoreTrait,
        user::UserRepositoryTrait,
    },
    config::PricingPolicy,
    di::DependenciesInjectDeps,
    domain::{
        requests::{auth::CreateUserRecord, contact::ContactRequest, order::CreateOrderRecord},
        response::session::Session,
    },
    model::{
        cart_item::{CartItem, CartItemWithProduct},
        contact_message::ContactMessage,
        order::Order,
        product::Product,
        user::User,
    },
    state::AppState,
};
use tokio::sync::Mutex;

#[derive(Default)]
struct MemoryState {
    products: HashMap<String, Product>,
    cart: Vec<CartItem>,
    orders: Vec<Order>,
    contacts: Vec<ContactMessage>,
    users: Vec<User>,
    next_id: i64,
    fail_next_checkout: bool,
}

impl MemoryState {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

fn now() -> NaiveDateTime {
    Utc::now().naive_utc()
}

/// Single in-memory backend behind every repository trait. One lock guards all
/// tables, so multi-table operations are atomic the way a transaction is.
#[derive(Clone, Default)]
pub struct MemoryBackend {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryBackend {
    pub async fn with_catalog() -> Self {
        let backend = Self::default();
        backend
            .add_product("1", "Classic Gold Wedding Ring", Decimal::new(129900, 2))
            .await;
        backend
            .add_product("2", "Pearl Pendant Necklace", Decimal::new(89900, 2))
            .await;
        backend
            .add_product("3", "Gold Drop Earrings", Decimal::new(89900, 2))
            .await;
        backend
    }

    pub async fn add_product(&self, id: &str, name: &str, price: Decimal) {
        let mut state = self.state.lock().await;
        state.products.insert(
            id.to_string(),
            Product {
                product_id: id.to_string(),
                name: name.to_string(),
                description: format!("{name} description"),
                price,
                material: "18k Yellow Gold".into(),
                category: "rings".into(),
                image_url: format!("https://img.example/{id}.jpg"),
                in_stock: true,
                featured: true,
                created_at: now(),
                updated_at: now(),
            },
        );
    }

    /// Inserts a cart row bypassing the (session, product) uniqueness.
    pub async fn insert_raw_cart_row(&self, session_id: &str, product_id: &str, quantity: i32) {
        let mut state = self.state.lock().await;
        let id = state.next_id();
        state.cart.push(CartItem {
            cart_item_id: id,
            session_id: session_id.to_string(),
            product_id: product_id.to_string(),
            quantity,
            created_at: now(),
            updated_at: now(),
        });
    }

    pub async fn cart_rows(&self, session_id: &str) -> Vec<CartItem> {
        let state = self.state.lock().await;
        state
            .cart
            .iter()
            .filter(|c| c.session_id == session_id)
            .cloned()
            .collect()
    }

    pub async fn order_count(&self) -> usize {
        self.state.lock().await.orders.len()
    }

    pub async fn contact_count(&self) -> usize {
        self.state.lock().await.contacts.len()
    }

    pub async fn fail_next_checkout(&self) {
        self.state.lock().await.fail_next_checkout = true;
    }
}

#[async_trait]
impl ProductQueryRepositoryTrait for MemoryBackend {
    async fn find_all(&self) -> Result<Vec<Product>, RepositoryError> {
        let state = self.state.lock().await;
        let mut products: Vec<Product> = state.products.values().cloned().collect();
        products.sort_by(|a, b| a.product_id.cmp(&b.product_id));
        Ok(products)
    }

    async fn find_by_id(&self, product_id: &str) -> Result<Option<Product>, RepositoryError> {
        Ok(self.state.lock().await.products.get(product_id).cloned())
    }
}

#[async_trait]
impl CartQueryRepositoryTrait for MemoryBackend {
    async fn find_by_session(
        &self,
        session_id: &str,
    ) -> Result<Vec<CartItemWithProduct>, RepositoryError> {
        let state = self.state.lock().await;
        let mut rows: Vec<&CartItem> = state
            .cart
            .iter()
            .filter(|c| c.session_id == session_id)
            .collect();
        rows.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then(a.cart_item_id.cmp(&b.cart_item_id))
        });

        Ok(rows
            .into_iter()
            .filter_map(|item| {
                state.products.get(&item.product_id).map(|p| CartItemWithProduct {
                    cart_item_id: item.cart_item_id,
                    product_id: item.product_id.clone(),
                    quantity: item.quantity,
                    created_at: item.created_at,
                    name: p.name.clone(),
                    description: p.description.clone(),
                    price: p.price,
                    material: p.material.clone(),
                    category: p.category.clone(),
                    image_url: p.image_url.clone(),
                    in_stock: p.in_stock,
                    featured: p.featured,
                })
            })
            .collect())
    }
}

#[async_trait]
impl CartCommandRepositoryTrait for MemoryBackend {
    async fn add_quantity(
        &self,
        session_id: &str,
        product_id: &str,
        quantity: i32,
    ) -> Result<CartItem, RepositoryError> {
        let mut state = self.state.lock().await;

        if !state.products.contains_key(product_id) {
            return Err(RepositoryError::ForeignKey(format!(
                "product {product_id} does not exist"
            )));
        }

        if let Some(item) = state
            .cart
            .iter_mut()
            .find(|c| c.session_id == session_id && c.product_id == product_id)
        {
            item.quantity += quantity;
            item.updated_at = now();
            return Ok(item.clone());
        }

        let id = state.next_id();
        let item = CartItem {
            cart_item_id: id,
            session_id: session_id.to_string(),
            product_id: product_id.to_string(),
            quantity,
            created_at: now(),
            updated_at: now(),
        };
        state.cart.push(item.clone());
        Ok(item)
    }

    async fn set_quantity(
        &self,
        session_id: &str,
        product_id: &str,
        quantity: i32,
    ) -> Result<Option<CartItem>, RepositoryError> {
        let mut state = self.state.lock().await;
        Ok(state
            .cart
            .iter_mut()
            .find(|c| c.session_id == session_id && c.product_id == product_id)
            .map(|item| {
                item.quantity = quantity;
                item.updated_at = now();
                item.clone()
            }))
    }

    async fn remove_item(
        &self,
        session_id: &str,
        product_id: &str,
    ) -> Result<bool, RepositoryError> {
        let mut state = self.state.lock().await;
        let before = state.cart.len();
        state
            .cart
            .retain(|c| !(c.session_id == session_id && c.product_id == product_id));
        Ok(state.cart.len() < before)
    }

    async fn transfer_cart(&self, from: &str, to: &str) -> Result<u64, RepositoryError> {
        let mut state = self.state.lock().await;
        let mut moved = 0;
        for item in state.cart.iter_mut().filter(|c| c.session_id == from) {
            item.session_id = to.to_string();
            moved += 1;
        }
        Ok(moved)
    }
}

#[async_trait]
impl OrderCommandRepositoryTrait for MemoryBackend {
    async fn record_checkout(&self, record: &CreateOrderRecord) -> Result<Order, RepositoryError> {
        let mut state = self.state.lock().await;

        if state.fail_next_checkout {
            state.fail_next_checkout = false;
            return Err(RepositoryError::Custom("simulated write failure".into()));
        }

        if state.orders.iter().any(|o| o.order_id == record.order_id) {
            return Err(RepositoryError::AlreadyExists(record.order_id.clone()));
        }

        let id = state.next_id();
        let order = Order {
            id,
            order_id: record.order_id.clone(),
            session_id: record.session_id.clone(),
            user_id: record.user_id,
            items: Json(record.items.clone()),
            total_amount: record.total_amount,
            status: record.status.as_str().to_string(),
            created_at: now(),
        };

        state.orders.push(order.clone());
        state.cart.retain(|c| c.session_id != record.session_id);

        Ok(order)
    }
}

#[async_trait]
impl OrderQueryRepositoryTrait for MemoryBackend {
    async fn find_by_session(&self, session_id: &str) -> Result<Vec<Order>, RepositoryError> {
        let state = self.state.lock().await;
        let mut orders: Vec<Order> = state
            .orders
            .iter()
            .filter(|o| o.session_id == session_id)
            .cloned()
            .collect();
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(orders)
    }

    async fn find_by_order_id(
        &self,
        session_id: &str,
        order_id: &str,
    ) -> Result<Option<Order>, RepositoryError> {
        let state = self.state.lock().await;
        Ok(state
            .orders
            .iter()
            .find(|o| o.order_id == order_id && o.session_id == session_id)
            .cloned())
    }
}

#[async_trait]
impl ContactRepositoryTrait for MemoryBackend {
    async fn create_message(&self, req: &ContactRequest) -> Result<ContactMessage, RepositoryError> {
        let mut state = self.state.lock().await;
        let id = state.next_id();
        let message = ContactMessage {
            id,
            name: req.name.clone(),
            email: req.email.clone(),
            subject: req.subject.clone(),
            message: req.message.clone(),
            is_read: false,
            created_at: now(),
        };
        state.contacts.push(message.clone());
        Ok(message)
    }
}

#[async_trait]
impl UserRepositoryTrait for MemoryBackend {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError> {
        let state = self.state.lock().await;
        Ok(state
            .users
            .iter()
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn find_by_id(&self, user_id: i64) -> Result<Option<User>, RepositoryError> {
        let state = self.state.lock().await;
        Ok(state.users.iter().find(|u| u.user_id == user_id).cloned())
    }

    async fn create_user(&self, record: &CreateUserRecord) -> Result<User, RepositoryError> {
        let mut state = self.state.lock().await;
        if state
            .users
            .iter()
            .any(|u| u.email.eq_ignore_ascii_case(&record.email))
        {
            return Err(RepositoryError::AlreadyExists(record.email.clone()));
        }
        let id = state.next_id();
        let user = User {
            user_id: id,
            name: record.name.clone(),
            email: record.email.clone(),
            password: record.password.clone(),
            created_at: now(),
        };
        state.users.push(user.clone());
        Ok(user)
    }
}

#[derive(Clone, Default)]
pub struct MemorySessionStore {
    sessions: Arc<Mutex<HashMap<String, Session>>>,
    counter: Arc<Mutex<u64>>,
}

impl MemorySessionStore {
    pub async fn len(&self) -> usize {
        self.sessions.lock().await.len()
    }

    pub async fn get(&self, session_id: &str) -> Option<Session> {
        self.sessions.lock().await.get(session_id).cloned()
    }
}

#[async_trait]
impl SessionStoreTrait for MemorySessionStore {
    async fn create_session(&self, user_id: Option<i64>) -> Result<Session, ServiceError> {
        let mut counter = self.counter.lock().await;
        *counter += 1;

        let mut session = Session::new(format!("test-session-{}", *counter));
        session.user_id = user_id;

        self.sessions
            .lock()
            .await
            .insert(session.session_id.clone(), session.clone());
        Ok(session)
    }

    async fn get_session(&self, session_id: &str) -> Result<Option<Session>, ServiceError> {
        Ok(self.sessions.lock().await.get(session_id).cloned())
    }

    async fn save_session(&self, session: &Session) -> Result<(), ServiceError> {
        self.sessions
            .lock()
            .await
            .insert(session.session_id.clone(), session.clone());
        Ok(())
    }

    async fn delete_session(&self, session_id: &str) -> Result<(), ServiceError> {
        self.sessions.lock().await.remove(session_id);
        Ok(())
    }
}

pub struct TestApp {
    pub state: AppState,
    pub backend: MemoryBackend,
    pub sessions: MemorySessionStore,
}

pub async fn test_app(pricing: PricingPolicy) -> TestApp {
    let backend = MemoryBackend::with_catalog().await;
    let sessions = MemorySessionStore::default();

    let deps = DependenciesInjectDeps {
        product_query: Arc::new(backend.clone()),
        cart_query: Arc::new(backend.clone()),
        cart_command: Arc::new(backend.clone()),
        order_query: Arc::new(backend.clone()),
        order_command: Arc::new(backend.clone()),
        contact: Arc::new(backend.clone()),
        user: Arc::new(backend.clone()),
        session_store: Arc::new(sessions.clone()),
        hashing: Arc::new(Hashing::with_cost(4)),
        pricing,
    };

    TestApp {
        state: AppState::from_deps(deps).await,
        backend,
        sessions,
    }
}
