use prometheus_client::registry::Registry;
use shared::abstract_trait::DynHashing;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::{
    abstract_trait::{
        cart::{DynCartCommandRepository, DynCartQueryRepository, DynCartService},
        contact::{DynContactRepository, DynContactService},
        order::{DynOrderCommandRepository, DynOrderQueryRepository, DynOrderService},
        product::{DynProductQueryRepository, DynProductService},
        session::DynSessionStore,
        user::{DynAuthService, DynUserRepository},
    },
    config::PricingPolicy,
    service::{AuthService, CartService, ContactService, OrderService, ProductService},
};

/// Storage backends the services are built on. Postgres and Redis in production,
/// in-memory doubles in tests.
#[derive(Clone)]
pub struct DependenciesInjectDeps {
    pub product_query: DynProductQueryRepository,
    pub cart_query: DynCartQueryRepository,
    pub cart_command: DynCartCommandRepository,
    pub order_query: DynOrderQueryRepository,
    pub order_command: DynOrderCommandRepository,
    pub contact: DynContactRepository,
    pub user: DynUserRepository,
    pub session_store: DynSessionStore,
    pub hashing: DynHashing,
    pub pricing: PricingPolicy,
}

#[derive(Clone)]
pub struct DependenciesInject {
    pub product_service: DynProductService,
    pub cart_service: DynCartService,
    pub order_service: DynOrderService,
    pub contact_service: DynContactService,
    pub auth_service: DynAuthService,
    pub session_store: DynSessionStore,
}

impl std::fmt::Debug for DependenciesInject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DependenciesInject")
            .field("product_service", &"DynProductService")
            .field("cart_service", &"DynCartService")
            .field("order_service", &"DynOrderService")
            .field("contact_service", &"DynContactService")
            .field("auth_service", &"DynAuthService")
            .field("session_store", &"DynSessionStore")
            .finish()
    }
}

impl DependenciesInject {
    pub async fn new(deps: DependenciesInjectDeps, registry: Arc<Mutex<Registry>>) -> Self {
        let DependenciesInjectDeps {
            product_query,
            cart_query,
            cart_command,
            order_query,
            order_command,
            contact,
            user,
            session_store,
            hashing,
            pricing,
        } = deps;

        let product_service: DynProductService =
            Arc::new(ProductService::new(product_query.clone(), registry.clone()).await);

        let cart_service: DynCartService = Arc::new(
            CartService::new(
                cart_query,
                cart_command.clone(),
                product_query.clone(),
                registry.clone(),
            )
            .await,
        );

        let order_service: DynOrderService = Arc::new(
            OrderService::new(
                order_query,
                order_command,
                product_query,
                pricing,
                registry.clone(),
            )
            .await,
        );

        let contact_service: DynContactService =
            Arc::new(ContactService::new(contact, registry.clone()).await);

        let auth_service: DynAuthService = Arc::new(
            AuthService::new(
                user,
                session_store.clone(),
                cart_command.clone(),
                hashing,
                registry.clone(),
            ).await,
        );

        Self {
            product_service,
            cart_service,
            order_service,
            contact_service,
            auth_service,
            session_store,
        }
    }
}
