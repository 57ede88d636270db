use crate::{
    abstract_trait::session::DynSessionStore,
    cache::SessionStore,
    config::Config,
    di::{DependenciesInject, DependenciesInjectDeps},
    repository::{
        CartCommandRepository, CartQueryRepository, ContactRepository, OrderCommandRepository,
        OrderQueryRepository, ProductQueryRepository, UserRepository,
    },
};
use anyhow::{Context, Result};
use chrono::Duration;
use prometheus_client::registry::Registry;
use shared::{
    abstract_trait::DynHashing,
    config::{ConnectionPool, Hashing, RedisClient},
    utils::{SystemMetrics, run_metrics_collector},
};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::info;

#[derive(Clone)]
pub struct AppState {
    pub di_container: DependenciesInject,
    pub registry: Arc<Mutex<Registry>>,
    pub system_metrics: Arc<SystemMetrics>,
}

impl AppState {
    pub async fn new(pool: ConnectionPool, config: &Config) -> Result<Self> {
        info!("Initializing Redis connection for session store");
        let redis = RedisClient::new(&config.redis).context("Failed to connect to Redis")?;

        redis
            .ping()
            .await
            .context("Failed to ping Redis server")?;

        let session_store = Arc::new(SessionStore::new(
            redis.pool.clone(),
            Duration::minutes(config.session_ttl_minutes),
        )) as DynSessionStore;

        let deps = DependenciesInjectDeps {
            product_query: Arc::new(ProductQueryRepository::new(pool.clone())),
            cart_query: Arc::new(CartQueryRepository::new(pool.clone())),
            cart_command: Arc::new(CartCommandRepository::new(pool.clone())),
            order_query: Arc::new(OrderQueryRepository::new(pool.clone())),
            order_command: Arc::new(OrderCommandRepository::new(pool.clone())),
            contact: Arc::new(ContactRepository::new(pool.clone())),
            user: Arc::new(UserRepository::new(pool)),
            session_store,
            hashing: Arc::new(Hashing::new()) as DynHashing,
            pricing: config.checkout_pricing,
        };

        let state = Self::from_deps(deps).await;

        tokio::spawn(run_metrics_collector(state.system_metrics.clone()));

        Ok(state)
    }

    /// Wires services over the given backends without touching the network.
    pub async fn from_deps(deps: DependenciesInjectDeps) -> Self {
        let registry = Arc::new(Mutex::new(Registry::default()));
        let system_metrics = Arc::new(SystemMetrics::new());

        let di_container = DependenciesInject::new(deps, registry.clone()).await;

        registry.lock().await.register_metrics(&system_metrics);

        Self {
            di_container,
            registry,
            system_metrics,
        }
    }
}

trait MetricsRegister {
    fn register_metrics(&mut self, metrics: &SystemMetrics);
}

impl MetricsRegister for Registry {
    fn register_metrics(&mut self, metrics: &SystemMetrics) {
        metrics.register(self);
    }
}
