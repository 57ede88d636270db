mod auth;
mod cart;
mod contact;
mod order;
mod product;

pub use self::auth::AuthService;
pub use self::cart::{CartService, merge_duplicate_lines};
pub use self::contact::ContactService;
pub use self::order::{OrderService, generate_order_id};
pub use self::product::ProductService;

use prometheus_client::registry::Registry;
use shared::utils::{Metrics, ServiceTracing};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Registers a fresh request counter and duration histogram for one service.
async fn register_service_tracing(
    tracer_name: &'static str,
    metric_prefix: &str,
    registry: &Arc<Mutex<Registry>>,
) -> ServiceTracing {
    let metrics = Metrics::new();

    let mut registry = registry.lock().await;
    registry.register(
        format!("{metric_prefix}_request_counter"),
        format!("Total number of requests to the {tracer_name}"),
        metrics.request_counter.clone(),
    );
    registry.register(
        format!("{metric_prefix}_request_duration"),
        format!("Histogram of request durations for the {tracer_name}"),
        metrics.request_duration.clone(),
    );

    ServiceTracing::new(tracer_name, Arc::new(Mutex::new(metrics)))
}
