mod gracefullshutdown;
mod instrument;
mod logs;
mod metrics;
mod otel;
mod random_string;

pub use self::gracefullshutdown::shutdown_signal;
pub use self::instrument::{ServiceTracing, TracingContext};
pub use self::logs::init_logger;
pub use self::metrics::{Method, Metrics, Status, SystemMetrics, run_metrics_collector};
pub use self::otel::Telemetry;
pub use self::random_string::generate_random_string;
