use prometheus_client::metrics::histogram::Histogram;
use prometheus_client::metrics::{counter::Counter, family::Family, gauge::Gauge};
use prometheus_client::registry::Registry;
use prometheus_client_derive_encode::{EncodeLabelSet, EncodeLabelValue};
use std::{
    sync::{Arc, atomic::AtomicU64},
    time::{Duration, SystemTime, UNIX_EPOCH},
};
use sysinfo::{Pid, ProcessesToUpdate, System};
use tokio::sync::Mutex;

const COLLECT_INTERVAL: Duration = Duration::from_secs(15);

/// Process-level gauges sampled by [`run_metrics_collector`].
#[derive(Debug)]
pub struct SystemMetrics {
    resident_memory_bytes: Gauge,
    virtual_memory_bytes: Gauge,
    host_available_memory_bytes: Gauge,
    host_cpu_usage_ratio: Gauge<f64, AtomicU64>,
    threads: Gauge,
    start_time_seconds: Gauge,
    sampler: Mutex<System>,
}

impl Default for SystemMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemMetrics {
    pub fn new() -> Self {
        let metrics = Self {
            resident_memory_bytes: Gauge::default(),
            virtual_memory_bytes: Gauge::default(),
            host_available_memory_bytes: Gauge::default(),
            host_cpu_usage_ratio: Gauge::default(),
            threads: Gauge::default(),
            start_time_seconds: Gauge::default(),
            sampler: Mutex::new(System::new()),
        };

        let started = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or_default();
        metrics.start_time_seconds.set(started as i64);

        metrics
    }

    pub fn register(&self, registry: &mut Registry) {
        let process = registry.sub_registry_with_prefix("process");
        process.register(
            "resident_memory_bytes",
            "Resident memory of the process in bytes",
            self.resident_memory_bytes.clone(),
        );
        process.register(
            "virtual_memory_bytes",
            "Virtual memory of the process in bytes",
            self.virtual_memory_bytes.clone(),
        );
        process.register(
            "threads",
            "Number of OS threads in the process",
            self.threads.clone(),
        );
        process.register(
            "start_time_seconds",
            "Start time of the process since unix epoch in seconds",
            self.start_time_seconds.clone(),
        );

        let host = registry.sub_registry_with_prefix("host");
        host.register(
            "available_memory_bytes",
            "Memory available to new processes in bytes",
            self.host_available_memory_bytes.clone(),
        );
        host.register(
            "cpu_usage_ratio",
            "Global CPU usage between 0 and 1",
            self.host_cpu_usage_ratio.clone(),
        );
    }

    pub async fn update_metrics(&self) {
        let pid = Pid::from_u32(std::process::id());
        let mut sys = self.sampler.lock().await;

        sys.refresh_memory();
        sys.refresh_cpu_usage();
        sys.refresh_processes(ProcessesToUpdate::Some(&[pid]), true);

        self.host_available_memory_bytes
            .set(sys.available_memory() as i64);
        self.host_cpu_usage_ratio
            .set(f64::from(sys.global_cpu_usage()) / 100.0);

        if let Some(process) = sys.process(pid) {
            self.resident_memory_bytes.set(process.memory() as i64);
            self.virtual_memory_bytes
                .set(process.virtual_memory() as i64);
            if let Some(tasks) = process.tasks() {
                self.threads.set(tasks.len() as i64);
            }
        }
    }
}

#[derive(Clone, Debug, Hash, PartialEq, Eq, EncodeLabelValue)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

#[derive(Clone, Debug, Hash, PartialEq, Eq, EncodeLabelValue)]
pub enum Status {
    Success,
    Error,
}

#[derive(Clone, Debug, Hash, PartialEq, Eq, EncodeLabelSet)]
pub struct Labels {
    pub method: Method,
    pub status: Status,
}

#[derive(Clone, Debug)]
pub struct Metrics {
    pub request_counter: Family<Labels, Counter>,
    pub request_duration: Family<Labels, Histogram>,
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Metrics {
    pub fn new() -> Self {
        Self {
            request_counter: Family::default(),
            request_duration: Family::new_with_constructor(|| {
                Histogram::new(vec![
                    0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0,
                ])
            }),
        }
    }

    pub fn record(&self, method: Method, status: Status, duration_secs: f64) {
        let labels = Labels { method, status };
        self.request_counter.get_or_create(&labels).inc();
        self.request_duration
            .get_or_create(&labels)
            .observe(duration_secs);
    }
}

pub async fn run_metrics_collector(system_metrics: Arc<SystemMetrics>) {
    let mut interval = tokio::time::interval(COLLECT_INTERVAL);
    loop {
        interval.tick().await;
        system_metrics.update_metrics().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prometheus_client::encoding::text::encode;

    #[test]
    fn recorded_requests_show_up_in_registry() {
        let metrics = Metrics::new();
        let mut registry = Registry::default();
        registry.register(
            "cart_service_request_counter",
            "Total number of requests to the CartService",
            metrics.request_counter.clone(),
        );

        metrics.record(Method::Post, Status::Success, 0.01);
        metrics.record(Method::Post, Status::Success, 0.02);
        metrics.record(Method::Delete, Status::Error, 0.03);

        let mut buffer = String::new();
        encode(&mut buffer, &registry).unwrap();

        assert!(buffer.contains(r#"method="Post",status="Success"} 2"#));
        assert!(buffer.contains(r#"method="Delete",status="Error"} 1"#));
    }

    #[tokio::test]
    async fn system_metrics_are_prefixed_by_scope() {
        let metrics = SystemMetrics::new();
        let mut registry = Registry::default();
        metrics.register(&mut registry);
        metrics.update_metrics().await;

        let mut buffer = String::new();
        encode(&mut buffer, &registry).unwrap();

        assert!(buffer.contains("process_start_time_seconds"));
        assert!(buffer.contains("process_resident_memory_bytes"));
        assert!(buffer.contains("host_cpu_usage_ratio"));
    }
}
