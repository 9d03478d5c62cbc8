//! Process-wide request counters and latency histogram.
//!
//! Counters live in memory only: they start empty at process start and reset
//! on restart. Mutation goes through a single mutex so concurrent request
//! workers never lose updates, and rendering is deterministic: label sets are
//! kept in sorted maps, so repeated scrapes within one process lifetime
//! always emit lines in the same order.

use std::collections::BTreeMap;
use std::fmt::Write;
use std::sync::{LazyLock, Mutex};

/// Latency histogram bucket upper bounds in milliseconds.
///
/// Buckets are cumulative: an observation increments every bucket whose
/// bound is >= the observed value, plus the `+Inf` bucket.
pub const LATENCY_BUCKETS_MS: [u64; 10] = [10, 25, 50, 100, 250, 500, 1000, 2500, 5000, 10000];

#[derive(Default)]
struct RegistryInner {
    http_requests: BTreeMap<(String, u16), u64>,
    webhook_requests: BTreeMap<String, u64>,
    latency_buckets: [u64; LATENCY_BUCKETS_MS.len()],
    latency_inf: u64,
    latency_count: u64,
    latency_sum_ms: f64,
}

pub struct MetricsRegistry {
    inner: Mutex<RegistryInner>,
}

impl Default for MetricsRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl MetricsRegistry {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(RegistryInner::default()),
        }
    }

    pub fn inc_http_requests(&self, path: &str, status: u16) {
        let mut inner = self.inner.lock().expect("metrics mutex poisoned");
        *inner
            .http_requests
            .entry((path.to_string(), status))
            .or_insert(0) += 1;
    }

    pub fn inc_webhook_requests(&self, result: &str) {
        let mut inner = self.inner.lock().expect("metrics mutex poisoned");
        *inner.webhook_requests.entry(result.to_string()).or_insert(0) += 1;
    }

    pub fn observe_latency(&self, latency_ms: f64) {
        let mut inner = self.inner.lock().expect("metrics mutex poisoned");
        inner.latency_count += 1;
        inner.latency_sum_ms += latency_ms;

        for (slot, bound) in LATENCY_BUCKETS_MS.iter().enumerate() {
            if latency_ms <= *bound as f64 {
                inner.latency_buckets[slot] += 1;
            }
        }
        inner.latency_inf += 1;
    }

    /// Renders all counters and the histogram in Prometheus text exposition
    /// format.
    pub fn render_prometheus(&self) -> String {
        let inner = self.inner.lock().expect("metrics mutex poisoned");
        let mut out = String::new();

        out.push_str("# HELP http_requests_total Total HTTP requests\n");
        out.push_str("# TYPE http_requests_total counter\n");
        for ((path, status), count) in &inner.http_requests {
            let _ = writeln!(
                out,
                "http_requests_total{{path=\"{path}\",status=\"{status}\"}} {count}"
            );
        }

        out.push('\n');
        out.push_str("# HELP webhook_requests_total Total webhook requests by result\n");
        out.push_str("# TYPE webhook_requests_total counter\n");
        for (result, count) in &inner.webhook_requests {
            let _ = writeln!(out, "webhook_requests_total{{result=\"{result}\"}} {count}");
        }

        out.push('\n');
        out.push_str("# HELP request_latency_ms Request latency in milliseconds\n");
        out.push_str("# TYPE request_latency_ms histogram\n");
        for (slot, bound) in LATENCY_BUCKETS_MS.iter().enumerate() {
            let _ = writeln!(
                out,
                "request_latency_ms_bucket{{le=\"{bound}\"}} {}",
                inner.latency_buckets[slot]
            );
        }
        let _ = writeln!(
            out,
            "request_latency_ms_bucket{{le=\"+Inf\"}} {}",
            inner.latency_inf
        );
        let _ = writeln!(out, "request_latency_ms_count {}", inner.latency_count);
        let _ = writeln!(out, "request_latency_ms_sum {:.2}", inner.latency_sum_ms);

        out
    }
}

static REGISTRY: LazyLock<MetricsRegistry> = LazyLock::new(MetricsRegistry::new);

pub fn inc_http_requests(path: &str, status: u16) {
    REGISTRY.inc_http_requests(path, status)
}

pub fn inc_webhook_requests(result: &str) {
    REGISTRY.inc_webhook_requests(result)
}

pub fn observe_latency(latency_ms: f64) {
    REGISTRY.observe_latency(latency_ms)
}

pub fn render_prometheus() -> String {
    REGISTRY.render_prometheus()
}
