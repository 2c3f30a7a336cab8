use prometheus::{Encoder, Histogram, IntCounterVec, Opts, Registry, TextEncoder};

#[derive(Clone)]
pub struct Metrics {
    registry: Registry,
    pub remote_writes_total: IntCounterVec,
    pub snapshots_applied_total: IntCounterVec,
    pub nested_reads_total: IntCounterVec,
    pub driver_hydration_seconds: Histogram,
}

impl Metrics {
    pub fn new() -> Self {
        let registry = Registry::new();

        let remote_writes_total = IntCounterVec::new(
            Opts::new(
                "remote_writes_total",
                "Remote document writes by collection and outcome",
            ),
            &["collection", "outcome"],
        )
        .expect("valid remote_writes_total metric");

        let snapshots_applied_total = IntCounterVec::new(
            Opts::new(
                "snapshots_applied_total",
                "Collection snapshots applied to the in-memory store",
            ),
            &["collection"],
        )
        .expect("valid snapshots_applied_total metric");

        let nested_reads_total = IntCounterVec::new(
            Opts::new("nested_reads_total", "Driver sub-list reads by outcome"),
            &["outcome"],
        )
        .expect("valid nested_reads_total metric");

        let driver_hydration_seconds = Histogram::with_opts(prometheus::HistogramOpts::new(
            "driver_hydration_seconds",
            "Latency of a full driver snapshot hydration in seconds",
        ))
        .expect("valid driver_hydration_seconds metric");

        registry
            .register(Box::new(remote_writes_total.clone()))
            .expect("register remote_writes_total");
        registry
            .register(Box::new(snapshots_applied_total.clone()))
            .expect("register snapshots_applied_total");
        registry
            .register(Box::new(nested_reads_total.clone()))
            .expect("register nested_reads_total");
        registry
            .register(Box::new(driver_hydration_seconds.clone()))
            .expect("register driver_hydration_seconds");

        Self {
            registry,
            remote_writes_total,
            snapshots_applied_total,
            nested_reads_total,
            driver_hydration_seconds,
        }
    }

    pub fn encode(&self) -> Result<String, String> {
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();

        TextEncoder::new()
            .encode(&metric_families, &mut buffer)
            .map_err(|err| format!("failed to encode metrics: {err}"))?;

        String::from_utf8(buffer).map_err(|err| format!("metrics are not valid utf8: {err}"))
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}
