use prometheus::{
    Encoder, HistogramOpts, HistogramVec, IntCounter, IntCounterVec, Opts, Registry, TextEncoder,
};

#[derive(Clone)]
pub struct Metrics {
    registry: Registry,
    pub page_views_total: IntCounterVec,
    pub page_render_seconds: HistogramVec,
    pub store_fallbacks_total: IntCounter,
    pub vehicle_writes_total: IntCounterVec,
}

impl Metrics {
    pub fn new() -> Self {
        let registry = Registry::new();

        let page_views_total = IntCounterVec::new(
            Opts::new("page_views_total", "Public page views by page"),
            &["page"],
        )
        .expect("valid page_views_total metric");

        let page_render_seconds = HistogramVec::new(
            HistogramOpts::new("page_render_seconds", "Time spent building a page in seconds"),
            &["page"],
        )
        .expect("valid page_render_seconds metric");

        let store_fallbacks_total = IntCounter::new(
            "store_fallbacks_total",
            "Page requests served with an empty fleet because the store was unavailable",
        )
        .expect("valid store_fallbacks_total metric");

        let vehicle_writes_total = IntCounterVec::new(
            Opts::new("vehicle_writes_total", "Vehicle writes by operation"),
            &["operation"],
        )
        .expect("valid vehicle_writes_total metric");

        registry
            .register(Box::new(page_views_total.clone()))
            .expect("register page_views_total");
        registry
            .register(Box::new(page_render_seconds.clone()))
            .expect("register page_render_seconds");
        registry
            .register(Box::new(store_fallbacks_total.clone()))
            .expect("register store_fallbacks_total");
        registry
            .register(Box::new(vehicle_writes_total.clone()))
            .expect("register vehicle_writes_total");

        Self {
            registry,
            page_views_total,
            page_render_seconds,
            store_fallbacks_total,
            vehicle_writes_total,
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
