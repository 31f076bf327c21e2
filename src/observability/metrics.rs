use prometheus::{
    Encoder, Gauge, Histogram, IntCounterVec, IntGauge, Opts, Registry, TextEncoder,
};

#[derive(Clone)]
pub struct Metrics {
    registry: Registry,
    pub positions_total: IntCounterVec,
    pub commands_in_queue: IntGauge,
    pub rentals_active: IntGauge,
    pub tick_latency_seconds: Histogram,
    pub replay_progress: Gauge,
}

impl Metrics {
    pub fn new() -> Self {
        let registry = Registry::new();

        let positions_total = IntCounterVec::new(
            Opts::new("positions_total", "Interpolated positions by outcome"),
            &["outcome"],
        )
        .expect("valid positions_total metric");

        let commands_in_queue =
            IntGauge::new("commands_in_queue", "Playback commands awaiting the engine")
                .expect("valid commands_in_queue metric");

        let rentals_active = IntGauge::new(
            "rentals_active",
            "Rentals in flight at the current replay instant",
        )
        .expect("valid rentals_active metric");

        let tick_latency_seconds = Histogram::with_opts(prometheus::HistogramOpts::new(
            "tick_latency_seconds",
            "Latency of one replay tick in seconds",
        ))
        .expect("valid tick_latency_seconds metric");

        let replay_progress = Gauge::new(
            "replay_progress",
            "Fraction of the replay window covered [0..1]",
        )
        .expect("valid replay_progress metric");

        registry
            .register(Box::new(positions_total.clone()))
            .expect("register positions_total");
        registry
            .register(Box::new(commands_in_queue.clone()))
            .expect("register commands_in_queue");
        registry
            .register(Box::new(rentals_active.clone()))
            .expect("register rentals_active");
        registry
            .register(Box::new(tick_latency_seconds.clone()))
            .expect("register tick_latency_seconds");
        registry
            .register(Box::new(replay_progress.clone()))
            .expect("register replay_progress");

        Self {
            registry,
            positions_total,
            commands_in_queue,
            rentals_active,
            tick_latency_seconds,
            replay_progress,
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
