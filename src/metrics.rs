use std::sync::OnceLock;

use opentelemetry::{
    KeyValue,
    global,
    metrics::{
        Counter,
        Gauge,
    },
};

static METRICS: OnceLock<Metrics> = OnceLock::new();

pub struct Metrics {
    pub inserted_members: Counter<u64>,
    pub resolves: Counter<u64>,
    pub points: Gauge<u64>,
}

/// Instruments on the global meter. They bind to whatever provider is
/// installed when first used, so `observability::init_otel_metrics` should
/// run before the first ring operation.
pub fn get() -> &'static Metrics {
    METRICS.get_or_init(|| {
        let meter = global::meter("consistent");

        Metrics {
            inserted_members: meter
                .u64_counter("ring_inserted_members_total")
                .with_description("Members inserted into hash rings")
                .build(),
            resolves: meter
                .u64_counter("ring_resolves_total")
                .with_description("Key lookups against hash rings")
                .build(),
            points: meter
                .u64_gauge("ring_points")
                .with_description("Virtual points on the most recently modified ring")
                .build(),
        }
    })
}

pub(crate) fn record_insert(members: usize, points: usize) {
    let m = get();
    m.inserted_members.add(members as u64, &[]);
    m.points.record(points as u64, &[]);
}

pub(crate) fn record_resolve(outcome: &'static str) {
    get().resolves.add(1, &[KeyValue::new("outcome", outcome)]);
}
