use clap::Parser;

use crate::consistent_hashring::{
    DEFAULT_REPLICAS,
    RingBuilder,
};

#[derive(Debug, Parser, Clone)]
pub struct SentryConfig {
    #[arg(long, env = "SENTRY_DSN", default_value = "")]
    pub dsn: String,

    #[arg(long, env = "SENTRY_SAMPLE_RATE", default_value = "0.0")]
    pub sample_rate: f32,
}

#[derive(Debug, Parser, Clone)]
pub struct OtelConfig {
    #[arg(long, env = "OTEL_EXPORTER_OTLP_ENDPOINT", default_value = "")]
    pub endpoint: String,
}

#[derive(Debug, Parser, Clone)]
pub struct RingConfig {
    /// Virtual points placed on the ring per member.
    #[arg(long, env = "RING_REPLICAS", default_value_t = DEFAULT_REPLICAS)]
    pub replicas: usize,
}

impl RingConfig {
    /// Builder with the configured replica count and the default hasher.
    /// Validation happens in `RingBuilder::build`.
    pub fn to_builder(&self) -> RingBuilder {
        RingBuilder::default().replicas(self.replicas)
    }
}
