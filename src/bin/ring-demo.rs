use std::collections::BTreeMap;

use anyhow::{
    Context,
    Result,
};
use clap::Parser;
use consistent::{
    RingStats,
    config::{
        OtelConfig,
        RingConfig,
        SentryConfig,
    },
    observability,
};
use serde::Serialize;
use tracing::info;

#[derive(Debug, Parser, Clone)]
#[command(name = "ring-demo", about = "Place members on a consistent hash ring and resolve sample keys.")]
struct Config {
    #[clap(flatten)]
    ring: RingConfig,

    #[clap(flatten)]
    sentry: SentryConfig,

    #[clap(flatten)]
    otel: OtelConfig,

    /// Members to insert, in order.
    #[arg(long, value_delimiter = ',', default_value = "aa,bb,cc")]
    members: Vec<String>,

    /// Keys to resolve.
    #[arg(long, value_delimiter = ',', default_value = "AAAA,BBBB,CCCC,DDDD,EEEE,FFFF")]
    keys: Vec<String>,

    /// Print resolutions and ring stats as JSON.
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct Report<'a> {
    owners: BTreeMap<&'a str, String>,
    ring: RingStats,
}

fn main() -> Result<()> {
    let config = Config::parse();
    let _sentry = observability::init_tracing_and_sentry(config.sentry.clone());
    observability::init_otel_metrics(config.otel.clone())
        .map_err(|e| anyhow::anyhow!(e))
        .context("Failed to initialize OpenTelemetry metrics")?;

    let ring = config.ring.to_builder().build().context("Invalid ring configuration")?;
    ring.insert(&config.members);
    info!(members = ?config.members, replicas = ring.replicas(), "Ring populated");

    let owners = config
        .keys
        .iter()
        .map(|key| {
            ring.resolve(key)
                .with_context(|| format!("Failed to resolve key {key}"))
        })
        .collect::<Result<Vec<_>>>()?;

    if config.json {
        let report = Report {
            owners: config.keys.iter().map(String::as_str).zip(owners).collect(),
            ring: ring.stats(),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", owners.join(" "));
    }

    Ok(())
}
