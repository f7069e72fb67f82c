use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use distance_telemetry_core::prelude::*;

#[derive(Parser)]
#[command(
    name = "distance-telemetry",
    version,
    about = "Stream simulated Distance telemetry over UDP"
)]
struct Cli {
    /// Path to the JSON settings file (created with defaults if missing).
    #[arg(long, env = "DISTANCE_TELEMETRY_SETTINGS")]
    settings: Option<PathBuf>,

    /// Destination host, overriding the settings file.
    #[arg(long, env = "DISTANCE_TELEMETRY_HOST")]
    host: Option<String>,

    /// Destination port, overriding the settings file.
    #[arg(long, env = "DISTANCE_TELEMETRY_PORT", allow_negative_numbers = true)]
    port: Option<i32>,

    /// Records per second.
    #[arg(long, default_value_t = 60, value_parser = clap::value_parser!(u32).range(1..=1000))]
    rate: u32,

    /// Stop after this many seconds instead of waiting for Ctrl+C.
    #[arg(long)]
    duration: Option<u64>,

    /// Seed for a reproducible demo run.
    #[arg(long)]
    seed: Option<u64>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();

    let settings_path = cli
        .settings
        .clone()
        .unwrap_or_else(TelemetrySettings::default_path);
    tracing::info!(path = %settings_path.display(), "loading settings");
    let mut settings = TelemetrySettings::load_or_create(&settings_path)
        .with_context(|| format!("loading settings from {}", settings_path.display()))?;

    if let Some(host) = cli.host {
        settings.host = host;
    }
    if let Some(port) = cli.port {
        settings.port = port;
    }

    // A bad endpoint only disables telemetry; the loop keeps running
    let sender = TelemetrySender::create(&settings.endpoint());

    let period = Duration::from_secs_f64(1.0 / f64::from(cli.rate));
    let mut source = match cli.seed {
        Some(seed) => DemoSource::with_seed(seed),
        None => DemoSource::new(),
    };
    source.set_step_ms(period.as_millis() as u64);

    let mut driver = TelemetryDriver::new(source, sender);
    if !driver.is_enabled() {
        tracing::warn!("telemetry disabled for this session");
    }

    let mut interval = tokio::time::interval(period);
    interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    let duration = cli.duration;
    let deadline = async move {
        match duration {
            Some(secs) => tokio::time::sleep(Duration::from_secs(secs)).await,
            None => std::future::pending().await,
        }
    };
    tokio::pin!(deadline);

    tracing::info!(rate = cli.rate, "streaming started, press Ctrl+C to stop");

    loop {
        tokio::select! {
            _ = interval.tick() => {
                driver.tick();
            }
            _ = &mut deadline => {
                tracing::info!("duration elapsed");
                break;
            }
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("shutting down...");
                break;
            }
        }
    }

    let stats = driver.stats();
    driver.shutdown();
    if let Some(stats) = stats {
        tracing::info!(sent = stats.sent, dropped = stats.dropped, "telemetry session finished");
    }

    Ok(())
}
