use crate::config::Config;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Registry};

pub const AVAILABILITY_QUERIES_TOTAL: &str = "hotelier_availability_queries_total";
pub const BOOKINGS_CREATED_TOTAL: &str = "hotelier_bookings_created_total";
pub const BOOKING_CONFLICTS_TOTAL: &str = "hotelier_booking_conflicts_total";
pub const PRICE_RESOLUTIONS_TOTAL: &str = "hotelier_price_resolutions_total";

pub fn init(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    init_tracing()?;
    init_metrics(config)?;
    Ok(())
}

fn init_tracing() -> Result<(), Box<dyn std::error::Error>> {
    let fmt_layer = tracing_subscriber::fmt::layer().with_target(true);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "hotelier=debug,tower_http=debug".into());

    Registry::default()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}

fn init_metrics(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let Some(port) = config.metrics_port else {
        tracing::info!("METRICS_PORT not set, Prometheus exporter disabled");
        return Ok(());
    };

    metrics_exporter_prometheus::PrometheusBuilder::new()
        .with_http_listener(([0, 0, 0, 0], port))
        .install()?;

    tracing::info!("Metrics exporter (Prometheus) started on port {}", port);
    Ok(())
}

pub fn record_availability_query(rooms_found: usize) {
    let outcome = if rooms_found == 0 { "none" } else { "found" };
    metrics::counter!(AVAILABILITY_QUERIES_TOTAL, "outcome" => outcome).increment(1);
}

pub fn record_price_resolution(source: &'static str) {
    metrics::counter!(PRICE_RESOLUTIONS_TOTAL, "source" => source).increment(1);
}

pub fn record_booking_created() {
    metrics::counter!(BOOKINGS_CREATED_TOTAL).increment(1);
}

pub fn record_booking_conflict() {
    metrics::counter!(BOOKING_CONFLICTS_TOTAL).increment(1);
}
