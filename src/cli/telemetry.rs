use anyhow::Result;
use opentelemetry::{global, trace::TracerProvider, KeyValue};
use opentelemetry_appender_tracing::layer::OpenTelemetryTracingBridge;
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::{runtime::Tokio, trace::Config, Resource};
use std::time::Duration;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{fmt, layer::SubscriberExt, EnvFilter, Registry};

const OTLP_EXPORT_TIMEOUT: Duration = Duration::from_secs(3);

/// Install the global tracing subscriber: JSON events on stdout plus OTLP
/// traces and logs.
/// # Errors
/// Will return an error if an OTLP pipeline or the subscriber fails to install
pub fn init(verbosity_level: tracing::Level) -> Result<()> {
    let trace_provider = opentelemetry_otlp::new_pipeline()
        .tracing()
        .with_exporter(
            opentelemetry_otlp::new_exporter()
                .tonic()
                .with_timeout(OTLP_EXPORT_TIMEOUT),
        )
        .with_trace_config(Config::default().with_resource(resource()))
        .install_batch(Tokio)?;

    let tracer = trace_provider
        .tracer_builder(env!("CARGO_PKG_NAME"))
        .with_version(env!("CARGO_PKG_VERSION"))
        .build();

    global::set_tracer_provider(trace_provider);

    let log_provider = opentelemetry_otlp::new_pipeline()
        .logging()
        .with_resource(resource())
        .with_exporter(
            opentelemetry_otlp::new_exporter()
                .tonic()
                .with_timeout(OTLP_EXPORT_TIMEOUT),
        )
        .install_batch(Tokio)?;

    let fmt_layer = fmt::layer()
        .with_file(true)
        .with_line_number(true)
        .with_target(false)
        .json();

    // RUST_LOG=
    let env_filter = EnvFilter::builder()
        .with_default_directive(verbosity_level.into())
        .from_env_lossy();

    let subscriber = Registry::default()
        .with(fmt_layer)
        .with(OpenTelemetryLayer::new(tracer))
        .with(OpenTelemetryTracingBridge::new(&log_provider))
        .with(env_filter);

    Ok(tracing::subscriber::set_global_default(subscriber)?)
}

fn resource() -> Resource {
    Resource::new(vec![
        KeyValue::new("service.name", env!("CARGO_PKG_NAME")),
        KeyValue::new("service.version", env!("CARGO_PKG_VERSION")),
    ])
}
