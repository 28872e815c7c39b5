use crate::error::TelemetryError;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::trace::SdkTracerProvider;
use opentelemetry_sdk::Resource;
use std::fmt;
use tracing::warn;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{fmt as fmt_layer, EnvFilter};
use typed_builder::TypedBuilder;

pub const DEFAULT_FILTER: &str = "info";

/// Shape of the lines written to stdout.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogFormat::Text => f.write_str("text"),
            LogFormat::Json => f.write_str("json"),
        }
    }
}

#[derive(Debug, Clone, TypedBuilder)]
pub struct TelemetrySettings {
    /// Reported as `service.name` on exported spans.
    #[builder(setter(into))]
    pub service_name: String,
    #[builder(default)]
    pub format: LogFormat,
    /// OTLP gRPC collector. Spans are only exported when this is set.
    #[builder(default, setter(strip_option, into))]
    pub otlp_endpoint: Option<String>,
    /// Used when `RUST_LOG` is unset or unparsable.
    #[builder(default = DEFAULT_FILTER.to_string(), setter(into))]
    pub default_filter: String,
}

/// Keeps the span exporter alive. Dropping it flushes pending spans.
#[must_use = "dropping the guard shuts the span exporter down"]
pub struct TelemetryGuard {
    provider: Option<SdkTracerProvider>,
}

impl TelemetryGuard {
    pub fn exports_spans(&self) -> bool {
        self.provider.is_some()
    }
}

impl Drop for TelemetryGuard {
    fn drop(&mut self) {
        if let Some(provider) = self.provider.take() {
            if let Err(err) = provider.shutdown() {
                warn!(error = %err, "failed to flush span exporter");
            }
        }
    }
}

/// Installs the global subscriber and bridges `log` records into it.
///
/// Can only succeed once per process.
pub fn init(settings: TelemetrySettings) -> Result<TelemetryGuard, TelemetryError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.default_filter));

    let (text, json) = match settings.format {
        LogFormat::Text => (Some(fmt_layer::layer()), None),
        LogFormat::Json => (None, Some(fmt_layer::layer().json())),
    };

    let provider = match &settings.otlp_endpoint {
        Some(endpoint) => Some(tracer_provider(&settings.service_name, endpoint)?),
        None => None,
    };
    let otel = provider.as_ref().map(|provider| {
        tracing_opentelemetry::layer().with_tracer(provider.tracer(settings.service_name.clone()))
    });

    let subscriber = tracing_subscriber::registry()
        .with(filter)
        .with(text)
        .with(json)
        .with(otel);

    tracing::subscriber::set_global_default(subscriber)?;
    tracing_log::LogTracer::init()?;

    Ok(TelemetryGuard { provider })
}

fn tracer_provider(
    service_name: &str,
    endpoint: &str,
) -> Result<SdkTracerProvider, TelemetryError> {
    let exporter = opentelemetry_otlp::SpanExporter::builder()
        .with_tonic()
        .with_endpoint(endpoint)
        .build()
        .map_err(|err| TelemetryError::Exporter(err.to_string()))?;

    Ok(SdkTracerProvider::builder()
        .with_batch_exporter(exporter)
        .with_resource(
            Resource::builder()
                .with_service_name(service_name.to_string())
                .build(),
        )
        .build())
}
