//! Subscriber setup: `EnvFilter` plus an OpenTelemetry layer exporting to file.

use opentelemetry::trace::TracerProvider as _;
use opentelemetry::KeyValue;
use opentelemetry_sdk::resource::Resource;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use super::tracer;
use crate::infrastructure::paths::get_data_dir;
use crate::Config;

/// Service and instrumentation scope name reported on every span.
pub const SERVICE_NAME: &str = "userdeck";

/// File name of the OTLP trace log inside the data directory.
pub const TRACE_FILE_NAME: &str = "userdeck-otlp.json";

/// Level used when `trace_level` is not configured.
pub const DEFAULT_TRACE_LEVEL: &str = "info";

/// Installs the global subscriber writing spans to
/// `/host/.local/share/zellij/userdeck/userdeck-otlp.json`.
///
/// Tracing is best effort: if the data directory cannot be created the plugin
/// runs untraced. Only the first call installs a subscriber.
pub fn init_tracing(config: &Config) {
    let level = config.trace_level.as_deref().unwrap_or(DEFAULT_TRACE_LEVEL);

    let data_dir = get_data_dir();
    if std::fs::create_dir_all(&data_dir).is_err() {
        return;
    }

    let resource = Resource::new(vec![
        KeyValue::new("service.name", SERVICE_NAME),
        KeyValue::new("service.version", env!("CARGO_PKG_VERSION")),
    ]);

    let provider = tracer::create_tracer_provider(data_dir.join(TRACE_FILE_NAME), resource, SERVICE_NAME);
    let otel_layer = OpenTelemetryLayer::new(provider.tracer(SERVICE_NAME));

    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new(DEFAULT_TRACE_LEVEL));

    let _ = tracing_subscriber::registry().with(filter).with(otel_layer).try_init();
}
