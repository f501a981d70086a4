use tracing_subscriber::{
    fmt::format::Format, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};

const DEFAULT_FILTER: &str =
    "quicklify=debug,quicklify_api=debug,quicklify_storage=debug,tower_http=info";

/// Initialize tracing with a compact console format.
///
/// `RUST_LOG` overrides the default filter.
pub fn init_telemetry() {
    let console_fmt = tracing_subscriber::fmt::layer().event_format(
        Format::default()
            .compact()
            .with_target(false)
            .without_time(),
    );

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_FILTER.into()))
        .with(console_fmt)
        .init();

    tracing::debug!("Tracing initialized");
}
