use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Diagnostics go to stderr so stdout stays clean for tables and JSON.
/// `RUST_LOG` wins over the built-in level.
pub fn init_tracing(verbose: bool) {
    let default_level = if verbose {
        "warn,rebate_cli=debug,rebate_ingest=debug"
    } else {
        "warn,rebate_cli=info,rebate_ingest=info"
    };
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));
    let stderr_layer = fmt::layer().with_writer(std::io::stderr).with_target(verbose);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .init();
}
