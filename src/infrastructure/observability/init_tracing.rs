use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};
use tracing_subscriber::{EnvFilter, fmt};

use super::TracingConfig;

fn env_filter(config: &TracingConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "{level},stock_analyzer={level},tower_http=debug",
            level = config.level
        ))
    })
}

/// Installs the global subscriber. `RUST_LOG` takes precedence over the
/// configured level. Fails if a subscriber is already installed.
pub fn init_tracing(config: TracingConfig, port: u16) -> Result<(), TryInitError> {
    let registry = tracing_subscriber::registry().with(env_filter(&config));
    let fmt_layer = fmt::layer()
        .with_target(true)
        .with_file(true)
        .with_line_number(true);

    if config.json_format {
        registry.with(fmt_layer.json().flatten_event(true)).try_init()?;
    } else {
        registry.with(fmt_layer).try_init()?;
    }

    tracing::info!(
        port,
        environment = %config.environment,
        level = %config.level,
        json_format = config.json_format,
        "Tracing initialized"
    );
    Ok(())
}
