use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Initialize a tracing subscriber writing compact logs to stderr.
///
/// `RUST_LOG` takes precedence; otherwise the level is `debug` when
/// `verbose` is set and `warn` when it is not.
pub fn init(verbose: bool) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .compact();

    let default_level = if verbose { "debug" } else { "warn" };
    let filter_layer =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(default_level))?;

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
