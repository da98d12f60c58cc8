use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Install the global tracing subscriber.
///
/// Logs go to stderr so stdout stays free for tables and JSON output.
/// `RUST_LOG` takes precedence over the default directive.
pub fn init_logging(verbose: bool) {
    let default_directive = if verbose {
        "gsmarena_catalog=debug"
    } else {
        "gsmarena_catalog=info"
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    let console_layer = fmt::layer().with_writer(std::io::stderr).with_target(false);

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .try_init();
}
