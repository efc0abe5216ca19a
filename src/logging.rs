use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize logging for the command-line tool.
///
/// Events go to stderr so stdout stays clean for `show` output. `RUST_LOG`
/// overrides the default level, which is `warn` or `debug` with `verbose`.
pub fn init_logging(verbose: bool) {
    let directive = if verbose { "casioplot=debug" } else { "casioplot=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directive));

    // A subscriber may already be installed when embedded in another program
    let _ = tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(filter)
        .try_init();
}
