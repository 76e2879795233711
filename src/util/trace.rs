//! Initialises logging for the `roadmend` binary.
//!
//! Filtering is taken from the environment, for example:
//! ```bash
//! RUST_LOG=roadmend=debug,info
//! ```

/// Initialises the `log` backend. Defaults to `info` when `RUST_LOG` is unset.
/// Calling this more than once is harmless.
pub fn initialize_logger() {
    let env = env_logger::Env::default().default_filter_or("info");
    let _ = env_logger::Builder::from_env(env).try_init();
}

/// Initialises the tracer, using tracing subscription.
/// This is optional, not calling this function will simply
/// not log spans.
#[cfg(feature = "tracing")]
pub fn initialize_tracer() {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let fmt_layer = tracing_subscriber::fmt::layer();

    // `tracing-log` bridges the `log` records of the engines into the registry.
    let _ = tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(fmt_layer)
        .try_init();
}
