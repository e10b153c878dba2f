//! Logging integration for the modelgraph workspace.
//!
//! Provides a helper for configuring [`tracing`]-based logging. Schema
//! construction and connection resolution emit `debug!` events; callers
//! embedding modelgraph in a larger application will usually install their
//! own subscriber instead.

/// Sets up a global tracing subscriber.
///
/// `level` is an [`EnvFilter`](tracing_subscriber::EnvFilter) directive such
/// as `"debug"` or `"modelgraph_graphql=debug"`. When `pretty` is set a
/// human-readable format is used; otherwise output is structured JSON.
/// Installing a subscriber when one already exists is a no-op.
pub fn setup_logging(level: &str, pretty: bool) {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"));

    if pretty {
        fmt::Subscriber::builder()
            .with_env_filter(filter)
            .with_target(true)
            .pretty()
            .try_init()
            .ok();
    } else {
        fmt::Subscriber::builder()
            .with_env_filter(filter)
            .with_target(true)
            .json()
            .try_init()
            .ok();
    }
    tracing::debug!(%level, pretty, "logging configured");
}
