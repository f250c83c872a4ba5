//! Tracing setup for binaries and tests embedding the pipeline

use tracing::Subscriber;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Filter from `RUST_LOG`, falling back to `default`
pub fn env_filter(default: &str) -> Result<EnvFilter, tracing_subscriber::filter::ParseError> {
    EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(default))
}

/// Compact subscriber writing formatted events to `writer`.
///
/// Scanner and reinsertion summaries are emitted at debug level under the
/// `shield_scan` and `shield_doc` targets; host failures at warn level under
/// `shield_core`.
pub fn subscriber<W>(filter: EnvFilter, writer: W) -> impl Subscriber + Send + Sync
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let fmt_layer = fmt::layer()
        .with_target(true)
        .with_level(true)
        .with_writer(writer)
        .compact();

    tracing_subscriber::registry().with(filter).with(fmt_layer)
}

/// Initialize the global subscriber.
///
/// Uses the `RUST_LOG` environment variable to determine the log level,
/// defaulting to "info" if not set, and writes to stderr.
pub fn init() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    subscriber(env_filter("info")?, std::io::stderr).try_init()?;
    Ok(())
}
