//! Structured logging setup.
//!
//! The library only emits `tracing` events; binaries and tests that want to
//! see them call [`init_tracing`] once.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::{Error, Result};

/// Environment variable overriding the computed filter.
pub const LOG_ENV: &str = "QUALGRAPH_LOG";

/// Install a global subscriber writing to stderr.
///
/// `level` wins over `verbose`; a bare level such as `"trace"` is scoped to
/// this crate, a full directive (`"qualgraph::solver=trace"`) is used as is.
pub fn init_tracing(verbose: bool, level: Option<&str>, json: bool) -> Result<()> {
    let directive = match (verbose, level) {
        (_, Some(level)) => scoped(level),
        (true, None) => "qualgraph=debug".to_string(),
        (false, None) => "qualgraph=warn".to_string(),
    };

    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(directive));
    let registry = tracing_subscriber::registry().with(filter);

    let installed = if json {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr).with_ansi(false))
            .try_init()
    } else {
        registry
            .with(
                fmt::layer()
                    .compact()
                    .with_target(false)
                    .with_writer(std::io::stderr)
                    .with_ansi(false),
            )
            .try_init()
    };

    installed.map_err(|e| Error::Config(format!("tracing init failed: {e}")))
}

fn scoped(level: &str) -> String {
    if level.contains('=') {
        level.to_string()
    } else {
        format!("qualgraph={level}")
    }
}
