//! Logging setup shared by the binaries of the workspace.

use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

/// Installs a global fmt subscriber writing to stderr.
///
/// `RUST_LOG` takes precedence over `default_directive` (e.g. `"info"`), so
/// operators can turn on `debug` for a single run without recompiling.
/// Calling this more than once is harmless; later calls are ignored.
pub fn init(default_directive: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .try_init();
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_twice_is_harmless() {
        super::init("warn");
        super::init("debug");
        tracing::info!("still logging");
    }
}
