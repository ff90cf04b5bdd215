//! Logging setup for the CLI.
//!
//! Logs go to stderr so stdout stays clean for `export`. `RUST_LOG` wins when
//! set; otherwise `-v` raises the default `orgcost=warn` to `info` and `-vv`
//! to `debug`.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Default filter directive for a `-v` count.
pub fn default_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "orgcost=warn",
        1 => "orgcost=info",
        2 => "orgcost=debug",
        _ => "orgcost=trace",
    }
}

/// Installs the global subscriber. Later calls are no-ops.
pub fn init(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(true))
        .try_init();
}
