//! Global tracing subscriber setup

use std::io::IsTerminal;
use std::sync::OnceLock;

use tracing_subscriber::{EnvFilter, Registry, layer::SubscriberExt, util::SubscriberInitExt};

static INITIALISED: OnceLock<()> = OnceLock::new();

/// Install the fmt subscriber once per process
///
/// `RUST_LOG` takes precedence; otherwise `default_level` is used. Events go to
/// stderr so they interleave with progress bars instead of the output files.
/// Returns `false` if a subscriber was already installed.
pub fn init_tracing(default_level: &str) -> bool {
    if INITIALISED.set(()).is_err() {
        return false;
    }

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_ansi(std::io::stderr().is_terminal())
        .with_writer(std::io::stderr);

    Registry::default()
        .with(filter)
        .with(fmt_layer)
        .try_init()
        .is_ok()
}

/// Log level used when `RUST_LOG` is unset
pub const fn default_level(quiet: bool) -> &'static str {
    if quiet { "warn" } else { "info" }
}
