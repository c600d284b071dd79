//! Tracing setup for the desktop app.
//!
//! Level priority: `RUST_LOG`, then `--debug`, then `log_level` from the
//! config file.

use tracing_subscriber::EnvFilter;

pub fn init(debug_flag: bool, config_level: &str) {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if debug_flag {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_new(config_level).unwrap_or_else(|_| EnvFilter::new("info"))
    };

    // A second init (tests, embedding) is not an error worth surfacing.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .compact()
        .try_init();
}
