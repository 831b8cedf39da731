//! Diagnostics go to stderr through `tracing`.
//!
//! The subscriber is installed only when `LUASTUB_LOG` (or `RUST_LOG`) is
//! set; values use the usual filter syntax, e.g. `LUASTUB_LOG=luastub=debug`.
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "LUASTUB_LOG";

fn build_filter() -> Option<EnvFilter> {
    if let Ok(val) = std::env::var(LOG_ENV) {
        Some(EnvFilter::builder().parse_lossy(val))
    } else if std::env::var_os("RUST_LOG").is_some() {
        Some(EnvFilter::from_default_env())
    } else {
        None
    }
}

pub fn init_tracing() {
    let Some(filter) = build_filter() else {
        return;
    };
    // a second init (tests, embedding) keeps the first subscriber
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
