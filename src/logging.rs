//! `tracing` subscriber setup shared by both binaries.

use tracing_subscriber::{fmt, EnvFilter};

/// Set when JSON log lines are wanted instead of the human format.
pub const JSON_ENV: &str = "CELEBRATION_LOG_JSON";

/// Install the global subscriber. Logs go to stderr so stdout stays
/// free for command output. `RUST_LOG` overrides `default_filter`.
pub fn init_logging(default_filter: &str) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter));

    if std::env::var(JSON_ENV).is_ok() {
        fmt()
            .json()
            .with_env_filter(env_filter)
            .with_target(true)
            .with_writer(std::io::stderr)
            .init();
    } else {
        fmt()
            .with_env_filter(env_filter)
            .with_target(true)
            .with_writer(std::io::stderr)
            .init();
    }
}
