//! Logger bootstrap.
//!
//! Thin wrapper over the `log` facade + `env_logger` backend. `RUST_LOG`
//! always wins; the config only supplies the fallback filter.

use std::sync::Once;

/// Logger configuration.
///
/// `default_filter` uses `env_logger` filter syntax (e.g. "info",
/// "trigon_engine=debug,wgpu=warn") and applies only when `RUST_LOG`
/// is unset.
#[derive(Debug, Clone)]
pub struct LogConfig {
    pub default_filter: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            default_filter: "info".to_string(),
        }
    }
}

static INIT: Once = Once::new();

/// Initializes the global logger once.
///
/// Idempotent; subsequent calls are ignored. Call early in `main`, before
/// the window opens.
pub fn init(config: &LogConfig) {
    INIT.call_once(|| {
        let mut builder = env_logger::Builder::new();

        match std::env::var("RUST_LOG") {
            Ok(filter) => builder.parse_filters(&filter),
            Err(_) => builder.parse_filters(&config.default_filter),
        };

        builder.init();
    });
}
