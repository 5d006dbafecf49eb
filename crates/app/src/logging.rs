//! Tracing subscriber setup
//!
//! Logs go to stderr; stdout is reserved for the invocation result.

use tracing_subscriber::EnvFilter;

/// Filter directive from `LOGLEVEL`, then `RUST_LOG`, then `info`.
pub fn filter_directive(loglevel: Option<&str>, rust_log: Option<&str>) -> String {
    [loglevel.map(str::to_ascii_lowercase), rust_log.map(str::to_string)]
        .into_iter()
        .flatten()
        .map(|value| value.trim().to_string())
        .find(|value| !value.is_empty())
        .unwrap_or_else(|| "info".to_string())
}

/// Install the global subscriber. `LOG_FORMAT=json` selects JSON lines.
pub fn init_tracing() {
    let directive = filter_directive(
        std::env::var("LOGLEVEL").ok().as_deref(),
        std::env::var("RUST_LOG").ok().as_deref(),
    );
    let filter = EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new("info"));
    let json = std::env::var("LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));

    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr);
    // A subscriber may already be installed (tests); keep the existing one.
    let _ = if json { builder.json().try_init() } else { builder.try_init() };
}
