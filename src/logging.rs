// Logging is the `log` facade everywhere, printed by a tracing-subscriber fmt layer.
// The subscriber's `tracing-log` bridge picks up every `log::*` record.

use tracing_subscriber::EnvFilter;

const DEFAULT_DIRECTIVES: &str = "info";

/// Third-party targets that are too chatty at `info`.
const NOISY: &[(&str, &str)] = &[
    ("actix_server", "warn"),
    ("hyper_util", "warn"),
    ("reqwest", "warn"),
    ("rustls", "warn"),
];

fn build_env_filter() -> EnvFilter {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }

    let mut directives = vec![DEFAULT_DIRECTIVES.to_string()];
    directives.extend(NOISY.iter().map(|(target, level)| format!("{}={}", target, level)));
    EnvFilter::new(directives.join(","))
}

/// Installs the global subscriber. `RUST_LOG` overrides the defaults.
pub fn init() {
    let result = tracing_subscriber::fmt()
        .with_env_filter(build_env_filter())
        .with_target(true)
        .try_init();

    // Tests may install a subscriber more than once.
    if let Err(e) = result {
        log::debug!("logging already initialized: {}", e);
    }
}
