//! Logging setup for binaries and tests.
//!
//! The library itself only emits through the `log` facade; this installs
//! `env_logger` as the backend, honouring `RUST_LOG` and defaulting to `info`.

/// Install the logger. Calling this more than once is harmless.
pub fn init() {
    init_with_filter("info");
}

/// Install the logger with `filter` as the fallback when `RUST_LOG` is unset.
pub fn init_with_filter(filter: &str) {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter))
        .format_timestamp_millis()
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_twice() {
        init();
        init_with_filter("debug");
        log::info!("logger installed");
    }
}
