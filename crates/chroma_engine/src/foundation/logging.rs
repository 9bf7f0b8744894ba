//! Logging utilities and structured logging support

pub use log::{debug, error, info, trace, warn};

/// Initialize logging with `default_filter` unless `RUST_LOG` is set.
///
/// Safe to call more than once; later calls are ignored.
pub fn init_with_filter(default_filter: &str) {
    let env = env_logger::Env::default().default_filter_or(default_filter);
    // try_init fails only when a logger is already installed
    let _ = env_logger::Builder::from_env(env).try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repeated_init_is_harmless() {
        init_with_filter("debug");
        init_with_filter("warn");
        info!("logger installed once");
    }
}
