//! Tracing setup for the binaries

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter used when `RUST_LOG` is not set
pub fn default_directives(debug: bool) -> &'static str {
    if debug {
        "info,tower_http=debug"
    } else {
        "warn"
    }
}

fn env_filter(debug: bool) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| default_directives(debug).into())
}

/// Human-readable logs on stdout
pub fn init_tracing(debug: bool) {
    tracing_subscriber::registry()
        .with(env_filter(debug))
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Logs on stderr; stdout carries the RPC protocol
pub fn init_stderr_tracing(debug: bool) {
    tracing_subscriber::registry()
        .with(env_filter(debug))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(false),
        )
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directives() {
        assert_eq!(default_directives(true), "info,tower_http=debug");
        assert_eq!(default_directives(false), "warn");
    }
}
