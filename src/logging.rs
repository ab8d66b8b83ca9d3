//! Tracing setup for the demonstration binary.
//!
//! Diagnostics go to stderr so the demonstration's console lines on stdout
//! stay readable. `RUST_LOG` overrides the default filter.

use anyhow::{Context, Result};
use std::io;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Registry};

/// Filter used when `RUST_LOG` is not set.
pub const DEFAULT_FILTER: &str = "warn";

/// Installs a compact stderr subscriber as the global default.
///
/// `default_level` applies only when `RUST_LOG` is unset. Fails if the filter
/// does not parse or a global subscriber is already installed.
pub fn init_tracing(default_level: Option<&str>) -> Result<()> {
    let env_filter = build_env_filter(default_level.unwrap_or(DEFAULT_FILTER))?;

    let layer = fmt::layer()
        .with_writer(io::stderr)
        .with_target(true)
        .without_time()
        .compact();

    Registry::default()
        .with(env_filter)
        .with(layer)
        .try_init()
        .context("failed to install tracing subscriber")
}

fn build_env_filter(default_level: &str) -> Result<EnvFilter> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(default_level)
            .with_context(|| format!("failed to parse log filter '{}'", default_level)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_filters_parse() {
        for level in ["warn", "debug", "settingcache_core=trace"] {
            assert!(EnvFilter::try_new(level).is_ok(), "{level} should parse");
        }
    }

    #[test]
    fn test_default_filter_parses() {
        assert!(EnvFilter::try_new(DEFAULT_FILTER).is_ok());
    }
}
