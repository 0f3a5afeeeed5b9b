//! Tracing setup shared by the workspace binaries.
//!
//! Filtering follows `RUST_LOG` when set, otherwise the directives passed by the
//! caller. `LOG_FORMAT=json` switches to one JSON object per line.

use anyhow::{anyhow, Result};
use tracing_subscriber::{fmt::time::ChronoLocal, EnvFilter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

impl LogFormat {
    /// Reads `LOG_FORMAT`; anything other than `json` means pretty output.
    pub fn from_env() -> Self {
        match std::env::var("LOG_FORMAT") {
            Ok(v) if v.eq_ignore_ascii_case("json") => LogFormat::Json,
            _ => LogFormat::Pretty,
        }
    }
}

/// Installs the global subscriber. Fails if one is already installed.
pub fn init(default_directives: &str) -> Result<()> {
    init_with_format(default_directives, LogFormat::from_env())
}

pub fn init_with_format(default_directives: &str, format: LogFormat) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_timer(ChronoLocal::rfc_3339());

    let installed = match format {
        LogFormat::Pretty => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    };

    installed.map_err(|e| anyhow!("Failed to install tracing subscriber: {e}"))?;
    tracing::debug!(directives = default_directives, ?format, "logging initialised");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_init_is_an_error() {
        // Only one global subscriber per process; the first call may lose the
        // race against another test, the second never succeeds.
        let _ = init_with_format("info", LogFormat::Pretty);
        assert!(init_with_format("info", LogFormat::Json).is_err());
    }
}
