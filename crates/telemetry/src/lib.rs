//! Logging bootstrap for Folio processes.

use anyhow::Context;
use folio_kernel::settings::{LogFormat, TelemetrySettings};
use tracing_subscriber::EnvFilter;

/// Build the log filter: `RUST_LOG` wins, otherwise the configured level.
pub fn env_filter(settings: &TelemetrySettings) -> anyhow::Result<EnvFilter> {
    EnvFilter::try_from_default_env().or_else(|_| configured_filter(settings))
}

/// Filter built from `telemetry.log_level` alone, ignoring `RUST_LOG`.
pub fn configured_filter(settings: &TelemetrySettings) -> anyhow::Result<EnvFilter> {
    EnvFilter::try_new(&settings.log_level)
        .with_context(|| format!("invalid log level '{}'", settings.log_level))
}

/// Install the global tracing subscriber.
///
/// A subscriber that is already installed (e.g. by a test harness) is left in place.
pub fn init(settings: &TelemetrySettings) -> anyhow::Result<()> {
    let filter = env_filter(settings)?;
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    let installed = match settings.log_format {
        LogFormat::Pretty => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    };

    if installed.is_ok() {
        tracing::debug!(
            target: "folio-telemetry",
            format = ?settings.log_format,
            "telemetry initialized"
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_level(level: &str) -> TelemetrySettings {
        TelemetrySettings {
            log_format: LogFormat::Pretty,
            log_level: level.to_string(),
        }
    }

    #[test]
    fn rejects_malformed_level() {
        let err = configured_filter(&with_level("folio=loud")).unwrap_err();
        assert!(err.to_string().contains("folio=loud"));
    }

    #[test]
    fn accepts_directive_levels() {
        assert!(configured_filter(&with_level("info")).is_ok());
        assert!(configured_filter(&with_level("folio_app=debug,tower_http=warn")).is_ok());
    }

    #[test]
    fn init_is_idempotent() {
        let settings = TelemetrySettings::default();
        init(&settings).unwrap();
        init(&settings).unwrap();
    }
}
