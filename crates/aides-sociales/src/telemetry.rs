//! Logging set-up for hosts embedding the catalog.

use tracing_subscriber::filter::ParseError;
use tracing_subscriber::EnvFilter;

use crate::config::{AppEnvironment, TelemetryConfig};

const CRATE_TARGET: &str = "aides_sociales";

#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    #[error("invalid log filter '{directives}'")]
    EnvFilter {
        directives: String,
        #[source]
        source: ParseError,
    },
    #[error("unable to install the tracing subscriber: {0}")]
    Subscriber(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Filter used when `RUST_LOG` is absent.
///
/// A bare level such as `debug` applies to this crate only; other targets
/// stay at `warn`. Anything containing a target or several directives is
/// used as written.
pub fn fallback_directives(config: &TelemetryConfig) -> String {
    let level = config.log_level.trim();
    if level.contains('=') || level.contains(',') {
        level.to_string()
    } else {
        format!("warn,{CRATE_TARGET}={level}")
    }
}

/// Install the global subscriber. `RUST_LOG` wins over the configured level.
///
/// Development output keeps colours and targets, tests write through the
/// test harness capture, production stays compact and plain.
pub fn init(config: &TelemetryConfig, environment: AppEnvironment) -> Result<(), TelemetryError> {
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => {
            let directives = fallback_directives(config);
            EnvFilter::try_new(&directives)
                .map_err(|source| TelemetryError::EnvFilter { directives, source })?
        }
    };

    let builder = tracing_subscriber::fmt().with_env_filter(env_filter);
    let installed = match environment {
        AppEnvironment::Development => builder.with_target(true).with_ansi(true).try_init(),
        AppEnvironment::Test => builder
            .with_target(true)
            .with_ansi(false)
            .with_test_writer()
            .try_init(),
        AppEnvironment::Production => builder
            .with_target(false)
            .with_ansi(false)
            .compact()
            .try_init(),
    };
    installed.map_err(TelemetryError::Subscriber)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(log_level: &str) -> TelemetryConfig {
        TelemetryConfig {
            log_level: log_level.to_string(),
        }
    }

    #[test]
    fn bare_level_is_scoped_to_the_crate() {
        assert_eq!(
            fallback_directives(&config(" debug ")),
            "warn,aides_sociales=debug"
        );
    }

    #[test]
    fn explicit_directives_are_kept() {
        assert_eq!(
            fallback_directives(&config("info,aides_sociales::simulation=trace")),
            "info,aides_sociales::simulation=trace"
        );
    }

    #[test]
    fn rejects_unparseable_level_when_rust_log_absent() {
        if std::env::var_os("RUST_LOG").is_some() {
            return;
        }
        let config = config("aides_sociales=verbose[");
        match init(&config, AppEnvironment::Test) {
            Err(TelemetryError::EnvFilter { directives, .. }) => {
                assert_eq!(directives, config.log_level)
            }
            other => panic!("expected env filter error, got {other:?}"),
        }
    }
}
