//! Logging initialisation for the blobkit demo.
//!
//! Installs a global `tracing` subscriber writing to stderr, human-readable by
//! default or JSON when `BLOBKIT_LOG_FORMAT=json`. The level follows `RUST_LOG`.

use std::{env, sync::OnceLock};

use thiserror::Error;
use tracing_log::LogTracer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

const LOG_FORMAT_ENV: &str = "BLOBKIT_LOG_FORMAT";

static INITIALISED: OnceLock<()> = OnceLock::new();

/// Errors raised while initialising structured logging.
#[derive(Debug, Error)]
pub enum LoggingError {
    /// Environment variable contained invalid UTF-8 data.
    #[error("environment variable `{name}` contained invalid UTF-8: {source}")]
    InvalidUnicode {
        /// Name of the offending environment variable.
        name: &'static str,
        /// Underlying parse failure.
        #[source]
        source: env::VarError,
    },
    /// Unsupported log format requested via `BLOBKIT_LOG_FORMAT`.
    #[error("unsupported log format `{provided}`; expected `human` or `json`")]
    UnsupportedFormat {
        /// Raw value supplied by the user.
        provided: String,
    },
    /// Failed to install the global tracing subscriber.
    #[error("failed to install tracing subscriber: {source}")]
    InstallFailed {
        /// Error raised by `tracing_subscriber`.
        #[source]
        source: tracing_subscriber::util::TryInitError,
    },
}

/// Log output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogFormat {
    /// Plain-text lines for terminals.
    Human,
    /// One JSON object per event, including the current span.
    Json,
}

/// Install global structured logging unless it is already configured.
///
/// A subscriber installed by someone else is left in place.
///
/// # Errors
/// Returns [`LoggingError`] if `BLOBKIT_LOG_FORMAT` is not valid Unicode or
/// names an unknown format.
pub fn init_logging() -> Result<(), LoggingError> {
    if INITIALISED.get().is_some() {
        return Ok(());
    }

    if let Some(notice) = settle_install(install_subscriber(format_from_env()?))? {
        eprintln!("{notice}");
    }
    let _ = INITIALISED.set(());
    Ok(())
}

/// Turns a lost race for the global subscriber into a stderr notice.
fn settle_install(outcome: Result<(), LoggingError>) -> Result<Option<String>, LoggingError> {
    match outcome {
        Ok(()) => Ok(None),
        Err(LoggingError::InstallFailed { source }) => Ok(Some(format!(
            "structured logging already configured elsewhere: {source}"
        ))),
        Err(err) => Err(err),
    }
}

fn format_from_env() -> Result<LogFormat, LoggingError> {
    match env::var(LOG_FORMAT_ENV) {
        Ok(raw) => parse_log_format(&raw),
        Err(env::VarError::NotPresent) => Ok(LogFormat::Human),
        Err(err @ env::VarError::NotUnicode(_)) => Err(LoggingError::InvalidUnicode {
            name: LOG_FORMAT_ENV,
            source: err,
        }),
    }
}

fn install_subscriber(format: LogFormat) -> Result<(), LoggingError> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let fmt_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);
    let fmt_layer = match format {
        LogFormat::Json => fmt_layer.json().with_current_span(true).boxed(),
        LogFormat::Human => fmt_layer.boxed(),
    };

    // Best-effort: another logger may already own the `log` slot.
    let _ = LogTracer::init();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|source| LoggingError::InstallFailed { source })
}

fn parse_log_format(raw: &str) -> Result<LogFormat, LoggingError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "human" => Ok(LogFormat::Human),
        "json" => Ok(LogFormat::Json),
        other => Err(LoggingError::UnsupportedFormat {
            provided: other.to_owned(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("human", LogFormat::Human)]
    #[case("JSON", LogFormat::Json)]
    #[case("  json\n", LogFormat::Json)]
    fn accepts_known_formats(#[case] raw: &str, #[case] expected: LogFormat) {
        assert_eq!(parse_log_format(raw).expect("known format"), expected);
    }

    #[test]
    fn rejects_unknown_format() {
        let err = parse_log_format("xml").expect_err("unknown format");
        assert!(matches!(
            err,
            LoggingError::UnsupportedFormat { provided } if provided == "xml"
        ));
    }

    #[test]
    fn competing_subscriber_yields_notice() {
        init_logging().expect("init");
        let source = tracing_subscriber::registry()
            .try_init()
            .expect_err("global subscriber already set");
        let notice = settle_install(Err(LoggingError::InstallFailed { source }))
            .expect("install failure is tolerated")
            .expect("notice is reported");
        assert!(notice.starts_with("structured logging already configured elsewhere"));
    }

    #[test]
    fn unknown_format_still_fails_initialisation() {
        let err = settle_install(parse_log_format("yaml").map(|_| ())).expect_err("bad format");
        assert!(matches!(err, LoggingError::UnsupportedFormat { .. }));
    }

    #[test]
    fn successful_install_has_no_notice() {
        assert!(settle_install(Ok(())).expect("ok").is_none());
    }

    #[test]
    fn repeated_initialisation_is_harmless() {
        init_logging().expect("first init");
        init_logging().expect("second init");
    }
}
