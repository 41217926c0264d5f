//! Logging setup shared by the binary and tests.
//!
//! Events from the service's own crates (`ai_gateway`, `api`,
//! `study_ai_backend`) are rendered by a compact formatter with RFC3339 UTC
//! timestamps, `file:line` and span-close durations. Dependency events
//! (hyper, reqwest, ...) go through a plain layer and are shown at `warn`
//! unless `RUST_LOG` asks for more, e.g. `RUST_LOG=reqwest=debug`.

use std::io::{self, IsTerminal};

use tracing::Level;
use tracing_subscriber::filter::{Directive, ParseError};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};
use tracing_subscriber::{EnvFilter, Layer, filter, fmt};

/// Target prefixes treated as "ours".
pub const SERVICE_TARGETS: [&str; 3] = ["ai_gateway", "api", "study_ai_backend"];

/// `2025-09-12T10:20:30Z`
#[derive(Clone, Debug, Default)]
struct UtcSeconds;

impl FormatTime for UtcSeconds {
    fn format_time(&self, w: &mut Writer<'_>) -> std::fmt::Result {
        let now = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true);
        w.write_str(&now)
    }
}

/// `api` and `api::routes` match; `api_client::x` does not.
fn is_service_target(target: &str) -> bool {
    SERVICE_TARGETS.iter().any(|t| {
        target
            .strip_prefix(t)
            .is_some_and(|rest| rest.is_empty() || rest.starts_with("::"))
    })
}

/// Formatting layer that renders only service events.
pub fn layer<S>() -> impl Layer<S> + Send + Sync
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
{
    fmt::layer()
        .event_format(fmt::format().compact())
        .with_timer(UtcSeconds)
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .with_ansi(io::stdout().is_terminal())
        .with_span_events(fmt::format::FmtSpan::CLOSE)
        .with_filter(filter::filter_fn(|meta| is_service_target(meta.target())))
}

/// Plain layer for everything outside [`SERVICE_TARGETS`].
pub fn dependency_layer<S>() -> impl Layer<S> + Send + Sync
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
{
    fmt::layer()
        .with_timer(UtcSeconds)
        .with_target(true)
        .with_ansi(io::stdout().is_terminal())
        .with_filter(filter::filter_fn(|meta| !is_service_target(meta.target())))
}

/// `EnvFilter` from `RUST_LOG` (or `default`), with every service target
/// raised to `level`.
///
/// # Errors
/// Propagates a directive parse failure.
pub fn env_filter(default: &str, level: Level) -> Result<EnvFilter, ParseError> {
    let mut filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let level = level.as_str().to_lowercase();
    for target in SERVICE_TARGETS {
        filter = filter.add_directive(format!("{target}={level}").parse::<Directive>()?);
    }
    Ok(filter)
}

/// Installs the global subscriber: env filter, service layer and dependency layer.
///
/// # Errors
/// Fails if a global subscriber is already set.
pub fn init(level: Level) -> Result<(), TryInitError> {
    let filter = env_filter("warn", level).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(layer())
        .with(dependency_layer())
        .try_init()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_targets_are_recognised() {
        assert!(is_service_target("ai_gateway::gateway"));
        assert!(is_service_target("api::routes"));
        assert!(!is_service_target("hyper::proto"));
    }

    #[test]
    fn lookalike_crates_are_not_service_targets() {
        assert!(is_service_target("api"));
        assert!(is_service_target("study_ai_backend"));
        assert!(!is_service_target("api_client::request"));
        assert!(!is_service_target("apis::v1"));
        assert!(!is_service_target("ai_gateway_ext"));
    }

    #[test]
    fn filter_builds_for_every_level() {
        for level in [Level::ERROR, Level::INFO, Level::TRACE] {
            assert!(env_filter("info", level).is_ok());
        }
    }
}
