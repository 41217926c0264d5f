//! Gateway config loaded strictly from environment variables.
//!
//! # Environment variables
//!
//! - `GEMINI_API_KEY` (or `API_KEY`) = API credential (mandatory)
//! - `GEMINI_API_BASE`        = API base URL (default: public v1beta endpoint)
//! - `GEMINI_DEEP_MODEL`      = deep/quality model (default: `gemini-3-pro-preview`)
//! - `GEMINI_FAST_MODEL`      = fast/latency model (default: `gemini-2.5-flash-lite-latest`)
//! - `GEMINI_THINKING_BUDGET` = reasoning budget for the deep profile (default: `32768`)
//! - `LLM_TIMEOUT_SECS`       = per-call timeout (default: `120`)
//! - `GEMINI_TEMPERATURE`     = sampling temperature for both profiles, `0.0..=2.0` (default: provider's)
//!
//! A `.env` file in the working directory is loaded first by [`load_dotenv`].

use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};

use crate::{
    config::{gateway_config::GatewayConfig, model_profile::ModelProfile},
    error_handler::{
        ConfigError, env_opt, env_opt_f32, env_opt_u32, env_opt_u64, must_env,
        validate_http_endpoint,
    },
};

pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_DEEP_MODEL: &str = "gemini-3-pro-preview";
pub const DEFAULT_FAST_MODEL: &str = "gemini-2.5-flash-lite-latest";
pub const DEFAULT_THINKING_BUDGET: u32 = 32_768;
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;
pub const TEMPERATURE_RANGE: RangeInclusive<f32> = 0.0..=2.0;

/// Loads `.env` from the working directory or its parents.
///
/// Returns the loaded path, or `None` when there is no `.env` at all.
///
/// # Errors
/// [`ConfigError::DotEnv`] when a `.env` exists but is unreadable or malformed.
/// Variables after a bad line would silently be missing, so this is fatal.
pub fn load_dotenv() -> Result<Option<PathBuf>, ConfigError> {
    match dotenvy::dotenv() {
        Ok(path) => Ok(Some(path)),
        Err(e) if e.not_found() => Ok(None),
        Err(e) => Err(ConfigError::DotEnv(e)),
    }
}

/// Like [`load_dotenv`], for an explicit file.
///
/// # Errors
/// [`ConfigError::DotEnv`] when the file exists but is unreadable or malformed.
pub fn load_dotenv_from(path: &Path) -> Result<Option<PathBuf>, ConfigError> {
    match dotenvy::from_path(path) {
        Ok(()) => Ok(Some(path.to_path_buf())),
        Err(e) if e.not_found() => Ok(None),
        Err(e) => Err(ConfigError::DotEnv(e)),
    }
}

/// Resolves the API key.
///
/// Precedence:
/// 1. `GEMINI_API_KEY` if present and non-empty
/// 2. `API_KEY`
///
/// # Errors
/// [`ConfigError::MissingVar`] if both are missing.
fn api_key() -> Result<String, ConfigError> {
    if let Some(key) = env_opt("GEMINI_API_KEY") {
        return Ok(key);
    }
    must_env("API_KEY").map_err(|_| ConfigError::MissingVar("GEMINI_API_KEY or API_KEY"))
}

/// Builds the full [`GatewayConfig`] from the environment.
///
/// Absence of the credential is a fatal configuration error; call this once
/// at startup and abort if it fails.
///
/// # Errors
/// - [`ConfigError::MissingVar`] if no API key is set
/// - [`ConfigError::InvalidFormat`] if `GEMINI_API_BASE` is not http(s)
/// - [`ConfigError::InvalidNumber`] for unparsable budget/timeout/temperature, a zero
///   timeout or a temperature outside [`TEMPERATURE_RANGE`]
pub fn config_from_env() -> Result<GatewayConfig, ConfigError> {
    let api_key = api_key()?;

    let endpoint = env_opt("GEMINI_API_BASE").unwrap_or_else(|| DEFAULT_API_BASE.to_string());
    validate_http_endpoint("GEMINI_API_BASE", &endpoint)?;
    let endpoint = endpoint.trim_end_matches('/').to_string();

    let deep_model = env_opt("GEMINI_DEEP_MODEL").unwrap_or_else(|| DEFAULT_DEEP_MODEL.into());
    let fast_model = env_opt("GEMINI_FAST_MODEL").unwrap_or_else(|| DEFAULT_FAST_MODEL.into());
    let budget = env_opt_u32("GEMINI_THINKING_BUDGET")?.unwrap_or(DEFAULT_THINKING_BUDGET);

    let timeout_secs = env_opt_u64("LLM_TIMEOUT_SECS")?.unwrap_or(DEFAULT_TIMEOUT_SECS);
    if timeout_secs == 0 {
        return Err(ConfigError::InvalidNumber {
            var: "LLM_TIMEOUT_SECS",
            reason: "must be greater than zero",
        });
    }

    let temperature = env_opt_f32("GEMINI_TEMPERATURE")?;
    if temperature.is_some_and(|t| !TEMPERATURE_RANGE.contains(&t)) {
        return Err(ConfigError::InvalidNumber {
            var: "GEMINI_TEMPERATURE",
            reason: "must be within 0.0..=2.0",
        });
    }

    Ok(GatewayConfig {
        endpoint,
        api_key,
        deep: ModelProfile::deep(deep_model, budget).with_temperature(temperature),
        fast: ModelProfile::fast(fast_model).with_temperature(temperature),
        timeout_secs,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write_env(name: &str, body: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("study-ai-{}-{name}.env", std::process::id()));
        fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn missing_dotenv_is_not_an_error() {
        let path = std::env::temp_dir().join("study-ai-does-not-exist.env");
        assert!(matches!(load_dotenv_from(&path), Ok(None)));
    }

    #[test]
    fn malformed_dotenv_is_fatal() {
        let path = write_env("broken", "STUDY_AI_BROKEN_A=1\nthis line is not an assignment\n");
        let err = load_dotenv_from(&path).unwrap_err();
        fs::remove_file(&path).ok();
        assert!(matches!(err, ConfigError::DotEnv(_)));
    }

    #[test]
    fn valid_dotenv_is_loaded() {
        let path = write_env("valid", "STUDY_AI_DOTENV_LOADED=yes\n");
        let loaded = load_dotenv_from(&path).unwrap();
        fs::remove_file(&path).ok();
        assert_eq!(loaded.as_deref(), Some(path.as_path()));
        assert_eq!(std::env::var("STUDY_AI_DOTENV_LOADED").as_deref(), Ok("yes"));
    }
}
