use std::fmt;

use crate::{
    config::{default_config::config_from_env, model_profile::ModelProfile},
    error_handler::ConfigError,
};

/// Process-wide gateway configuration.
///
/// Built once at startup (usually via
/// [`config_from_env`](crate::config::default_config::config_from_env)) and
/// read-only afterwards. The credential lives here and is handed to the
/// transport explicitly; nothing reads it from globals at call time.
#[derive(Clone)]
pub struct GatewayConfig {
    /// Base URL of the generative API (e.g. `https://generativelanguage.googleapis.com/v1beta`).
    pub endpoint: String,

    /// API key sent with every request.
    pub api_key: String,

    /// Profile for schema-validated, high-effort requests.
    pub deep: ModelProfile,

    /// Profile for free-text, low-latency requests.
    pub fast: ModelProfile,

    /// Per-call timeout in seconds. Expiry is reported as a transport error.
    pub timeout_secs: u64,
}

impl GatewayConfig {
    /// Shorthand for [`config_from_env`].
    ///
    /// # Errors
    /// See [`config_from_env`].
    pub fn from_env() -> Result<Self, ConfigError> {
        config_from_env()
    }
}

impl fmt::Debug for GatewayConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GatewayConfig")
            .field("endpoint", &self.endpoint)
            .field("api_key", &"<redacted>")
            .field("deep", &self.deep)
            .field("fast", &self.fast)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}
