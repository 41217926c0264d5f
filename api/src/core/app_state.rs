use ai_gateway::{
    config::{default_config::config_from_env, gateway_config::GatewayConfig},
    error_handler::{ConfigError, env_opt_u64},
    gateway::StudyGateway,
    health_service::HealthService,
    services::gemini_service::GeminiTransport,
};
use std::sync::Arc;

use crate::error_handler::AppError;

/// Request body cap. A full-resolution camera JPEG as a base64 data URL is
/// several MB, well past axum's 2 MB default.
pub const DEFAULT_MAX_BODY_BYTES: usize = 16 * 1024 * 1024;

/// Shared state for all HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    /// The only way handlers talk to the model.
    pub gateway: StudyGateway,
    /// Read-only gateway configuration (endpoint, profiles, credential).
    pub config: Arc<GatewayConfig>,
    pub health: Arc<HealthService>,
    /// Largest accepted request body, in bytes.
    pub max_body_bytes: usize,
}

impl AppState {
    /// Assembles state from already-built parts (used by tests with a stub transport).
    pub fn new(gateway: StudyGateway, config: GatewayConfig, health: HealthService) -> Self {
        Self {
            gateway,
            config: Arc::new(config),
            health: Arc::new(health),
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }

    pub fn with_max_body_bytes(mut self, max_body_bytes: usize) -> Self {
        self.max_body_bytes = max_body_bytes;
        self
    }

    /// Loads config from the environment and wires the Gemini transport.
    ///
    /// `API_MAX_BODY_BYTES` overrides [`DEFAULT_MAX_BODY_BYTES`].
    ///
    /// # Errors
    /// [`AppError::Config`] if the credential is missing or any setting is invalid.
    pub fn from_env() -> Result<Self, AppError> {
        let config = config_from_env()?;
        let transport = Arc::new(GeminiTransport::new(&config)?);
        let gateway = StudyGateway::new(transport, config.deep.clone(), config.fast.clone());
        let health = HealthService::new(Some(config.timeout_secs.min(10)))?;
        let max_body_bytes = match env_opt_u64("API_MAX_BODY_BYTES")? {
            Some(0) => {
                return Err(ConfigError::InvalidNumber {
                    var: "API_MAX_BODY_BYTES",
                    reason: "must be greater than zero",
                }
                .into());
            }
            Some(n) => usize::try_from(n).map_err(|_| ConfigError::InvalidNumber {
                var: "API_MAX_BODY_BYTES",
                reason: "does not fit in usize",
            })?,
            None => DEFAULT_MAX_BODY_BYTES,
        };
        Ok(Self::new(gateway, config, health).with_max_body_bytes(max_body_bytes))
    }
}
