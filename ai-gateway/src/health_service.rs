//! Health check for the configured model profiles.
//!
//! Check: `GET {endpoint}/models/{model}` with the api key header. A 2xx
//! means the key is accepted and the model identifier resolves.
//!
//! The returned [`HealthStatus`] is JSON-serializable and suitable for a
//! `/health` endpoint. [`HealthService::check`] is resilient and never fails
//! (errors mapped to `ok=false`); [`HealthService::try_check`] returns a strict
//! `Result`.

use std::time::{Duration, Instant};

use reqwest::header;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::{
    config::{gateway_config::GatewayConfig, model_profile::ModelProfile},
    error_handler::{ConfigError, HttpError, TransportError, make_snippet},
    services::gemini_service::model_path,
};

/// A serializable health snapshot for a single model profile.
#[derive(Debug, Clone, Serialize)]
pub struct HealthStatus {
    /// Target endpoint base URL.
    pub endpoint: String,
    /// Model identifier checked.
    pub model: String,
    /// Overall health flag.
    pub ok: bool,
    /// Measured HTTP latency in milliseconds.
    pub latency_ms: u128,
    /// Short human-readable message with details.
    pub message: String,
}

/// A health checker that reuses a single HTTP client.
pub struct HealthService {
    client: reqwest::Client,
    timeout: Duration,
}

impl HealthService {
    /// Creates a new health service with an optional request timeout (seconds, default 10).
    ///
    /// # Errors
    /// [`ConfigError::Client`] if the HTTP client cannot be built.
    pub fn new(timeout_secs: Option<u64>) -> Result<Self, ConfigError> {
        let timeout = Duration::from_secs(timeout_secs.unwrap_or(10));
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(ConfigError::Client)?;

        info!(
            default_timeout_secs = timeout.as_secs(),
            "HealthService initialized"
        );

        Ok(Self { client, timeout })
    }

    /// Checks one profile. Never returns an error.
    pub async fn check(&self, cfg: &GatewayConfig, profile: &ModelProfile) -> HealthStatus {
        let start = Instant::now();
        match self.try_check(cfg, profile).await {
            Ok(()) => {
                let latency_ms = start.elapsed().as_millis();
                info!(model = %profile.model, latency_ms, "health check completed");
                HealthStatus {
                    endpoint: cfg.endpoint.clone(),
                    model: profile.model.clone(),
                    ok: true,
                    latency_ms,
                    message: "model reachable".into(),
                }
            }
            Err(err) => {
                let latency_ms = start.elapsed().as_millis();
                warn!(model = %profile.model, latency_ms, error = %err, "health check failed");
                HealthStatus {
                    endpoint: cfg.endpoint.clone(),
                    model: profile.model.clone(),
                    ok: false,
                    latency_ms,
                    message: err.to_string(),
                }
            }
        }
    }

    /// Checks the deep and fast profiles; identical profiles are checked once.
    pub async fn check_profiles(&self, cfg: &GatewayConfig) -> Vec<HealthStatus> {
        let mut out = vec![self.check(cfg, &cfg.deep).await];
        if cfg.fast.model != cfg.deep.model {
            out.push(self.check(cfg, &cfg.fast).await);
        }
        out
    }

    /// Strict check.
    ///
    /// # Errors
    /// [`TransportError`] for network failures, timeouts and non-2xx statuses.
    pub async fn try_check(
        &self,
        cfg: &GatewayConfig,
        profile: &ModelProfile,
    ) -> Result<(), TransportError> {
        let url = format!(
            "{}/{}",
            cfg.endpoint.trim_end_matches('/'),
            model_path(&profile.model)
        );

        debug!("GET {}", url);
        let resp = self
            .client
            .get(&url)
            .header("x-goog-api-key", cfg.api_key.as_str())
            .header(header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| TransportError::from_reqwest(e, self.timeout))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let text = resp.text().await.unwrap_or_default();
            return Err(TransportError::HttpStatus(HttpError {
                status,
                url,
                snippet: make_snippet(&text),
            }));
        }
        Ok(())
    }
}
