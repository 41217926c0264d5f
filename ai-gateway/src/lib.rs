//! AI request/response gateway of the study assistant.
//!
//! Four operations ([`gateway::StudyGateway`]) shape prompts, call the hosted
//! model through a [`transport::ModelTransport`] and decode the answer. Two
//! error kinds only: transport failures and decode failures
//! ([`error_handler::GatewayError`]).

pub mod config {
    pub mod default_config;
    pub mod gateway_config;
    pub mod model_profile;
}

pub mod services {
    pub mod gemini_service;
}

pub mod prompts {
    pub mod evaluation;
    pub mod notes;
    pub mod solution;
    pub mod tutor;
}

pub mod decode;
pub mod error_handler;
pub mod gateway;
pub mod health_service;
pub mod request;
pub mod telemetry;
pub mod transport;
pub mod types;

pub use error_handler::{DecodeError, GatewayError, TransportError};
pub use gateway::{StudyGateway, TUTOR_FALLBACK};
