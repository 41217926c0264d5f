//! Transport seam between the gateway and a concrete model API.

use async_trait::async_trait;

use crate::{
    error_handler::TransportError,
    request::{ModelRequest, RawModelOutput},
};

/// Sends one [`ModelRequest`] and returns the model's raw output.
///
/// Implementations must surface every network or provider failure as a
/// [`TransportError`]; an empty [`RawModelOutput`] means the model really
/// answered with nothing.
#[async_trait]
pub trait ModelTransport: Send + Sync {
    async fn send(&self, request: &ModelRequest) -> Result<RawModelOutput, TransportError>;
}
