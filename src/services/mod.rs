pub mod dapr;

use crate::config::Config;
use crate::error::SidecarError;
use std::sync::Arc;

pub use dapr::{DaprClient, Sidecar};

/// Shared handles passed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub sidecar: Arc<dyn Sidecar>,
}

impl AppState {
    pub fn new(config: Config, sidecar: Arc<dyn Sidecar>) -> Self {
        Self {
            config: Arc::new(config),
            sidecar,
        }
    }

    /// Build state with a [`DaprClient`] pointed at the configured sidecar.
    pub fn from_config(config: Config) -> Result<Self, SidecarError> {
        let sidecar = Arc::new(DaprClient::new(&config)?);
        Ok(Self::new(config, sidecar))
    }
}
