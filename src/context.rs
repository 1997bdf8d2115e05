//! Application context holding shared dependencies.

use std::sync::Arc;

use crate::client::Client;
use crate::config::Config;
use crate::error::AppError;
use crate::services::TimelineService;
use crate::transport::Transport;

/// Root application context.
///
/// Cheap to clone; every field is shared.
#[derive(Debug, Clone)]
pub struct Context {
    /// Artsy API client.
    pub client: Client,
    /// Application configuration.
    pub config: Arc<Config>,
}

impl Context {
    /// Creates a context talking to the Artsy API over HTTPS.
    pub fn from_config(config: Config) -> Result<Self, AppError> {
        let client = Client::connect(&config.artsy)?;
        Ok(Self {
            client,
            config: Arc::new(config),
        })
    }

    /// Creates a context over an explicit transport.
    pub fn with_transport(config: Config, transport: Arc<dyn Transport>) -> Result<Self, AppError> {
        let client = Client::new(&config.artsy, transport)?;
        Ok(Self {
            client,
            config: Arc::new(config),
        })
    }

    pub fn timeline_service(&self) -> TimelineService {
        TimelineService::new(self.client.clone())
    }
}
