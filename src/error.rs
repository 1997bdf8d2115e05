//! Application error types.

use thiserror::Error;

/// Application-level errors for artsy-timeline.
#[derive(Error, Debug)]
pub enum AppError {
    // Configuration errors
    #[error("xapp_token required!")]
    MissingToken,

    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    // Transport errors
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Artsy API returned {status} for {url}")]
    HttpStatus { status: u16, url: String },

    #[error("Malformed JSON response: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Unexpected response from {url}: expected {expected}")]
    UnexpectedResponse { url: String, expected: &'static str },

    // Data errors
    #[error("{entity} has no field '{field}'")]
    MissingField { entity: &'static str, field: String },

    #[error("{entity} field '{field}' is not {expected}")]
    InvalidField {
        entity: &'static str,
        field: String,
        expected: &'static str,
    },

    #[error("Invalid entity type '{0}'. Valid values: artist, artwork, gene, tag")]
    UnknownEntityType(String),
}

impl AppError {
    /// True for failures reported by the remote API or the network, as opposed to
    /// configuration mistakes or schema drift in a response.
    pub fn is_remote(&self) -> bool {
        matches!(
            self,
            AppError::Transport(_)
                | AppError::HttpStatus { .. }
                | AppError::Parse(_)
                | AppError::UnexpectedResponse { .. }
        )
    }

    /// True when the remote API reported the entity does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, AppError::HttpStatus { status: 404, .. })
    }
}
