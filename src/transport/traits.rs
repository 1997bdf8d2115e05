//! Core trait for outbound requests.

use async_trait::async_trait;

use crate::error::AppError;

/// Raw response from a transport: status code and body text.
///
/// Status interpretation is left to the caller so that every backend reports
/// non-2xx responses the same way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

impl TransportResponse {
    /// Creates a response with the given status and body.
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Shorthand for a `200 OK` response.
    pub fn ok(body: impl Into<String>) -> Self {
        Self::new(200, body)
    }

    /// Returns true for 2xx statuses.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Issues read-only requests against a remote API.
///
/// Implementations must not retry and must not interpret the status code.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Performs a `GET` of `url` with the given request headers.
    ///
    /// # Errors
    ///
    /// Returns an error only for failures below HTTP (DNS, TLS, connection reset).
    async fn get(&self, url: &str, headers: &[(&str, &str)])
        -> Result<TransportResponse, AppError>;
}
