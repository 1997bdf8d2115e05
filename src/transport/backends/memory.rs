//! In-memory backend serving canned responses.
//!
//! # Example
//!
//! ```ignore
//! let transport = MemoryTransport::new()
//!     .with_json("https://api.test/artist/andy-warhol", r#"{"id":"andy-warhol"}"#)
//!     .with_status("https://api.test/artist/nobody", 404);
//! ```

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::error::AppError;
use crate::transport::traits::{Transport, TransportResponse};

/// A request observed by [`MemoryTransport`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    pub url: String,
    pub headers: Vec<(String, String)>,
}

impl RecordedRequest {
    /// Returns the value of the first header matching `name` (case-insensitive).
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Transport answering from a fixed URL → response table.
///
/// Unknown URLs answer `404` with an empty JSON object. Every request is
/// recorded in order.
#[derive(Debug, Default)]
pub struct MemoryTransport {
    responses: HashMap<String, TransportResponse>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl MemoryTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a `200 OK` response for `url`.
    pub fn with_json(self, url: impl Into<String>, body: impl Into<String>) -> Self {
        self.with_response(url, TransportResponse::ok(body))
    }

    /// Registers an error status with an empty body for `url`.
    pub fn with_status(self, url: impl Into<String>, status: u16) -> Self {
        self.with_response(url, TransportResponse::new(status, ""))
    }

    /// Registers an arbitrary response for `url`.
    pub fn with_response(mut self, url: impl Into<String>, response: TransportResponse) -> Self {
        self.responses.insert(url.into(), response);
        self
    }

    /// Returns every request made so far, in order.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.lock().clone()
    }

    /// Returns the URLs requested so far, in order.
    pub fn requested_urls(&self) -> Vec<String> {
        self.lock().iter().map(|r| r.url.clone()).collect()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<RecordedRequest>> {
        // Poisoning is ignored: each push is a single operation.
        self.requests
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl Transport for MemoryTransport {
    async fn get(
        &self,
        url: &str,
        headers: &[(&str, &str)],
    ) -> Result<TransportResponse, AppError> {
        self.lock().push(RecordedRequest {
            url: url.to_string(),
            headers: headers
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        });

        Ok(self
            .responses
            .get(url)
            .cloned()
            .unwrap_or_else(|| TransportResponse::new(404, "{}")))
    }
}
