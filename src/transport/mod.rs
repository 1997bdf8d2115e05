//! Outbound HTTP abstraction for the Artsy API.
//!
//! The [`Transport`] trait is the only place the client touches the network.
//! Two backends ship with the crate:
//!
//! - [`HttpTransport`] - `reqwest` over HTTPS, used in production
//! - [`MemoryTransport`] - canned responses keyed by URL, used by tests and
//!   offline fixtures
//!
//! # Usage
//!
//! ```ignore
//! use artsy_timeline::transport::{HttpTransport, Transport};
//!
//! let transport = HttpTransport::new()?;
//! let response = transport
//!     .get("https://api.artsy.net/api/v1/artist/andy-warhol", &[("X-Xapp-Token", token)])
//!     .await?;
//! ```

mod traits;

pub mod backends;

pub use backends::http::HttpTransport;
pub use backends::memory::{MemoryTransport, RecordedRequest};
pub use traits::{Transport, TransportResponse};
