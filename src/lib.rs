//! artsy-timeline - Timeline payloads over the Artsy API
//!
//! Fetches artists, artworks, genes and tags from the Artsy REST API and
//! assembles the nested structure rendered by the client-side timeline widget.

pub mod cli;
pub mod client;
pub mod config;
pub mod context;
pub mod error;
pub mod markup;
pub mod models;
pub mod services;
pub mod transport;

pub use client::Client;
pub use error::AppError;
