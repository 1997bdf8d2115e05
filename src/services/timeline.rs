//! Timeline lookup for the web layer.
//!
//! The web layer resolves a route to `(kind, slug)` and calls
//! [`TimelineService::render_timeline`]. Three outcomes are possible and must
//! stay distinguishable:
//!
//! - `Ok(TimelineOutcome::Found(_))` - render the widget
//! - `Ok(TimelineOutcome::NoDates { .. })` - the entity exists but has no dates;
//!   show [`NO_DATES_MESSAGE`] with a 404
//! - `Err(_)` - remote lookup failed ([`AppError::is_not_found`] for a missing slug)

use crate::client::Client;
use crate::error::AppError;
use crate::models::{EntityKind, TimelineEntity, TimelinePayload};

/// User-facing message for an entity without dated artworks.
pub const NO_DATES_MESSAGE: &str =
    "We couldn't find any dates for that selection! Please try again.";

/// Result of a timeline lookup that reached the API successfully.
#[derive(Debug, Clone, PartialEq)]
pub enum TimelineOutcome {
    Found(TimelinePayload),
    NoDates {
        kind: EntityKind,
        slug: String,
        /// Display name, when the entity has one.
        label: Option<String>,
    },
}

impl TimelineOutcome {
    pub fn payload(&self) -> Option<&TimelinePayload> {
        match self {
            TimelineOutcome::Found(payload) => Some(payload),
            TimelineOutcome::NoDates { .. } => None,
        }
    }

    pub fn into_payload(self) -> Option<TimelinePayload> {
        match self {
            TimelineOutcome::Found(payload) => Some(payload),
            TimelineOutcome::NoDates { .. } => None,
        }
    }
}

/// Builds timeline payloads from route parameters.
#[derive(Debug, Clone)]
pub struct TimelineService {
    client: Client,
}

impl TimelineService {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    /// Fetches the entity, checks eligibility and assembles its payload.
    pub async fn render_timeline(
        &self,
        kind: EntityKind,
        slug: &str,
    ) -> Result<TimelineOutcome, AppError> {
        let entity = self.client.find(kind, slug).await?;

        if !entity.valid_for_timeline().await? {
            tracing::info!(%kind, slug, "No dated artworks for timeline");
            return Ok(TimelineOutcome::NoDates {
                kind,
                slug: slug.to_string(),
                label: entity.label().ok().map(str::to_string),
            });
        }

        let payload = entity.to_timeline().await?;
        tracing::debug!(
            %kind,
            slug,
            dates = payload.timeline.date.len(),
            "Assembled timeline"
        );
        Ok(TimelineOutcome::Found(payload))
    }

    /// Like [`render_timeline`](Self::render_timeline) with the kind still a
    /// raw route segment.
    pub async fn render_route(
        &self,
        kind: &str,
        slug: &str,
    ) -> Result<TimelineOutcome, AppError> {
        let kind = EntityKind::from_route(kind)?;
        self.render_timeline(kind, slug).await
    }
}
