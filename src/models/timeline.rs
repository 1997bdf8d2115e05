//! Payload consumed by the client-side timeline widget.
//!
//! Field names and nesting are the widget's wire contract:
//!
//! ```json
//! { "timeline": {
//!     "headline": "...", "type": "default", "text": "...",
//!     "asset": { "media": "..." },
//!     "date": [{ "startDate": "1503", "endDate": "1503", "headline": "...",
//!                "text": "...", "classname": null,
//!                "asset": { "media": "...", "thumbnail": "..." } }],
//!     "era": [{ "startDate": "1920", "endDate": "1990", "headline": "..." }]
//! } }
//! ```

use serde::Serialize;

/// The only rendering mode the widget is driven with.
pub const TIMELINE_TYPE: &str = "default";

/// Top-level envelope.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimelinePayload {
    pub timeline: Timeline,
}

/// A full timeline for one primary entity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Timeline {
    pub headline: String,
    #[serde(rename = "type")]
    pub kind: &'static str,
    /// Rendered HTML; absent for tags.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    pub asset: Asset,
    pub date: Vec<TimelineDate>,
    /// Biographical spans; absent for tags.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub era: Option<Vec<TimelineEra>>,
}

impl Timeline {
    /// Wraps this timeline in the `{ "timeline": ... }` envelope.
    pub fn into_payload(self) -> TimelinePayload {
        TimelinePayload { timeline: self }
    }
}

/// Lead media of a timeline.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Asset {
    pub media: Option<String>,
}

/// A point-in-time entry (one artwork).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineDate {
    pub start_date: String,
    pub end_date: String,
    pub headline: String,
    pub text: String,
    pub classname: Option<String>,
    pub asset: DateAsset,
}

/// Media of a date entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DateAsset {
    pub media: Option<String>,
    pub thumbnail: Option<String>,
}

/// A date-range entry (an artist's life).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineEra {
    pub start_date: String,
    pub end_date: String,
    pub headline: String,
}

/// Overrides applied by the calling context when an artwork is listed on
/// another entity's timeline.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DateOptions {
    pub headline: Option<String>,
    pub text: Option<String>,
    pub classname: Option<String>,
}

impl DateOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn headline(mut self, headline: impl Into<String>) -> Self {
        self.headline = Some(headline.into());
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn classname(mut self, classname: impl Into<String>) -> Self {
        self.classname = Some(classname.into());
        self
    }
}
