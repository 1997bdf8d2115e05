//! Typed views over Artsy API entities.
//!
//! Every entity wraps the JSON object it was built from ([`Fields`]) plus a
//! handle to the [`Client`](crate::client::Client) that fetched it, so related
//! entities can be loaded on first use. Callers work through
//! [`TimelineEntity`] and never need the concrete variant.

mod artist;
mod artwork;
mod entity;
mod fields;
mod gene;
mod image;
mod kind;
mod tag;
mod timeline;
mod years;

pub use artist::Artist;
pub use artwork::Artwork;
pub use entity::{Entity, TimelineEntity};
pub use fields::Fields;
pub use gene::Gene;
pub use image::{image_version_url, ImageVersion};
pub use kind::EntityKind;
pub use tag::Tag;
pub use timeline::{
    Asset, DateAsset, DateOptions, Timeline, TimelineDate, TimelineEra, TimelinePayload,
    TIMELINE_TYPE,
};
