//! Shared capability interface and the closed set of entity variants.

use async_trait::async_trait;

use super::kind::EntityKind;
use super::timeline::TimelinePayload;
use super::{Artist, Artwork, Gene, Tag};
use crate::error::AppError;

/// What every entity can do as the primary subject of a timeline.
///
/// Eligibility and payload assembly may fetch related entities on first use;
/// results are memoized per instance.
#[async_trait]
pub trait TimelineEntity: Send + Sync {
    fn kind(&self) -> EntityKind;

    /// Human-readable display name.
    fn label(&self) -> Result<&str, AppError>;

    /// True when the entity has enough date information for a timeline.
    async fn valid_for_timeline(&self) -> Result<bool, AppError>;

    /// The full nested payload with this entity as the primary subject.
    async fn to_timeline(&self) -> Result<TimelinePayload, AppError>;
}

/// Any entity the client can look up by `(kind, slug)`.
#[derive(Debug)]
pub enum Entity {
    Artist(Artist),
    Artwork(Artwork),
    Gene(Gene),
    Tag(Tag),
}

impl Entity {
    fn inner(&self) -> &dyn TimelineEntity {
        match self {
            Entity::Artist(e) => e as &dyn TimelineEntity,
            Entity::Artwork(e) => e as &dyn TimelineEntity,
            Entity::Gene(e) => e as &dyn TimelineEntity,
            Entity::Tag(e) => e as &dyn TimelineEntity,
        }
    }
}

#[async_trait]
impl TimelineEntity for Entity {
    fn kind(&self) -> EntityKind {
        self.inner().kind()
    }

    fn label(&self) -> Result<&str, AppError> {
        self.inner().label()
    }

    async fn valid_for_timeline(&self) -> Result<bool, AppError> {
        self.inner().valid_for_timeline().await
    }

    async fn to_timeline(&self) -> Result<TimelinePayload, AppError> {
        self.inner().to_timeline().await
    }
}

impl From<Artist> for Entity {
    fn from(artist: Artist) -> Self {
        Entity::Artist(artist)
    }
}

impl From<Artwork> for Entity {
    fn from(artwork: Artwork) -> Self {
        Entity::Artwork(artwork)
    }
}

impl From<Gene> for Entity {
    fn from(gene: Gene) -> Self {
        Entity::Gene(gene)
    }
}

impl From<Tag> for Entity {
    fn from(tag: Tag) -> Self {
        Entity::Tag(tag)
    }
}
