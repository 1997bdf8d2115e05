//! Tag entity: a free-form label attached to artworks.

use async_trait::async_trait;
use serde_json::{Map, Value};

use super::artwork::with_dates;
use super::entity::TimelineEntity;
use super::fields::Fields;
use super::image::{image_version_url, ImageVersion};
use super::kind::EntityKind;
use super::timeline::{Asset, DateOptions, Timeline, TimelinePayload, TIMELINE_TYPE};
use super::Artwork;
use crate::client::Client;
use crate::error::AppError;

/// A tag. Tags carry no narrative text and no biographical era.
#[derive(Debug)]
pub struct Tag {
    fields: Fields,
    client: Client,
    artworks: tokio::sync::OnceCell<Vec<Artwork>>,
}

impl Tag {
    pub fn new(fields: Map<String, Value>, client: Client) -> Self {
        Self {
            fields: Fields::new("Tag", fields),
            client,
            artworks: tokio::sync::OnceCell::new(),
        }
    }

    pub fn fields(&self) -> &Fields {
        &self.fields
    }

    pub fn id(&self) -> Result<&str, AppError> {
        self.fields.id()
    }

    pub fn name(&self) -> Result<&str, AppError> {
        self.fields.str("name")
    }

    pub async fn artworks(&self) -> Result<&[Artwork], AppError> {
        self.artworks
            .get_or_try_init(|| async {
                let id = self.id()?;
                self.client.find_artworks_for_tag(id).await
            })
            .await
            .map(Vec::as_slice)
    }

    pub async fn artworks_with_dates(&self) -> Result<Vec<&Artwork>, AppError> {
        with_dates(self.artworks().await?)
    }
}

#[async_trait]
impl TimelineEntity for Tag {
    fn kind(&self) -> EntityKind {
        EntityKind::Tag
    }

    fn label(&self) -> Result<&str, AppError> {
        self.name()
    }

    async fn valid_for_timeline(&self) -> Result<bool, AppError> {
        Ok(!self.artworks_with_dates().await?.is_empty())
    }

    async fn to_timeline(&self) -> Result<TimelinePayload, AppError> {
        let date = self
            .artworks_with_dates()
            .await?
            .into_iter()
            .map(|artwork| artwork.to_timeline_date(&DateOptions::new()))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Timeline {
            headline: self.name()?.to_string(),
            kind: TIMELINE_TYPE,
            text: None,
            // Tag images do not reliably declare their versions.
            asset: Asset {
                media: image_version_url(self.fields.as_map(), ImageVersion::Thumb, true),
            },
            date,
            era: None,
        }
        .into_payload())
    }
}
