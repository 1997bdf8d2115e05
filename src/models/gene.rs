//! Gene entity: an Artsy category such as "Pop Art".

use async_trait::async_trait;
use serde_json::{Map, Value};

use super::artwork::with_dates;
use super::entity::TimelineEntity;
use super::fields::Fields;
use super::image::{image_version_url, ImageVersion};
use super::kind::EntityKind;
use super::timeline::{Asset, DateOptions, Timeline, TimelinePayload, TIMELINE_TYPE};
use super::{Artist, Artwork};
use crate::client::Client;
use crate::error::AppError;

#[derive(Debug)]
pub struct Gene {
    fields: Fields,
    client: Client,
    artworks: tokio::sync::OnceCell<Vec<Artwork>>,
    artists: tokio::sync::OnceCell<Vec<Artist>>,
}

impl Gene {
    pub fn new(fields: Map<String, Value>, client: Client) -> Self {
        Self {
            fields: Fields::new("Gene", fields),
            client,
            artworks: tokio::sync::OnceCell::new(),
            artists: tokio::sync::OnceCell::new(),
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
                self.client.find_artworks_for_gene(id).await
            })
            .await
            .map(Vec::as_slice)
    }

    /// The gene's first page of artists, fetched once.
    pub async fn artists(&self) -> Result<&[Artist], AppError> {
        self.artists
            .get_or_try_init(|| async {
                let id = self.id()?;
                self.client.find_artists_for_gene(id).await
            })
            .await
            .map(Vec::as_slice)
    }

    pub async fn artworks_with_dates(&self) -> Result<Vec<&Artwork>, AppError> {
        with_dates(self.artworks().await?)
    }

    /// Artists with a birth or death year, in listing order.
    pub async fn artists_with_dates(&self) -> Result<Vec<&Artist>, AppError> {
        let mut dated = Vec::new();
        for artist in self.artists().await? {
            if artist.valid_for_timeline_era()? {
                dated.push(artist);
            }
        }
        Ok(dated)
    }
}

#[async_trait]
impl TimelineEntity for Gene {
    fn kind(&self) -> EntityKind {
        EntityKind::Gene
    }

    fn label(&self) -> Result<&str, AppError> {
        self.name()
    }

    async fn valid_for_timeline(&self) -> Result<bool, AppError> {
        Ok(!self.artworks_with_dates().await?.is_empty())
    }

    async fn to_timeline(&self) -> Result<TimelinePayload, AppError> {
        // Both listings are independent; fetch them together.
        tokio::try_join!(self.artworks(), self.artists())?;

        let date = self
            .artworks_with_dates()
            .await?
            .into_iter()
            .map(|artwork| artwork.to_timeline_date(&DateOptions::new()))
            .collect::<Result<Vec<_>, _>>()?;
        let era = self
            .artists_with_dates()
            .await?
            .into_iter()
            .map(Artist::to_timeline_era)
            .collect::<Result<Vec<_>, _>>()?;

        let description = self.fields.nullable_str("description")?.unwrap_or_default();

        Ok(Timeline {
            headline: self.name()?.to_string(),
            kind: TIMELINE_TYPE,
            text: Some(self.client.render_markup_with_links(description, None)),
            asset: Asset {
                media: image_version_url(self.fields.as_map(), ImageVersion::Square, false),
            },
            date,
            era: Some(era),
        }
        .into_payload())
    }
}
