//! Artwork entity.

use async_trait::async_trait;
use once_cell::sync::OnceCell;
use serde_json::{Map, Value};

use super::entity::TimelineEntity;
use super::fields::Fields;
use super::image::{image_version_url, ImageVersion};
use super::kind::EntityKind;
use super::timeline::{
    Asset, DateAsset, DateOptions, Timeline, TimelineDate, TimelinePayload, TIMELINE_TYPE,
};
use super::years::first_year;
use super::Artist;
use crate::client::Client;
use crate::error::AppError;
use crate::markup::escape_html;

/// Marker class for the primary artwork's own date entry.
pub const SELECTED_ITEM_CLASS: &str = "selected-item";

/// An artwork, either fetched directly or listed on another entity.
///
/// An artwork is a point in time: its date entry starts and ends on the same year.
#[derive(Debug)]
pub struct Artwork {
    fields: Fields,
    client: Client,
    year: OnceCell<Option<String>>,
    description_html: OnceCell<String>,
    artist: OnceCell<Option<Artist>>,
    related_artworks: tokio::sync::OnceCell<Vec<Artwork>>,
}

impl Artwork {
    pub fn new(fields: Map<String, Value>, client: Client) -> Self {
        Self {
            fields: Fields::new("Artwork", fields),
            client,
            year: OnceCell::new(),
            description_html: OnceCell::new(),
            artist: OnceCell::new(),
            related_artworks: tokio::sync::OnceCell::new(),
        }
    }

    pub fn fields(&self) -> &Fields {
        &self.fields
    }

    pub fn id(&self) -> Result<&str, AppError> {
        self.fields.id()
    }

    pub fn title(&self) -> Result<&str, AppError> {
        self.fields.str("title")
    }

    /// The API's preformatted `display` string, falling back to `title`.
    pub fn display_title(&self) -> Result<&str, AppError> {
        match self.fields.optional_str("display")? {
            Some(display) => Ok(display),
            None => self.title(),
        }
    }

    /// First 4-digit year in the free-text `date` field.
    ///
    /// A `null` date or one without a 4-digit run has no year.
    pub fn year(&self) -> Result<Option<&str>, AppError> {
        self.year
            .get_or_try_init(|| {
                let date = self.fields.nullable_str("date")?;
                Ok::<_, AppError>(date.and_then(first_year).map(str::to_string))
            })
            .map(Option::as_deref)
    }

    /// True when the artwork can be placed on a timeline.
    pub fn is_dated(&self) -> Result<bool, AppError> {
        Ok(self.year()?.is_some_and(|y| !y.is_empty()))
    }

    /// Non-null values of the `dimensions` object joined with `", "`.
    pub fn dimensions_string(&self) -> Option<String> {
        let dimensions = self.fields.optional("dimensions")?.as_object()?;
        let parts: Vec<String> = dimensions
            .values()
            .filter_map(|v| match v {
                Value::Null => None,
                Value::String(s) => Some(s.clone()),
                other => Some(other.to_string()),
            })
            .collect();
        Some(parts.join(", "))
    }

    /// Medium, manufacturer and dimensions as an escaped HTML block.
    pub fn description(&self) -> Result<String, AppError> {
        let parts = [
            self.fields.optional_str("medium")?.map(escape_html),
            self.fields.optional_str("manufacturer")?.map(escape_html),
            self.dimensions_string().map(|d| escape_html(&d)),
        ];

        Ok(parts
            .into_iter()
            .flatten()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join("<br />"))
    }

    /// [`description`](Self::description) rendered through the client's markup renderer.
    pub fn description_html(&self) -> Result<&str, AppError> {
        self.description_html
            .get_or_try_init(|| {
                let description = self.description()?;
                Ok::<_, AppError>(self.client.render_markup_with_links(&description, None))
            })
            .map(String::as_str)
    }

    /// The image flagged `is_default` in `images`.
    pub fn default_image(&self) -> Result<Option<&Map<String, Value>>, AppError> {
        let images = match self.fields.optional("images") {
            Some(images) => images
                .as_array()
                .ok_or_else(|| self.fields.invalid("images", "an array"))?,
            None => return Ok(None),
        };

        Ok(images
            .iter()
            .filter_map(Value::as_object)
            .find(|image| image.get("is_default").and_then(Value::as_bool) == Some(true)))
    }

    pub fn large_image(&self) -> Result<Option<String>, AppError> {
        Ok(self
            .default_image()?
            .and_then(|image| image_version_url(image, ImageVersion::Large, false)))
    }

    pub fn thumbnail(&self) -> Result<Option<String>, AppError> {
        Ok(self
            .default_image()?
            .and_then(|image| image_version_url(image, ImageVersion::Small, false)))
    }

    /// The artist embedded in this artwork's own JSON, if any.
    pub fn artist(&self) -> Result<Option<&Artist>, AppError> {
        self.artist
            .get_or_try_init(|| match self.fields.optional("artist") {
                None => Ok(None),
                Some(Value::Object(map)) if map.is_empty() => Ok(None),
                Some(Value::Object(map)) => Ok(Some(Artist::new(map.clone(), self.client.clone()))),
                Some(_) => Err(self.fields.invalid("artist", "an object")),
            })
            .map(Option::as_ref)
    }

    /// Artworks the API considers related, fetched once.
    pub async fn related_artworks(&self) -> Result<&[Artwork], AppError> {
        self.related_artworks
            .get_or_try_init(|| async {
                let id = self.id()?;
                self.client.find_related_artworks_for_artwork(id).await
            })
            .await
            .map(Vec::as_slice)
    }

    /// Related artworks that have a year.
    pub async fn related_artworks_with_dates(&self) -> Result<Vec<&Artwork>, AppError> {
        with_dates(self.related_artworks().await?)
    }

    /// Link to the embedded artist's own timeline.
    fn artist_link(&self) -> Result<Option<String>, AppError> {
        match self.artist()? {
            Some(artist) => Ok(Some(format!(
                "<ul><li><a href='/artist/{}'>Artist Timeline</a></li></ul>",
                artist.id()?
            ))),
            None => Ok(None),
        }
    }

    /// Description block followed by the artist link.
    fn text(&self) -> Result<String, AppError> {
        Ok(format!(
            "<p>{}</p><p>{}</p>",
            self.description_html()?,
            self.artist_link()?.unwrap_or_default()
        ))
    }

    /// This artwork as a point-in-time entry on some timeline.
    pub fn to_timeline_date(&self, options: &DateOptions) -> Result<TimelineDate, AppError> {
        let year = self.year()?.unwrap_or_default().to_string();

        let headline = match &options.headline {
            Some(headline) => headline.clone(),
            None => self.display_title()?.to_string(),
        };
        let text = match &options.text {
            Some(text) => text.clone(),
            None => self.text()?,
        };

        Ok(TimelineDate {
            start_date: year.clone(),
            end_date: year,
            headline,
            text,
            classname: options.classname.clone(),
            asset: DateAsset {
                media: self.large_image()?,
                thumbnail: self.thumbnail()?,
            },
        })
    }
}

/// Keeps the artworks that have a year, preserving order.
pub(super) fn with_dates(artworks: &[Artwork]) -> Result<Vec<&Artwork>, AppError> {
    let mut dated = Vec::with_capacity(artworks.len());
    for artwork in artworks {
        if artwork.is_dated()? {
            dated.push(artwork);
        }
    }
    Ok(dated)
}

#[async_trait]
impl TimelineEntity for Artwork {
    fn kind(&self) -> EntityKind {
        EntityKind::Artwork
    }

    fn label(&self) -> Result<&str, AppError> {
        self.title()
    }

    async fn valid_for_timeline(&self) -> Result<bool, AppError> {
        self.is_dated()
    }

    async fn to_timeline(&self) -> Result<TimelinePayload, AppError> {
        let mut date = vec![self.to_timeline_date(&DateOptions::new().classname(SELECTED_ITEM_CLASS))?];
        for related in self.related_artworks_with_dates().await? {
            date.push(related.to_timeline_date(&DateOptions::new())?);
        }

        let era = match self.artist()? {
            Some(artist) => vec![artist.to_timeline_era()?],
            None => Vec::new(),
        };

        Ok(Timeline {
            headline: self.display_title()?.to_string(),
            kind: TIMELINE_TYPE,
            text: Some(self.text()?),
            asset: Asset {
                media: self.large_image()?,
            },
            date,
            era: Some(era),
        }
        .into_payload())
    }
}
